//! 歐洲站商品試算示例（英國 / 德國）

use fba::*;
use tracing_subscriber::EnvFilter;

const TIERS: &str = "\
rule_set,marketplace,category,weight_policy,longest,median,shortest,length_plus_girth,billable_weight,actual_weight,volumetric_weight
eu,eu,light_envelope,actual_only,33,23,2.5,,100,,
eu,eu,standard_envelope,actual_only,33,23,2.5,,460,,
eu,eu,small_parcel,max_of_both,35,25,12,,,3900,2100
eu,eu,standard_parcel,max_of_both,45,34,26,,,11900,7960
eu,eu,special_oversize,actual_only,,,,,,,
";

const FEES: &str = "\
country,period,category,weight,fee
GB,2024Q3,light_envelope,<=80g,£1.83
GB,2024Q3,light_envelope,<=100g,£1.87
GB,2024Q3,standard_envelope,<=210g,£2.08
GB,2024Q3,standard_envelope,<=460g,£2.29
GB,2024Q3,small_parcel,<=400g,£2.42
GB,2024Q3,small_parcel,<=1000g,£2.78
GB,2024Q3,small_parcel,<=3900g,£3.19
GB,2024Q3,standard_parcel,<=2000g,£3.62
GB,2024Q3,standard_parcel,<=11900g,£5.30
DE,2024Q3,light_envelope,<=80g,\"€2,07\"
DE,2024Q3,light_envelope,<=100g,\"€2,11\"
DE,2024Q3,standard_envelope,<=460g,\"€2,53\"
DE,2024Q3,small_parcel,<=3900g,\"€3,59\"
DE,2024Q3,standard_parcel,<=11900g,\"€5,78\"
";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== 歐洲站 FBA 費用試算 ===\n");

    let source = CsvTableSource::from_strings(TIERS, FEES);
    let engine = FeeEngine::from_source(&source, EngineConfig::default())?;

    let products = vec![
        ProductRecord::new("E001", "GB", Decimal::from(12))
            .with_sides(Decimal::from(20), Decimal::from(15), Decimal::from(1), "cm")
            .with_weight(Decimal::from(90), "g"),
        ProductRecord::new("E002", "DE", Decimal::from(25))
            .with_sides(Decimal::from(10), Decimal::from(8), Decimal::from(2), "cm")
            .with_weight(Decimal::from(1500), "g"),
        ProductRecord::new("E003", "GB", Decimal::from(40))
            .with_sides(Decimal::from(40), Decimal::from(30), Decimal::from(20), "cm")
            .with_weight(Decimal::new(45, 1), "kg"),
    ];

    let evaluations = [Evaluation::new(presets::EU, "2024Q3")];
    for product in &products {
        match engine.compute(product, &evaluations) {
            Ok(result) => {
                let rule_set = RuleSetId::from(presets::EU);
                if let Some(c) = result.classification(&rule_set) {
                    println!(
                        "{} [{}] 分類: {}, 體積重量: {} {}, 計費重量: {} {}",
                        result.record_id(),
                        product.country,
                        c.category,
                        c.volumetric_weight,
                        c.weight_unit,
                        c.shipping_weight,
                        c.weight_unit
                    );
                }
                for fee in result.fees() {
                    println!("    {} = {}", fee.field_name(), fee.amount);
                }
            }
            Err(e) => {
                tracing::warn!("商品 {} 計算失敗: {}", product.id, e);
                println!("{} 計算失敗: {}", product.id, e);
            }
        }
    }

    Ok(())
}
