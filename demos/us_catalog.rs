//! 美國站商品批次試算示例

use fba::*;
use tracing_subscriber::EnvFilter;

const FEES: &str = "\
period,country,category,price,weight,fee
2024,US,small_standard,,\"(0,0.5]\",$3.22
2024,US,small_standard,,\"(0.5,1]\",$3.86
2024,US,large_standard,<10,\"(0,1]\",$3.68
2024,US,large_standard,<10,\"(1,3]\",$4.75
2024,US,large_standard,<10,\"(3,20]\",6.92+(W-3)*0.16
2024,US,large_standard,>=10,\"(0,1]\",$4.45
2024,US,large_standard,>=10,\"(1,3]\",$5.40
2024,US,large_standard,>=10,\"(3,20]\",$7.62+ceil((W-3)/0.5)*0.08
2024,US,small_bulky,,\"(0,50]\",$9.61+(W-1)*0.38
2024,US,large_bulky,,\"(0,50]\",$9.61+(W-1)*0.38
2024,US,oversize_0_50,,\"(0,50]\",$26.33+(W-1)*0.38
2024,US,oversize_50_70,,\"(50,70]\",$40.12+(W-51)*0.75
2024,US,oversize_70_150,,\"(70,150]\",$54.81+(W-71)*0.75
2024,US,oversize_150_plus,,>150,$194.95+(W-151)*0.19
";

const PRODUCTS: &str = "\
fnsku,sales-price,longest-side,median-side,shortest-side,unit-of-dimension,item-package-weight,unit-of-weight,amazon-store
X001ABC,19.99,10,8,2,inches,1.5,pounds,US
X002ABC,8.50,12,9,0.5,inches,10,ounces,US
X003ABC,45.00,30,20,10,inches,12,pounds,US
X004ABC,129.00,80,40,30,inches,95,pounds,US
X005ABC,15.00,25,20,5,centimeters,800,grams,US
X006ABC,15.00,25,20,5,centimeters,800,stone,US
";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== 美國站 FBA 費用試算 ===\n");

    // 費用表：配送費 + 內建移除費
    let mut fee_table = read_fee_table(FEES.as_bytes())?;
    for entry in presets::us_removal_entries("2024") {
        fee_table.insert_entry(entry)?;
    }

    let engine = FeeEngine::new(
        presets::builtin_tier_table(),
        fee_table,
        EngineConfig::default().with_extra_service(FeeService::Removal),
    );

    let products = read_products(PRODUCTS.as_bytes())?;
    let evaluations = Evaluation::cross(&[presets::US_2024, presets::US_2026], &["2024"]);
    let batch = engine.compute_batch(&products, &evaluations);

    println!("試算結果:");
    for result in &batch.results {
        println!("  - {}", result.record_id());
        for (field, value) in result.fields() {
            println!("      {}: {}", field, value);
        }
    }

    if !batch.failures.is_empty() {
        println!("\n失敗商品:");
        for failure in &batch.failures {
            println!("  - {}: {}", failure.record_id, failure.error);
        }
    }

    let summary = batch.summary();
    println!("\n分類統計:");
    for (rule_set, counts) in &summary.category_counts {
        for (category, count) in counts {
            println!("  - {} / {}: {} 件", rule_set, category, count);
        }
    }

    println!("\n平均費用:");
    for (field, mean) in &summary.mean_fees {
        println!("  - {}: ${}", field, mean);
    }

    println!(
        "\n共 {} 筆，耗時 {} ms",
        batch.total(),
        batch.calculation_time_ms.unwrap_or_default()
    );

    Ok(())
}
