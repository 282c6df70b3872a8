//! 內建規則集與費用資料
//!
//! 美國站 2024 / 2026 兩套分段規則、歐洲站分段規則，以及美國站移除費級距。

use fba_core::{
    BracketBound, FeeAmount, FeeEntry, FeeKey, FeeService, Interval, MarketplaceProfile, RuleSet,
    SizeCategory, TierBounds, TierRule, TierTable,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const US_2024: &str = "us-2024";
pub const US_2026: &str = "us-2026";
pub const EU: &str = "eu";

// 美國站分類
pub const SMALL_STANDARD: &str = "small_standard";
pub const LARGE_STANDARD: &str = "large_standard";
pub const SMALL_BULKY: &str = "small_bulky";
pub const LARGE_BULKY: &str = "large_bulky";
pub const OVERSIZE_0_50: &str = "oversize_0_50";
pub const OVERSIZE_50_70: &str = "oversize_50_70";
pub const OVERSIZE_70_150: &str = "oversize_70_150";
pub const OVERSIZE_150_PLUS: &str = "oversize_150_plus";

// 歐洲站分類
pub const LIGHT_ENVELOPE: &str = "light_envelope";
pub const STANDARD_ENVELOPE: &str = "standard_envelope";
pub const LARGE_ENVELOPE: &str = "large_envelope";
pub const EXTRA_LARGE_ENVELOPE: &str = "extra_large_envelope";
pub const SMALL_PARCEL: &str = "small_parcel";
pub const STANDARD_PARCEL: &str = "standard_parcel";
pub const SMALL_OVERSIZE: &str = "small_oversize";
pub const STANDARD_OVERSIZE_LIGHT: &str = "standard_oversize_light";
pub const STANDARD_OVERSIZE_HEAVY: &str = "standard_oversize_heavy";
pub const STANDARD_OVERSIZE_LARGE: &str = "standard_oversize_large";
pub const BULKY_OVERSIZE: &str = "bulky_oversize";
pub const HEAVY_OVERSIZE: &str = "heavy_oversize";
pub const SPECIAL_OVERSIZE: &str = "special_oversize";

fn us_rule_set(id: &str, with_small_bulky: bool) -> RuleSet {
    let mut rule_set = RuleSet::new(id, MarketplaceProfile::us())
        .with_rule(TierRule::new(
            SizeCategory::actual_only(SMALL_STANDARD),
            TierBounds::new()
                .with_max_sides(dec!(15), dec!(12), dec!(0.75))
                .with_billable_weight(Interval::at_most(dec!(1))),
        ))
        .with_rule(TierRule::new(
            SizeCategory::max_of_both(LARGE_STANDARD),
            TierBounds::new()
                .with_max_sides(dec!(18), dec!(14), dec!(8))
                .with_billable_weight(Interval::at_most(dec!(20))),
        ));

    if with_small_bulky {
        rule_set.push_rule(TierRule::new(
            SizeCategory::max_of_both(SMALL_BULKY),
            TierBounds::new()
                .with_max_sides(dec!(37), dec!(28), dec!(20))
                .with_max_length_plus_girth(dec!(130))
                .with_billable_weight(Interval::at_most(dec!(50))),
        ));
    }

    rule_set
        .with_rule(TierRule::new(
            SizeCategory::max_of_both(LARGE_BULKY),
            TierBounds::new()
                .with_max_sides(dec!(59), dec!(33), dec!(33))
                .with_max_length_plus_girth(dec!(130))
                .with_billable_weight(Interval::at_most(dec!(50))),
        ))
        .with_rule(TierRule::new(
            SizeCategory::max_of_both(OVERSIZE_0_50),
            TierBounds::new().with_billable_weight(Interval::at_most(dec!(50))),
        ))
        .with_rule(TierRule::new(
            SizeCategory::max_of_both(OVERSIZE_50_70),
            TierBounds::new().with_billable_weight(Interval::between(dec!(50), dec!(70))),
        ))
        .with_rule(TierRule::new(
            SizeCategory::max_of_both(OVERSIZE_70_150),
            TierBounds::new().with_billable_weight(Interval::between(dec!(70), dec!(150))),
        ))
        .with_rule(TierRule::terminal(SizeCategory::actual_only(OVERSIZE_150_PLUS)))
}

/// 美國站 2024 年起的分段規則
pub fn us_2024() -> RuleSet {
    us_rule_set(US_2024, false)
}

/// 美國站 2026 年起的分段規則（新增小號大件）
pub fn us_2026() -> RuleSet {
    us_rule_set(US_2026, true)
}

fn envelope(name: &str, thickness: Decimal, max_weight: Decimal) -> TierRule {
    TierRule::new(
        SizeCategory::actual_only(name),
        TierBounds::new()
            .with_max_sides(dec!(33), dec!(23), thickness)
            .with_billable_weight(Interval::at_most(max_weight)),
    )
}

fn parcel(name: &str, sides: [Decimal; 3], actual: Interval, volumetric: Decimal) -> TierRule {
    TierRule::new(
        SizeCategory::max_of_both(name),
        TierBounds::new()
            .with_max_sides(sides[0], sides[1], sides[2])
            .with_actual_weight(actual)
            .with_volumetric_weight(Interval::at_most(volumetric)),
    )
}

fn bulky(name: &str, max_actual: Decimal) -> TierRule {
    TierRule::new(
        SizeCategory::max_of_both(name),
        TierBounds::new()
            .with_max_longest(dec!(175))
            .with_max_length_plus_girth(dec!(360))
            .with_actual_weight(Interval::at_most(max_actual))
            .with_volumetric_weight(Interval::at_most(dec!(126000))),
    )
}

/// 歐洲站分段規則（公分 / 克）
pub fn eu() -> RuleSet {
    RuleSet::new(EU, MarketplaceProfile::eu())
        .with_rule(envelope(LIGHT_ENVELOPE, dec!(2.5), dec!(100)))
        .with_rule(envelope(STANDARD_ENVELOPE, dec!(2.5), dec!(460)))
        .with_rule(envelope(LARGE_ENVELOPE, dec!(4), dec!(960)))
        .with_rule(envelope(EXTRA_LARGE_ENVELOPE, dec!(6), dec!(960)))
        .with_rule(parcel(
            SMALL_PARCEL,
            [dec!(35), dec!(25), dec!(12)],
            Interval::at_most(dec!(3900)),
            dec!(2100),
        ))
        .with_rule(parcel(
            STANDARD_PARCEL,
            [dec!(45), dec!(34), dec!(26)],
            Interval::at_most(dec!(11900)),
            dec!(7960),
        ))
        .with_rule(parcel(
            SMALL_OVERSIZE,
            [dec!(61), dec!(46), dec!(46)],
            Interval::at_most(dec!(1760)),
            dec!(25820),
        ))
        .with_rule(parcel(
            STANDARD_OVERSIZE_LIGHT,
            [dec!(101), dec!(60), dec!(60)],
            Interval::at_most(dec!(15000)),
            dec!(72720),
        ))
        .with_rule(parcel(
            STANDARD_OVERSIZE_HEAVY,
            [dec!(101), dec!(60), dec!(60)],
            Interval::between(dec!(15000), dec!(23000)),
            dec!(72720),
        ))
        .with_rule(parcel(
            STANDARD_OVERSIZE_LARGE,
            [dec!(120), dec!(60), dec!(60)],
            Interval::at_most(dec!(23000)),
            dec!(86400),
        ))
        .with_rule(bulky(BULKY_OVERSIZE, dec!(23000)))
        .with_rule(bulky(HEAVY_OVERSIZE, dec!(31500)))
        .with_rule(TierRule::terminal(SizeCategory::actual_only(SPECIAL_OVERSIZE)))
}

/// 全部內建規則集
pub fn builtin_tier_table() -> TierTable {
    TierTable::new()
        .with_rule_set(us_2024())
        .with_rule_set(us_2026())
        .with_rule_set(eu())
}

/// 美國站移除費級距
///
/// 標準尺寸與大件各一組；超過最後一級按每磅 1.06 加收。
pub fn us_removal_entries(period: &str) -> Vec<FeeEntry> {
    let standard = [
        (BracketBound::Inclusive(dec!(0.5)), FeeAmount::Fixed(dec!(0.84))),
        (BracketBound::Inclusive(dec!(1)), FeeAmount::Fixed(dec!(1.53))),
        (BracketBound::Inclusive(dec!(2)), FeeAmount::Fixed(dec!(2.27))),
        (BracketBound::Unbounded, per_pound(dec!(2.89), dec!(2))),
    ];
    let oversize = [
        (BracketBound::Inclusive(dec!(1)), FeeAmount::Fixed(dec!(3.12))),
        (BracketBound::Inclusive(dec!(2)), FeeAmount::Fixed(dec!(4.30))),
        (BracketBound::Inclusive(dec!(4)), FeeAmount::Fixed(dec!(6.36))),
        (BracketBound::Inclusive(dec!(10)), FeeAmount::Fixed(dec!(10.04))),
        (BracketBound::Unbounded, per_pound(dec!(14.32), dec!(10))),
    ];

    let categories = [
        SMALL_STANDARD,
        LARGE_STANDARD,
        SMALL_BULKY,
        LARGE_BULKY,
        OVERSIZE_0_50,
        OVERSIZE_50_70,
        OVERSIZE_70_150,
        OVERSIZE_150_PLUS,
    ];

    categories
        .iter()
        .flat_map(|category| {
            let brackets: &[(BracketBound, FeeAmount)] =
                if matches!(*category, SMALL_STANDARD | LARGE_STANDARD) {
                    &standard
                } else {
                    &oversize
                };
            brackets.iter().map(move |(upper, amount)| {
                FeeEntry::new(
                    FeeKey::new(FeeService::Removal, "US", period, *category),
                    *upper,
                    *amount,
                )
            })
        })
        .collect()
}

fn per_pound(base: Decimal, threshold: Decimal) -> FeeAmount {
    FeeAmount::Linear {
        base,
        threshold,
        rate: dec!(1.06),
        step: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::fee_lookup::FeeLookup;
    use fba_core::{Dimensions, FeeTable};
    use rstest::rstest;

    fn classify(rule_set: &RuleSet, sides: [Decimal; 3], actual: Decimal, vol: Decimal) -> String {
        let dims = Dimensions::new(sides[0], sides[1], sides[2]).unwrap();
        Classifier::classify_with(rule_set, &dims, actual, vol)
            .unwrap()
            .name
            .clone()
    }

    #[test]
    fn test_builtin_sets_are_exhaustive() {
        for rule_set in [us_2024(), us_2026(), eu()] {
            assert!(rule_set.is_exhaustive(), "{} 缺少兜底規則", rule_set.id);
            assert!(rule_set.validate().is_ok());
        }
        assert_eq!(builtin_tier_table().len(), 3);
    }

    #[rstest]
    #[case([dec!(10), dec!(8), dec!(0.5)], dec!(0.8), dec!(0.3), SMALL_STANDARD)]
    #[case([dec!(10), dec!(8), dec!(2)], dec!(1.5), dec!(1.151), LARGE_STANDARD)]
    #[case([dec!(30), dec!(20), dec!(10)], dec!(10), dec!(43.17), LARGE_BULKY)]
    #[case([dec!(30), dec!(20), dec!(10)], dec!(55), dec!(43.17), OVERSIZE_50_70)]
    #[case([dec!(70), dec!(30), dec!(30)], dec!(20), dec!(453.24), OVERSIZE_150_PLUS)]
    fn test_us_2024_tiers(
        #[case] sides: [Decimal; 3],
        #[case] actual: Decimal,
        #[case] vol: Decimal,
        #[case] expected: &str,
    ) {
        assert_eq!(classify(&us_2024(), sides, actual, vol), expected);
    }

    #[test]
    fn test_small_bulky_only_in_2026() {
        let sides = [dec!(30), dec!(20), dec!(10)];
        assert_eq!(classify(&us_2026(), sides, dec!(10), dec!(43.17)), SMALL_BULKY);
        assert_eq!(classify(&us_2024(), sides, dec!(10), dec!(43.17)), LARGE_BULKY);
    }

    #[test]
    fn test_small_standard_ignores_volumetric_weight() {
        // 實際 0.9 磅、體積 1.2 磅：小號標準只看實際重量
        let sides = [dec!(15), dec!(12), dec!(0.75)];
        assert_eq!(classify(&us_2024(), sides, dec!(0.9), dec!(1.2)), SMALL_STANDARD);
    }

    #[rstest]
    #[case([dec!(20), dec!(15), dec!(1)], dec!(80), LIGHT_ENVELOPE)]
    #[case([dec!(20), dec!(15), dec!(1)], dec!(300), STANDARD_ENVELOPE)]
    #[case([dec!(30), dec!(20), dec!(5)], dec!(900), EXTRA_LARGE_ENVELOPE)]
    #[case([dec!(10), dec!(8), dec!(2)], dec!(1500), SMALL_PARCEL)]
    #[case([dec!(40), dec!(30), dec!(20)], dec!(5000), STANDARD_PARCEL)]
    #[case([dec!(100), dec!(50), dec!(50)], dec!(18000), STANDARD_OVERSIZE_HEAVY)]
    #[case([dec!(150), dec!(50), dec!(20)], dec!(20000), BULKY_OVERSIZE)]
    #[case([dec!(150), dec!(50), dec!(20)], dec!(40000), SPECIAL_OVERSIZE)]
    fn test_eu_tiers(#[case] sides: [Decimal; 3], #[case] actual: Decimal, #[case] expected: &str) {
        let [a, b, c] = sides;
        let vol = a * b * c / dec!(5000) * dec!(1000);
        assert_eq!(classify(&eu(), sides, actual, vol), expected);
    }

    #[rstest]
    #[case(LARGE_STANDARD, dec!(0.5), dec!(0.84))]
    #[case(LARGE_STANDARD, dec!(1.5), dec!(2.27))]
    #[case(SMALL_STANDARD, dec!(3), dec!(3.95))]
    #[case(LARGE_BULKY, dec!(3), dec!(6.36))]
    #[case(OVERSIZE_70_150, dec!(12), dec!(16.44))]
    fn test_removal_fee(#[case] category: &str, #[case] weight: Decimal, #[case] expected: Decimal) {
        let table = FeeTable::from_entries(us_removal_entries("2024")).unwrap();
        let fee = FeeLookup::lookup_service_fee(
            &table,
            FeeService::Removal,
            category,
            weight,
            dec!(20),
            "2024",
            "us",
        )
        .unwrap();
        assert_eq!(fee, expected);
    }
}
