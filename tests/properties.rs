//! 性質測試

use fba::*;
use proptest::prelude::*;

fn length() -> impl Strategy<Value = Decimal> {
    (1i64..=2000).prop_map(|n| Decimal::new(n, 1))
}

fn weight() -> impl Strategy<Value = Decimal> {
    (1i64..=400_000).prop_map(|n| Decimal::new(n, 3))
}

fn engine() -> FeeEngine {
    FeeEngine::new(presets::builtin_tier_table(), FeeTable::new(), EngineConfig::default())
}

/// 每個 us-2026 分類一條不設上限的線性費率
fn priced_engine() -> FeeEngine {
    let rule_set = presets::us_2026();
    let entries: Vec<FeeEntry> = rule_set
        .rules
        .iter()
        .map(|rule| {
            let key = FeeKey::new(FeeService::Fulfillment, "US", "2026", rule.category.name.as_str());
            let amount = FeeAmount::Linear {
                base: Decimal::new(322, 2),
                threshold: Decimal::ONE,
                rate: Decimal::new(16, 2),
                step: Some(Decimal::new(5, 1)),
            };
            FeeEntry::new(key, BracketBound::Unbounded, amount)
        })
        .collect();
    let fee_table = FeeTable::from_entries(entries).unwrap();

    FeeEngine::new(presets::builtin_tier_table(), fee_table, EngineConfig::default())
}

proptest! {
    #[test]
    fn prop_dimensions_are_sorted(a in length(), b in length(), c in length()) {
        let dims = Dimensions::new(a, b, c).unwrap();
        prop_assert!(dims.longest() >= dims.median());
        prop_assert!(dims.median() >= dims.shortest());

        let mut input = [a, b, c];
        input.sort();
        let mut output = dims.to_array();
        output.sort();
        prop_assert_eq!(input, output);
    }

    #[test]
    fn prop_volumetric_weight_is_exact_and_monotonic(
        a in length(),
        b in length(),
        c in length(),
        grow in length(),
    ) {
        let rule = MarketplaceProfile::us().volumetric;
        let vol = VolumetricCalculator::volumetric_weight(a, b, c, &rule).unwrap();
        prop_assert_eq!(vol, a * b * c / Decimal::from(139));

        let grown = [(a + grow, b, c), (a, b + grow, c), (a, b, c + grow)];
        for (x, y, z) in grown {
            let bigger = VolumetricCalculator::volumetric_weight(x, y, z, &rule).unwrap();
            prop_assert!(bigger > vol, "{} × {} × {}: {} <= {}", x, y, z, bigger, vol);
        }
    }

    #[test]
    fn prop_policy_resolution(actual in weight(), vol in weight()) {
        let max = ShippingWeightResolver::resolve(&SizeCategory::max_of_both("x"), actual, vol);
        prop_assert!(max >= actual && max >= vol);
        prop_assert!(max == actual || max == vol);

        let only = ShippingWeightResolver::resolve(&SizeCategory::actual_only("x"), actual, vol);
        prop_assert_eq!(only, actual);
    }

    #[test]
    fn prop_builtin_rule_sets_classify_everything(
        a in length(),
        b in length(),
        c in length(),
        w in weight(),
    ) {
        let engine = engine();
        let us = ProductRecord::new("P", "US", Decimal::from(20))
            .with_sides(a, b, c, "in")
            .with_weight(w, "lb");
        let eu = ProductRecord::new("P", "DE", Decimal::from(20))
            .with_sides(a, b, c, "cm")
            .with_weight(w, "kg");

        for id in [presets::US_2024, presets::US_2026] {
            let classification = engine.classify(&us, &RuleSetId::from(id));
            prop_assert!(classification.is_ok(), "{}: {:?}", id, classification);
        }
        let classification = engine.classify(&eu, &RuleSetId::from(presets::EU));
        prop_assert!(classification.is_ok(), "{:?}", classification);
    }

    #[test]
    fn prop_compute_is_idempotent(
        a in length(),
        b in length(),
        c in length(),
        w in weight(),
        price in (1i64..=100_000).prop_map(|n| Decimal::new(n, 2)),
    ) {
        let engine = priced_engine();
        let record = ProductRecord::new("P", "US", price)
            .with_sides(a, b, c, "in")
            .with_weight(w, "oz");
        let evaluations = [Evaluation::new(presets::US_2026, "2026")];

        let first = engine.compute(&record, &evaluations);
        prop_assert!(first.is_ok(), "{:?}", first);
        prop_assert_eq!(first.as_ref().ok().map(|r| r.fees().len()), Some(1));
        prop_assert_eq!(first, engine.compute(&record, &evaluations));
    }
}
