use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fba_calc::{presets, FeeEngine};
use fba_core::{
    BracketBound, EngineConfig, Evaluation, FeeAmount, FeeEntry, FeeKey, FeeService, FeeTable,
    ProductRecord,
};
use rust_decimal::Decimal;

fn fee_table() -> FeeTable {
    let categories = [
        presets::SMALL_STANDARD,
        presets::LARGE_STANDARD,
        presets::SMALL_BULKY,
        presets::LARGE_BULKY,
        presets::OVERSIZE_0_50,
        presets::OVERSIZE_50_70,
        presets::OVERSIZE_70_150,
        presets::OVERSIZE_150_PLUS,
    ];
    let entries = categories.iter().map(|category| {
        FeeEntry::new(
            FeeKey::new(FeeService::Fulfillment, "US", "2024", *category),
            BracketBound::Unbounded,
            FeeAmount::Linear {
                base: Decimal::new(322, 2),
                threshold: Decimal::ONE,
                rate: Decimal::new(16, 2),
                step: Some(Decimal::new(5, 1)),
            },
        )
    });
    FeeTable::from_entries(entries).unwrap_or_default()
}

fn records(count: u32) -> Vec<ProductRecord> {
    (0..count)
        .map(|i| {
            let side = Decimal::from(i % 60 + 1);
            ProductRecord::new(format!("X{:05}", i), "US", Decimal::from(20))
                .with_sides(side, Decimal::from(8), Decimal::from(2), "in")
                .with_weight(Decimal::new(i64::from(i % 400 + 1), 1), "lb")
        })
        .collect()
}

fn bench_batch(c: &mut Criterion) {
    let engine = FeeEngine::new(presets::builtin_tier_table(), fee_table(), EngineConfig::default());
    let evaluations = Evaluation::cross(&[presets::US_2024, presets::US_2026], &["2024"]);
    let records = records(10_000);

    c.bench_function("compute_batch_10k", |b| {
        b.iter(|| engine.compute_batch(black_box(&records), black_box(&evaluations)))
    });
}

criterion_group!(benches, bench_batch);
criterion_main!(benches);
