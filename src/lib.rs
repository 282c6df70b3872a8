//! # FBA
//!
//! 亞馬遜 FBA 包裹尺寸分類、計費重量與費用計算

pub use fba_calc::{
    presets, BatchResult, BatchSummary, Classifier, FeeEngine, FeeLookup, RecordFailure,
    ShippingWeightResolver, UnitConverter, VolumetricCalculator,
};
pub use fba_core::*;
pub use fba_loader::{read_fee_table, read_products, read_tier_table, CsvTableSource, LoadError};
pub use rust_decimal::Decimal;
