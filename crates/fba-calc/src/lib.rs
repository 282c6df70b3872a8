//! # FBA Fee Calculation Engine
//!
//! 尺寸分類、計費重量與費用查詢

pub mod batch;
pub mod calculator;
pub mod classifier;
pub mod conversion;
pub mod fee_lookup;
pub mod presets;
pub mod shipping_weight;
pub mod volumetric;

// Re-export 主要類型
pub use batch::{BatchResult, BatchSummary, RecordFailure};
pub use calculator::FeeEngine;
pub use classifier::Classifier;
pub use conversion::UnitConverter;
pub use fee_lookup::FeeLookup;
pub use shipping_weight::ShippingWeightResolver;
pub use volumetric::VolumetricCalculator;
