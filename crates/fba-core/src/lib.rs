//! # FBA Core
//!
//! 核心資料模型與類型定義

pub mod category;
pub mod config;
pub mod dimensions;
pub mod fee;
pub mod period;
pub mod product;
pub mod result;
pub mod source;
pub mod tier;
pub mod units;

// Re-export 主要類型
pub use category::{SizeCategory, WeightPolicy};
pub use config::{EngineConfig, MarketplaceProfile, VolumetricRule};
pub use dimensions::Dimensions;
pub use fee::{
    BracketBound, FeeAmount, FeeEntry, FeeKey, FeeSchedule, FeeService, FeeTable, PriceBand,
    ServiceLevel, WeightBracket,
};
pub use period::Period;
pub use product::{Evaluation, ProductRecord};
pub use result::{Classification, FeeLine, FieldValue, ResultRecord};
pub use source::{InMemorySource, TableSource};
pub use tier::{Interval, RuleSet, RuleSetId, TierBounds, TierRule, TierTable};
pub use units::{LengthUnit, MassUnit, UnitSystem};

/// 費用計算錯誤類型
///
/// 所有錯誤都只屬於單筆記錄的計算，不會影響共享的費率表。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeeError {
    #[error("不支援的單位: {0}")]
    UnsupportedUnit(String),

    #[error("無效的尺寸: {0}")]
    InvalidDimension(String),

    #[error("無效的重量: {0}")]
    InvalidWeight(String),

    #[error("無效的價格: {0}")]
    InvalidPrice(String),

    #[error("市場不服務此國家: {0}")]
    UnsupportedCountry(String),

    #[error("未知的規則集: {0}")]
    UnknownRuleSet(String),

    #[error("無法分類: {0}")]
    Unclassifiable(String),

    #[error("找不到費用: {0}")]
    FeeNotFound(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FeeError>;
