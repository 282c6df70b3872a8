//! 尺寸分類與計費重量策略

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 計費重量策略
///
/// 每個尺寸分類固定綁定一種策略，隨費率表資料一起載入。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPolicy {
    /// 只使用商品實際重量
    #[serde(alias = "ActualOnly", alias = "actual")]
    ActualOnly,

    /// 取實際重量與體積重量的較大值
    #[serde(alias = "MaxOfBoth", alias = "max")]
    MaxOfBoth,
}

impl WeightPolicy {
    /// 依策略選出計費重量
    pub fn select(self, actual_weight: Decimal, volumetric_weight: Decimal) -> Decimal {
        match self {
            Self::ActualOnly => actual_weight,
            Self::MaxOfBoth => actual_weight.max(volumetric_weight),
        }
    }
}

/// 尺寸分類
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeCategory {
    /// 分類名稱（同時作為費用表的查詢鍵）
    pub name: String,

    /// 計費重量策略
    pub weight_policy: WeightPolicy,
}

impl SizeCategory {
    /// 創建新的尺寸分類
    pub fn new(name: impl Into<String>, weight_policy: WeightPolicy) -> Self {
        Self {
            name: name.into(),
            weight_policy,
        }
    }

    /// 只按實際重量計費的分類
    pub fn actual_only(name: impl Into<String>) -> Self {
        Self::new(name, WeightPolicy::ActualOnly)
    }

    /// 按實際 / 體積重量較大值計費的分類
    pub fn max_of_both(name: impl Into<String>) -> Self {
        Self::new(name, WeightPolicy::MaxOfBoth)
    }
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_actual_only_ignores_volumetric() {
        let policy = WeightPolicy::ActualOnly;

        assert_eq!(policy.select(dec!(1.5), dec!(99)), dec!(1.5));
        assert_eq!(policy.select(dec!(1.5), dec!(0.1)), dec!(1.5));
    }

    #[test]
    fn test_max_of_both() {
        let policy = WeightPolicy::MaxOfBoth;

        assert_eq!(policy.select(dec!(1.5), dec!(1.1511)), dec!(1.5));
        assert_eq!(policy.select(dec!(1.5), dec!(3.2)), dec!(3.2));
    }

    #[test]
    fn test_category_constructors() {
        let small = SizeCategory::actual_only("small_standard");
        let large = SizeCategory::max_of_both("large_standard");

        assert_eq!(small.weight_policy, WeightPolicy::ActualOnly);
        assert_eq!(large.weight_policy, WeightPolicy::MaxOfBoth);
        assert_eq!(large.to_string(), "large_standard");
    }
}
