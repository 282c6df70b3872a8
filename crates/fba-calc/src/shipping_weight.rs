//! 計費重量決定

use fba_core::{FeeError, RuleSet, SizeCategory};
use rust_decimal::Decimal;

/// 計費重量解析器
pub struct ShippingWeightResolver;

impl ShippingWeightResolver {
    /// 依分類附帶的策略決定計費重量
    pub fn resolve(
        category: &SizeCategory,
        actual_weight: Decimal,
        volumetric_weight: Decimal,
    ) -> Decimal {
        category
            .weight_policy
            .select(actual_weight, volumetric_weight)
    }

    /// 以分類名稱在規則集中查找策略後決定計費重量
    pub fn resolve_by_name(
        rule_set: &RuleSet,
        category_name: &str,
        actual_weight: Decimal,
        volumetric_weight: Decimal,
    ) -> fba_core::Result<Decimal> {
        let category = rule_set.category(category_name).ok_or_else(|| {
            FeeError::Unclassifiable(format!(
                "分類 {} 不屬於規則集 {}",
                category_name, rule_set.id
            ))
        })?;
        Ok(Self::resolve(category, actual_weight, volumetric_weight))
    }
}
