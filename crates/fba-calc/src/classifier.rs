//! 尺寸分類

use fba_core::{Dimensions, FeeError, RuleSet, RuleSetId, SizeCategory, TierTable};
use rust_decimal::Decimal;

/// 尺寸分類器
pub struct Classifier;

impl Classifier {
    /// 在分段規則表中按規則集 ID 分類
    pub fn classify<'a>(
        tier_table: &'a TierTable,
        rule_set_id: &RuleSetId,
        dimensions: &Dimensions,
        actual_weight: Decimal,
        volumetric_weight: Decimal,
    ) -> fba_core::Result<&'a SizeCategory> {
        let rule_set = tier_table.get(rule_set_id)?;
        Self::classify_with(rule_set, dimensions, actual_weight, volumetric_weight)
    }

    /// 由小到大依序評估規則，回傳第一個符合的分類
    ///
    /// 每條規則以自己分類的計費重量策略檢查重量邊界。
    /// 沒有任何規則符合代表規則表有缺口，直接回報錯誤。
    pub fn classify_with<'a>(
        rule_set: &'a RuleSet,
        dimensions: &Dimensions,
        actual_weight: Decimal,
        volumetric_weight: Decimal,
    ) -> fba_core::Result<&'a SizeCategory> {
        let matched = rule_set
            .rules
            .iter()
            .find(|rule| rule.matches(dimensions, actual_weight, volumetric_weight));

        match matched {
            Some(rule) => {
                tracing::debug!(
                    "規則集 {} 分類結果: {} (尺寸 {:?}, 實際重量 {}, 體積重量 {})",
                    rule_set.id,
                    rule.category,
                    dimensions.to_array(),
                    actual_weight,
                    volumetric_weight
                );
                Ok(&rule.category)
            }
            None => Err(FeeError::Unclassifiable(format!(
                "規則集 {} 沒有符合的分段: 尺寸 {:?}, 實際重量 {}, 體積重量 {}",
                rule_set.id,
                dimensions.to_array(),
                actual_weight,
                volumetric_weight
            ))),
        }
    }
}
