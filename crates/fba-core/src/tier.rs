//! 尺寸分段規則模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::category::SizeCategory;
use crate::config::MarketplaceProfile;
use crate::dimensions::Dimensions;
use crate::{FeeError, Result};

/// 半開區間 (lower, upper]，缺少的一端視為無界
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Interval {
    /// 下界（不含）
    pub lower: Option<Decimal>,

    /// 上界（含）
    pub upper: Option<Decimal>,
}

impl Interval {
    /// 無界區間
    pub const UNBOUNDED: Interval = Interval {
        lower: None,
        upper: None,
    };

    /// (-∞, upper]
    pub fn at_most(upper: Decimal) -> Self {
        Self {
            lower: None,
            upper: Some(upper),
        }
    }

    /// (lower, +∞)
    pub fn above(lower: Decimal) -> Self {
        Self {
            lower: Some(lower),
            upper: None,
        }
    }

    /// (lower, upper]
    pub fn between(lower: Decimal, upper: Decimal) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    /// 檢查數值是否落在區間內
    pub fn contains(&self, value: Decimal) -> bool {
        self.lower.map_or(true, |lower| value > lower)
            && self.upper.map_or(true, |upper| value <= upper)
    }

    /// 是否完全無界
    pub fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }
}

/// 分段邊界：各項量測的區間條件（全部滿足才算符合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TierBounds {
    /// 最長邊
    pub longest: Interval,

    /// 次長邊
    pub median: Interval,

    /// 最短邊
    pub shortest: Interval,

    /// 長度加圍長
    pub length_plus_girth: Interval,

    /// 計費重量（依該分類自己的策略選出）
    pub billable_weight: Interval,

    /// 實際重量
    pub actual_weight: Interval,

    /// 體積重量
    pub volumetric_weight: Interval,
}

impl TierBounds {
    /// 創建無條件的邊界
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置三邊上限
    pub fn with_max_sides(mut self, longest: Decimal, median: Decimal, shortest: Decimal) -> Self {
        self.longest = Interval::at_most(longest);
        self.median = Interval::at_most(median);
        self.shortest = Interval::at_most(shortest);
        self
    }

    /// 建構器模式：設置最長邊上限
    pub fn with_max_longest(mut self, longest: Decimal) -> Self {
        self.longest = Interval::at_most(longest);
        self
    }

    /// 建構器模式：設置長度加圍長上限
    pub fn with_max_length_plus_girth(mut self, limit: Decimal) -> Self {
        self.length_plus_girth = Interval::at_most(limit);
        self
    }

    /// 建構器模式：設置計費重量區間
    pub fn with_billable_weight(mut self, interval: Interval) -> Self {
        self.billable_weight = interval;
        self
    }

    /// 建構器模式：設置實際重量區間
    pub fn with_actual_weight(mut self, interval: Interval) -> Self {
        self.actual_weight = interval;
        self
    }

    /// 建構器模式：設置體積重量區間
    pub fn with_volumetric_weight(mut self, interval: Interval) -> Self {
        self.volumetric_weight = interval;
        self
    }

    /// 是否沒有任何條件
    pub fn is_unbounded(&self) -> bool {
        [
            self.longest,
            self.median,
            self.shortest,
            self.length_plus_girth,
            self.billable_weight,
            self.actual_weight,
            self.volumetric_weight,
        ]
        .iter()
        .all(Interval::is_unbounded)
    }
}

/// 尺寸分段規則
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRule {
    /// 符合時得到的分類（含計費重量策略）
    pub category: SizeCategory,

    /// 分段邊界
    pub bounds: TierBounds,
}

impl TierRule {
    /// 創建新的分段規則
    pub fn new(category: SizeCategory, bounds: TierBounds) -> Self {
        Self { category, bounds }
    }

    /// 創建無條件的兜底規則
    pub fn terminal(category: SizeCategory) -> Self {
        Self::new(category, TierBounds::new())
    }

    /// 是否為無條件的兜底規則
    pub fn is_terminal(&self) -> bool {
        self.bounds.is_unbounded()
    }

    /// 檢查包裹是否符合此分段
    ///
    /// 計費重量以本分類自己的策略選出，而不是全域統一的重量。
    pub fn matches(
        &self,
        dimensions: &Dimensions,
        actual_weight: Decimal,
        volumetric_weight: Decimal,
    ) -> bool {
        let billable_weight = self
            .category
            .weight_policy
            .select(actual_weight, volumetric_weight);
        let bounds = &self.bounds;

        bounds.longest.contains(dimensions.longest())
            && bounds.median.contains(dimensions.median())
            && bounds.shortest.contains(dimensions.shortest())
            && bounds
                .length_plus_girth
                .contains(dimensions.length_plus_girth())
            && bounds.billable_weight.contains(billable_weight)
            && bounds.actual_weight.contains(actual_weight)
            && bounds.volumetric_weight.contains(volumetric_weight)
    }
}

/// 規則集 ID（如 us-2024、us-2026、eu）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSetId(String);

impl RuleSetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RuleSetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for RuleSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 規則集：某市場在某一版本下的有序分段規則
///
/// 規則由最小 / 最嚴格的分段排到最大，依序評估，第一個符合者勝出。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// 規則集 ID
    pub id: RuleSetId,

    /// 所屬市場
    pub marketplace: MarketplaceProfile,

    /// 有序分段規則
    pub rules: Vec<TierRule>,
}

impl RuleSet {
    /// 創建空的規則集
    pub fn new(id: impl Into<RuleSetId>, marketplace: MarketplaceProfile) -> Self {
        Self {
            id: id.into(),
            marketplace,
            rules: Vec::new(),
        }
    }

    /// 建構器模式：追加規則
    pub fn with_rule(mut self, rule: TierRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// 追加規則
    pub fn push_rule(&mut self, rule: TierRule) {
        self.rules.push(rule);
    }

    /// 查找分類
    pub fn category(&self, name: &str) -> Option<&SizeCategory> {
        self.rules
            .iter()
            .map(|r| &r.category)
            .find(|c| c.name == name)
    }

    /// 是否以兜底規則結尾（保證分類完整）
    pub fn is_exhaustive(&self) -> bool {
        self.rules.last().is_some_and(TierRule::is_terminal)
    }

    /// 檢查規則集是否有效
    pub fn validate(&self) -> Result<()> {
        self.marketplace.validate()?;
        if self.rules.is_empty() {
            return Err(FeeError::InvalidConfig(format!("規則集 {} 沒有任何規則", self.id)));
        }
        Ok(())
    }
}

impl From<String> for RuleSetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// 分段規則表：按規則集 ID 索引的多個獨立規則集
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierTable {
    rule_sets: HashMap<RuleSetId, RuleSet>,
}

impl TierTable {
    /// 創建空的規則表
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：加入規則集
    pub fn with_rule_set(mut self, rule_set: RuleSet) -> Self {
        self.insert(rule_set);
        self
    }

    /// 加入規則集（同 ID 會被取代）
    pub fn insert(&mut self, rule_set: RuleSet) -> Option<RuleSet> {
        self.rule_sets.insert(rule_set.id.clone(), rule_set)
    }

    /// 查找規則集
    pub fn get(&self, id: &RuleSetId) -> Result<&RuleSet> {
        self.rule_sets
            .get(id)
            .ok_or_else(|| FeeError::UnknownRuleSet(id.to_string()))
    }

    /// 所有規則集 ID（已排序）
    pub fn ids(&self) -> Vec<&RuleSetId> {
        let mut ids: Vec<_> = self.rule_sets.keys().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.rule_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }
}
