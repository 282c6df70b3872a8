//! 計算結果記錄

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::category::SizeCategory;
use crate::fee::FeeService;
use crate::tier::RuleSetId;
use crate::units::MassUnit;

/// 單一規則集下的分類結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub rule_set: RuleSetId,
    pub category: SizeCategory,
    /// 實際重量（標準單位）
    pub actual_weight: Decimal,
    /// 體積重量（標準單位）
    pub volumetric_weight: Decimal,
    /// 計費重量（標準單位）
    pub shipping_weight: Decimal,
    /// 重量單位
    pub weight_unit: MassUnit,
}

/// 單一 (規則集, 時期, 費用類型) 的費用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLine {
    pub rule_set: RuleSetId,
    pub period: String,
    pub service: FeeService,
    pub amount: Decimal,
    pub currency: String,
}

impl FeeLine {
    /// 輸出欄位名稱：<指標>_<時期>_<規則集>
    pub fn field_name(&self) -> String {
        format!("{}_{}_{}", self.service.metric_name(), self.period, self.rule_set)
    }
}

/// 輸出欄位值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{}", number),
        }
    }
}

/// 計算結果（每次計算重新建立，建立後不再修改）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    record_id: String,
    classifications: Vec<Classification>,
    fees: Vec<FeeLine>,
}

impl ResultRecord {
    pub fn new(
        record_id: impl Into<String>,
        classifications: Vec<Classification>,
        fees: Vec<FeeLine>,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            classifications,
            fees,
        }
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    pub fn classifications(&self) -> &[Classification] {
        &self.classifications
    }

    pub fn fees(&self) -> &[FeeLine] {
        &self.fees
    }

    /// 查找指定規則集的分類結果
    pub fn classification(&self, rule_set: &RuleSetId) -> Option<&Classification> {
        self.classifications.iter().find(|c| &c.rule_set == rule_set)
    }

    /// 查找指定費用
    pub fn fee(&self, rule_set: &RuleSetId, period: &str, service: FeeService) -> Option<Decimal> {
        self.fees
            .iter()
            .find(|f| &f.rule_set == rule_set && f.period == period && f.service == service)
            .map(|f| f.amount)
    }

    /// 攤平成欄位表
    ///
    /// 每個規則集輸出 size_category_<規則集>、shipping_weight_<規則集>、
    /// volumetric_weight_<規則集>；每筆費用輸出 <指標>_<時期>_<規則集>。
    pub fn fields(&self) -> BTreeMap<String, FieldValue> {
        let mut fields = BTreeMap::new();

        for c in &self.classifications {
            fields.insert(
                format!("size_category_{}", c.rule_set),
                FieldValue::Text(c.category.name.clone()),
            );
            fields.insert(
                format!("shipping_weight_{}", c.rule_set),
                FieldValue::Number(c.shipping_weight),
            );
            fields.insert(
                format!("volumetric_weight_{}", c.rule_set),
                FieldValue::Number(c.volumetric_weight),
            );
        }

        for fee in &self.fees {
            fields.insert(fee.field_name(), FieldValue::Number(fee.amount));
        }

        fields
    }
}
