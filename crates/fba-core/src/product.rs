//! 商品輸入記錄

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::Period;
use crate::tier::RuleSetId;

/// 商品記錄（單次計算的輸入，計算期間不變）
///
/// 尺寸與重量保留原始單位字串，由單位轉換器負責正規化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// 商品識別碼（如 FNSKU）
    pub id: String,

    /// 國家 / 站點代碼
    pub country: String,

    /// 售價
    pub price: Decimal,

    /// 三邊長度（任意順序）
    pub sides: [Decimal; 3],

    /// 長度單位
    pub length_unit: String,

    /// 實際重量
    pub weight: Decimal,

    /// 重量單位
    pub weight_unit: String,
}

impl ProductRecord {
    /// 創建新的商品記錄
    pub fn new(id: impl Into<String>, country: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            country: country.into(),
            price,
            sides: [Decimal::ZERO; 3],
            length_unit: String::new(),
            weight: Decimal::ZERO,
            weight_unit: String::new(),
        }
    }

    /// 建構器模式：設置三邊長度
    pub fn with_sides(
        mut self,
        a: Decimal,
        b: Decimal,
        c: Decimal,
        unit: impl Into<String>,
    ) -> Self {
        self.sides = [a, b, c];
        self.length_unit = unit.into();
        self
    }

    /// 建構器模式：設置重量
    pub fn with_weight(mut self, weight: Decimal, unit: impl Into<String>) -> Self {
        self.weight = weight;
        self.weight_unit = unit.into();
        self
    }
}

/// 計算請求中的一個 (規則集, 時期) 組合
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Evaluation {
    pub rule_set: RuleSetId,
    pub period: Period,
}

impl Evaluation {
    pub fn new(rule_set: impl Into<RuleSetId>, period: impl Into<Period>) -> Self {
        Self {
            rule_set: rule_set.into(),
            period: period.into(),
        }
    }

    /// 多個時期 × 多個規則集的全部組合（規則集在外層）
    pub fn cross(rule_sets: &[&str], periods: &[&str]) -> Vec<Self> {
        rule_sets
            .iter()
            .flat_map(|rs| periods.iter().map(move |p| Self::new(*rs, *p)))
            .collect()
    }
}
