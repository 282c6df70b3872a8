//! 費用表模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::{FeeError, Result};

/// 級距上界
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketBound {
    /// 含上界（≤ x）
    Inclusive(Decimal),
    /// 不含上界（< x）
    Exclusive(Decimal),
    /// 無上界
    Unbounded,
}

impl BracketBound {
    /// 檢查數值是否不超過此上界
    pub fn admits(&self, value: Decimal) -> bool {
        match *self {
            Self::Inclusive(limit) => value <= limit,
            Self::Exclusive(limit) => value < limit,
            Self::Unbounded => true,
        }
    }

    /// 上界數值
    pub fn limit(&self) -> Option<Decimal> {
        match *self {
            Self::Inclusive(limit) | Self::Exclusive(limit) => Some(limit),
            Self::Unbounded => None,
        }
    }
}

impl Ord for BracketBound {
    fn cmp(&self, other: &Self) -> Ordering {
        use BracketBound::*;
        match (self, other) {
            (Unbounded, Unbounded) => Ordering::Equal,
            (Unbounded, _) => Ordering::Greater,
            (_, Unbounded) => Ordering::Less,
            _ => {
                let rank = |b: &BracketBound| u8::from(matches!(b, Inclusive(_)));
                self.limit()
                    .cmp(&other.limit())
                    .then_with(|| rank(self).cmp(&rank(other)))
            }
        }
    }
}

impl PartialOrd for BracketBound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BracketBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inclusive(limit) => write!(f, "<={}", limit),
            Self::Exclusive(limit) => write!(f, "<{}", limit),
            Self::Unbounded => f.write_str("+inf"),
        }
    }
}

/// 費用金額：固定金額，或隨計費重量線性增加
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeAmount {
    /// 固定費用
    Fixed(Decimal),

    /// base + max(0, 重量 - threshold) × rate
    Linear {
        base: Decimal,
        threshold: Decimal,
        rate: Decimal,
        /// 超出部分按此步長無條件進位（如每半磅計費）
        step: Option<Decimal>,
    },
}

impl FeeAmount {
    /// 計算指定計費重量下的金額（未取整），溢位時回傳 `InvalidWeight`
    pub fn evaluate(&self, shipping_weight: Decimal) -> Result<Decimal> {
        match *self {
            Self::Fixed(amount) => Ok(amount),
            Self::Linear {
                base,
                threshold,
                rate,
                step,
            } => {
                let excess = shipping_weight
                    .checked_sub(threshold)
                    .map(|excess| excess.max(Decimal::ZERO));
                let excess = match step.filter(|s| *s > Decimal::ZERO) {
                    Some(step) => excess
                        .and_then(|excess| excess.checked_div(step))
                        .and_then(|steps| steps.ceil().checked_mul(step)),
                    None => excess,
                };
                excess
                    .and_then(|excess| excess.checked_mul(rate))
                    .and_then(|extra| base.checked_add(extra))
                    .ok_or_else(|| {
                        FeeError::InvalidWeight(format!("計費重量超出可計算範圍: {}", shipping_weight))
                    })
            }
        }
    }
}

/// 重量級距
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightBracket {
    pub upper: BracketBound,
    pub amount: FeeAmount,
}

/// 價格帶：同一價格區間內的重量級距（按上界排序）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    pub upper: BracketBound,
    pub brackets: Vec<WeightBracket>,
}

/// 單一 (費用類型, 國家, 時期, 分類) 的費用級距結構
///
/// 不按價格區分的市場只有一個無上界的價格帶。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    bands: Vec<PriceBand>,
}

impl FeeSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入一個級距，保持價格帶與重量級距皆按上界遞增
    pub fn insert(
        &mut self,
        price_upper: BracketBound,
        weight_upper: BracketBound,
        amount: FeeAmount,
    ) -> Result<()> {
        let band_idx = match self.bands.binary_search_by(|b| b.upper.cmp(&price_upper)) {
            Ok(idx) => idx,
            Err(idx) => {
                self.bands.insert(
                    idx,
                    PriceBand {
                        upper: price_upper,
                        brackets: Vec::new(),
                    },
                );
                idx
            }
        };

        let brackets = &mut self.bands[band_idx].brackets;
        match brackets.binary_search_by(|b| b.upper.cmp(&weight_upper)) {
            Ok(_) => Err(FeeError::InvalidConfig(format!(
                "重複的費用級距: 價格 {}，重量 {}",
                price_upper, weight_upper
            ))),
            Err(idx) => {
                brackets.insert(
                    idx,
                    WeightBracket {
                        upper: weight_upper,
                        amount,
                    },
                );
                Ok(())
            }
        }
    }

    /// 所有價格帶（按上界遞增）
    pub fn bands(&self) -> &[PriceBand] {
        &self.bands
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

/// 物流服務等級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLevel {
    /// 標準
    Standard,
    /// 加急
    Express,
}

/// 費用類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeService {
    /// 配送費
    Fulfillment,
    /// 移除費
    Removal,
    /// 多渠道配送費
    MultiChannel(ServiceLevel),
}

impl FeeService {
    /// 輸出欄位使用的指標名稱
    pub fn metric_name(&self) -> &'static str {
        match self {
            Self::Fulfillment => "fba_fee",
            Self::Removal => "removal_fee",
            Self::MultiChannel(ServiceLevel::Standard) => "multichannel_fee_standard",
            Self::MultiChannel(ServiceLevel::Express) => "multichannel_fee_express",
        }
    }
}

impl fmt::Display for FeeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.metric_name())
    }
}

/// 費用表查詢鍵
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeKey {
    pub service: FeeService,
    /// 國家代碼（大寫）
    pub country: String,
    /// 時期標籤
    pub period: String,
    /// 尺寸分類名稱
    pub category: String,
}

impl FeeKey {
    pub fn new(
        service: FeeService,
        country: &str,
        period: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            service,
            country: country.trim().to_uppercase(),
            period: period.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for FeeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / 國家={} / 時期={} / 尺寸={}",
            self.service, self.country, self.period, self.category
        )
    }
}

/// 費用表的一列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEntry {
    pub key: FeeKey,

    /// 價格帶上界（不按價格區分時為 None）
    pub price_upper: Option<BracketBound>,

    /// 重量級距上界
    pub weight_upper: BracketBound,

    pub amount: FeeAmount,
}

impl FeeEntry {
    pub fn new(key: FeeKey, weight_upper: BracketBound, amount: FeeAmount) -> Self {
        Self {
            key,
            price_upper: None,
            weight_upper,
            amount,
        }
    }

    /// 建構器模式：設置價格帶上界
    pub fn with_price_upper(mut self, price_upper: BracketBound) -> Self {
        self.price_upper = Some(price_upper);
        self
    }
}

/// 費用表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeTable {
    schedules: HashMap<FeeKey, FeeSchedule>,
}

impl FeeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由多列資料建立費用表
    pub fn from_entries(entries: impl IntoIterator<Item = FeeEntry>) -> Result<Self> {
        let mut table = Self::new();
        for entry in entries {
            table.insert_entry(entry)?;
        }
        Ok(table)
    }

    /// 加入一列資料
    pub fn insert_entry(&mut self, entry: FeeEntry) -> Result<()> {
        self.schedules.entry(entry.key).or_default().insert(
            entry.price_upper.unwrap_or(BracketBound::Unbounded),
            entry.weight_upper,
            entry.amount,
        )
    }

    /// 查找級距結構
    pub fn schedule(&self, key: &FeeKey) -> Option<&FeeSchedule> {
        self.schedules.get(key)
    }

    /// 所有時期標籤（已排序、去重）
    pub fn periods(&self) -> Vec<&str> {
        let mut periods: Vec<&str> = self.schedules.keys().map(|k| k.period.as_str()).collect();
        periods.sort_unstable();
        periods.dedup();
        periods
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}
