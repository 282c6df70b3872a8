//! 分段規則表與費用表的 CSV 格式
//!
//! 分段規則：`rule_set,marketplace,category,weight_policy,longest,median,shortest,
//! length_plus_girth,billable_weight,actual_weight,volumetric_weight`，
//! 同一規則集的列依檔案順序由小到大排列，邊界欄位空白代表無界。
//!
//! 費用：`service,country,period,category,price,weight,fee`，
//! `service` 與 `price` 可省略（預設為配送費、不分價格）。

use std::fs;
use std::io::Read;
use std::path::Path;

use fba_core::{
    FeeEntry, FeeKey, FeeService, FeeTable, MarketplaceProfile, RuleSet, ServiceLevel,
    SizeCategory, TableSource, TierBounds, TierRule, TierTable, WeightPolicy,
};
use serde::Deserialize;

use crate::amount::parse_amount;
use crate::bracket::{parse_interval, parse_upper_bound};
use crate::{csv_reader, require_columns, LoadError, Result};

#[derive(Debug, Deserialize)]
struct TierRow {
    rule_set: String,
    marketplace: String,
    category: String,
    weight_policy: WeightPolicy,
    #[serde(default)]
    longest: String,
    #[serde(default)]
    median: String,
    #[serde(default)]
    shortest: String,
    #[serde(default)]
    length_plus_girth: String,
    #[serde(default)]
    billable_weight: String,
    #[serde(default)]
    actual_weight: String,
    #[serde(default)]
    volumetric_weight: String,
}

impl TierRow {
    fn bounds(&self) -> std::result::Result<TierBounds, String> {
        Ok(TierBounds {
            longest: parse_interval(&self.longest)?,
            median: parse_interval(&self.median)?,
            shortest: parse_interval(&self.shortest)?,
            length_plus_girth: parse_interval(&self.length_plus_girth)?,
            billable_weight: parse_interval(&self.billable_weight)?,
            actual_weight: parse_interval(&self.actual_weight)?,
            volumetric_weight: parse_interval(&self.volumetric_weight)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct FeeRow {
    #[serde(default)]
    service: String,
    country: String,
    period: String,
    category: String,
    #[serde(default)]
    price: String,
    weight: String,
    fee: String,
}

fn marketplace(code: &str) -> Option<MarketplaceProfile> {
    match code.trim().to_lowercase().as_str() {
        "us" => Some(MarketplaceProfile::us()),
        "eu" => Some(MarketplaceProfile::eu()),
        _ => None,
    }
}

fn parse_service(raw: &str) -> Option<FeeService> {
    match raw.trim().to_lowercase().as_str() {
        "" | "fulfillment" | "fba" | "fba_fee" => Some(FeeService::Fulfillment),
        "removal" | "removal_fee" => Some(FeeService::Removal),
        "multichannel_standard" | "mcf_standard" => {
            Some(FeeService::MultiChannel(ServiceLevel::Standard))
        }
        "multichannel_express" | "mcf_express" => {
            Some(FeeService::MultiChannel(ServiceLevel::Express))
        }
        _ => None,
    }
}

/// 讀取分段規則表
pub fn read_tier_table<R: Read>(reader: R) -> Result<TierTable> {
    let mut rdr = csv_reader(reader);
    require_columns(&mut rdr, &["rule_set", "marketplace", "category", "weight_policy"])?;

    let mut rule_sets: Vec<RuleSet> = Vec::new();
    for (idx, row) in rdr.deserialize::<TierRow>().enumerate() {
        let line = idx + 2;
        let row = row?;

        let profile = marketplace(&row.marketplace)
            .ok_or_else(|| LoadError::row(line, format!("未知的市場 '{}'", row.marketplace)))?;
        let bounds = row.bounds().map_err(|message| LoadError::row(line, message))?;
        let rule = TierRule::new(SizeCategory::new(row.category.clone(), row.weight_policy), bounds);

        match rule_sets.iter_mut().find(|rs| rs.id.as_str() == row.rule_set) {
            Some(rule_set) if rule_set.marketplace.code != profile.code => {
                return Err(LoadError::row(
                    line,
                    format!("規則集 {} 的市場不一致: {}", row.rule_set, row.marketplace),
                ));
            }
            Some(rule_set) => rule_set.push_rule(rule),
            None => rule_sets.push(RuleSet::new(row.rule_set.clone(), profile).with_rule(rule)),
        }
    }

    let mut table = TierTable::new();
    for rule_set in rule_sets {
        rule_set.validate()?;
        if !rule_set.is_exhaustive() {
            tracing::warn!("規則集 {} 沒有兜底規則，可能出現無法分類的商品", rule_set.id);
        }
        tracing::debug!("載入規則集 {}: {} 條規則", rule_set.id, rule_set.rules.len());
        table.insert(rule_set);
    }

    tracing::info!("分段規則表載入完成：規則集 {} 個", table.len());
    Ok(table)
}

/// 讀取費用表
pub fn read_fee_table<R: Read>(reader: R) -> Result<FeeTable> {
    let mut rdr = csv_reader(reader);
    require_columns(&mut rdr, &["country", "period", "category", "weight", "fee"])?;

    let mut table = FeeTable::new();
    let mut rows = 0usize;
    for (idx, row) in rdr.deserialize::<FeeRow>().enumerate() {
        let line = idx + 2;
        let row = row?;

        let service = parse_service(&row.service)
            .ok_or_else(|| LoadError::row(line, format!("未知的費用類型 '{}'", row.service)))?;
        let weight_upper =
            parse_upper_bound(&row.weight).map_err(|message| LoadError::row(line, message))?;
        let amount = parse_amount(&row.fee).map_err(|message| LoadError::row(line, message))?;

        let mut entry = FeeEntry::new(
            FeeKey::new(service, &row.country, row.period.clone(), row.category.clone()),
            weight_upper,
            amount,
        );
        if !row.price.trim().is_empty() {
            let price_upper =
                parse_upper_bound(&row.price).map_err(|message| LoadError::row(line, message))?;
            entry = entry.with_price_upper(price_upper);
        }

        table
            .insert_entry(entry)
            .map_err(|e| LoadError::row(line, e.to_string()))?;
        rows += 1;
    }

    tracing::info!("費用表載入完成：{} 列，級距結構 {} 個", rows, table.len());
    Ok(table)
}

/// CSV 費率表來源
///
/// 內容在建立時讀入記憶體，之後每次載入都重新解析同一份文字。
#[derive(Debug, Clone)]
pub struct CsvTableSource {
    tier_csv: String,
    fee_csv: String,
}

impl CsvTableSource {
    /// 從 CSV 文字創建
    pub fn from_strings(tier_csv: impl Into<String>, fee_csv: impl Into<String>) -> Self {
        Self {
            tier_csv: tier_csv.into(),
            fee_csv: fee_csv.into(),
        }
    }

    /// 從檔案路徑創建
    pub fn from_paths(tier_path: impl AsRef<Path>, fee_path: impl AsRef<Path>) -> Result<Self> {
        let tier_csv = fs::read_to_string(tier_path)?;
        let fee_csv = fs::read_to_string(fee_path)?;
        Ok(Self::from_strings(tier_csv, fee_csv))
    }
}

impl TableSource for CsvTableSource {
    type Error = LoadError;

    fn load_tier_table(&self) -> Result<TierTable> {
        read_tier_table(self.tier_csv.as_bytes())
    }

    fn load_fee_table(&self) -> Result<FeeTable> {
        read_fee_table(self.fee_csv.as_bytes())
    }
}
