//! 費用引擎主計算器

use fba_core::{
    Classification, EngineConfig, Evaluation, FeeError, FeeLine, FeeTable, ProductRecord,
    ResultRecord, RuleSet, RuleSetId, TableSource, TierTable,
};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::classifier::Classifier;
use crate::conversion::UnitConverter;
use crate::fee_lookup::FeeLookup;
use crate::shipping_weight::ShippingWeightResolver;
use crate::volumetric::VolumetricCalculator;

/// 費用引擎
///
/// 分段規則表與費用表在引擎存續期間唯讀，多執行緒共用引擎不需要加鎖。
pub struct FeeEngine {
    /// 分段規則表
    tier_table: TierTable,

    /// 費用表
    fee_table: FeeTable,

    /// 引擎配置
    config: EngineConfig,
}

impl FeeEngine {
    /// 創建新的費用引擎
    pub fn new(tier_table: TierTable, fee_table: FeeTable, config: EngineConfig) -> Self {
        Self {
            tier_table,
            fee_table,
            config,
        }
    }

    /// 從費率表來源載入並創建引擎
    pub fn from_source<S: TableSource>(
        source: &S,
        config: EngineConfig,
    ) -> Result<Self, S::Error> {
        let tables = source
            .load_tier_table()
            .and_then(|tier_table| Ok((tier_table, source.load_fee_table()?)));
        let (tier_table, fee_table) = match tables {
            Ok(tables) => tables,
            Err(e) => {
                tracing::warn!("費率表載入失敗: {}", e);
                return Err(e);
            }
        };
        tracing::info!(
            "費率表載入完成：規則集 {} 個，費用級距結構 {} 個",
            tier_table.len(),
            fee_table.len()
        );
        Ok(Self::new(tier_table, fee_table, config))
    }

    /// 單筆商品計算入口
    ///
    /// 依請求的 (規則集, 時期) 組合計算分類、計費重量與費用。
    /// 任一步驟失敗即回傳錯誤，不會以預設值代替。
    pub fn compute(
        &self,
        record: &ProductRecord,
        evaluations: &[Evaluation],
    ) -> fba_core::Result<ResultRecord> {
        tracing::debug!(
            "開始計算商品 {}：組合 {} 個",
            record.id,
            evaluations.len()
        );

        if record.price < Decimal::ZERO {
            return Err(FeeError::InvalidPrice(format!(
                "商品 {} 價格不可為負數: {}",
                record.id, record.price
            )));
        }

        let mut classifications: Vec<Classification> = Vec::new();
        let mut fees = Vec::new();

        for evaluation in evaluations {
            let rule_set = self.tier_table.get(&evaluation.rule_set)?;

            // 同一規則集只分類一次
            let classification = match classifications
                .iter()
                .position(|c| c.rule_set == evaluation.rule_set)
            {
                Some(idx) => idx,
                None => {
                    classifications.push(self.classify_with(record, rule_set)?);
                    classifications.len() - 1
                }
            };
            let classification = &classifications[classification];

            let country = Self::resolve_country(record, rule_set)?;
            for service in self.config.services() {
                let fee = FeeLookup::lookup_service_fee(
                    &self.fee_table,
                    service,
                    &classification.category.name,
                    classification.shipping_weight,
                    record.price,
                    evaluation.period.label(),
                    &country,
                )?;

                fees.push(FeeLine {
                    rule_set: evaluation.rule_set.clone(),
                    period: evaluation.period.label().to_string(),
                    service,
                    amount: self.round_fee(fee),
                    currency: rule_set.marketplace.currency.clone(),
                });
            }
        }

        let classifications = classifications
            .into_iter()
            .map(|c| self.round_weights(c))
            .collect();

        Ok(ResultRecord::new(record.id.clone(), classifications, fees))
    }

    /// 只做分類與計費重量（不查費用）
    pub fn classify(
        &self,
        record: &ProductRecord,
        rule_set_id: &RuleSetId,
    ) -> fba_core::Result<Classification> {
        let rule_set = self.tier_table.get(rule_set_id)?;
        self.classify_with(record, rule_set).map(|c| self.round_weights(c))
    }

    /// 正規化 → 體積重量 → 分類 → 計費重量（全精度）
    fn classify_with(
        &self,
        record: &ProductRecord,
        rule_set: &RuleSet,
    ) -> fba_core::Result<Classification> {
        let marketplace = &rule_set.marketplace;
        let converter = UnitConverter::new(marketplace.units);

        // Step 1: 單位正規化
        let dimensions = converter.normalize_dimensions(&record.sides, &record.length_unit)?;
        let actual_weight = converter.normalize_weight(record.weight, &record.weight_unit)?;

        // Step 2: 體積重量
        let volumetric_weight =
            VolumetricCalculator::for_dimensions(&dimensions, &marketplace.volumetric)?;

        // Step 3: 分類
        let category =
            Classifier::classify_with(rule_set, &dimensions, actual_weight, volumetric_weight)?;

        // Step 4: 計費重量
        let shipping_weight =
            ShippingWeightResolver::resolve(category, actual_weight, volumetric_weight);

        tracing::debug!(
            "商品 {} 規則集 {}: 分類 {}, 實際 {}, 體積 {}, 計費 {} {}",
            record.id,
            rule_set.id,
            category,
            actual_weight,
            volumetric_weight,
            shipping_weight,
            marketplace.units.mass
        );

        Ok(Classification {
            rule_set: rule_set.id.clone(),
            category: category.clone(),
            actual_weight,
            volumetric_weight,
            shipping_weight,
            weight_unit: marketplace.units.mass,
        })
    }

    /// 決定費用查詢的國家：記錄未填時使用市場預設國家
    ///
    /// 指定的國家必須由規則集所屬市場服務，否則回傳 `UnsupportedCountry`。
    fn resolve_country(record: &ProductRecord, rule_set: &RuleSet) -> fba_core::Result<String> {
        let country = record.country.trim();
        if !country.is_empty() {
            if !rule_set.marketplace.serves(country) {
                return Err(FeeError::UnsupportedCountry(format!(
                    "商品 {} 的國家 {} 不在市場 {} 的服務範圍 ({})",
                    record.id,
                    country,
                    rule_set.marketplace.code,
                    rule_set.marketplace.countries.join(", ")
                )));
            }
            return Ok(country.to_uppercase());
        }
        rule_set
            .marketplace
            .default_country()
            .map(str::to_string)
            .ok_or_else(|| {
                FeeError::InvalidConfig(format!(
                    "商品 {} 未指定國家，且市場 {} 沒有預設國家",
                    record.id, rule_set.marketplace.code
                ))
            })
    }

    fn round_fee(&self, fee: Decimal) -> Decimal {
        fee.round_dp_with_strategy(self.config.fee_scale, RoundingStrategy::MidpointAwayFromZero)
    }

    fn round_weights(&self, mut classification: Classification) -> Classification {
        let scale = self.config.weight_scale;
        let round = |w: Decimal| w.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
        classification.actual_weight = round(classification.actual_weight);
        classification.volumetric_weight = round(classification.volumetric_weight);
        classification.shipping_weight = round(classification.shipping_weight);
        classification
    }

    /// 獲取分段規則表引用
    pub fn tier_table(&self) -> &TierTable {
        &self.tier_table
    }

    /// 獲取費用表引用
    pub fn fee_table(&self) -> &FeeTable {
        &self.fee_table
    }

    /// 獲取引擎配置引用
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
