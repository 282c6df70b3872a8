//! 批次計算
//!
//! 以 rayon 平行計算多筆商品；單筆失敗記錄在結果中，不中斷其他商品。

use std::collections::BTreeMap;

use fba_core::{Evaluation, FeeError, ProductRecord, ResultRecord, RuleSetId};
use rayon::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculator::FeeEngine;

/// 單筆商品的計算失敗
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    pub record_id: String,
    pub error: FeeError,
}

/// 批次計算結果
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// 成功的計算結果（保持輸入順序）
    pub results: Vec<ResultRecord>,

    /// 失敗的商品
    pub failures: Vec<RecordFailure>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl BatchResult {
    /// 創建空的批次結果
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            failures: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 輸入總筆數
    pub fn total(&self) -> usize {
        self.results.len() + self.failures.len()
    }

    /// 彙總統計
    pub fn summary(&self) -> BatchSummary {
        BatchSummary::from_results(&self.results)
    }
}

/// 批次彙總統計
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// 各規則集的分類件數
    pub category_counts: BTreeMap<RuleSetId, BTreeMap<String, usize>>,

    /// 各費用欄位的平均值
    pub mean_fees: BTreeMap<String, Decimal>,
}

impl BatchSummary {
    pub fn from_results(results: &[ResultRecord]) -> Self {
        let mut category_counts: BTreeMap<RuleSetId, BTreeMap<String, usize>> = BTreeMap::new();
        let mut fee_totals: BTreeMap<String, (Decimal, u32)> = BTreeMap::new();

        for result in results {
            for c in result.classifications() {
                *category_counts
                    .entry(c.rule_set.clone())
                    .or_default()
                    .entry(c.category.name.clone())
                    .or_insert(0) += 1;
            }
            for fee in result.fees() {
                let (sum, count) = fee_totals.entry(fee.field_name()).or_insert((Decimal::ZERO, 0));
                *sum = sum.saturating_add(fee.amount);
                *count += 1;
            }
        }

        let mean_fees = fee_totals
            .into_iter()
            .map(|(field, (sum, count))| {
                let mean = sum / Decimal::from(count);
                (field, mean.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
            })
            .collect();

        Self {
            category_counts,
            mean_fees,
        }
    }

    /// 指定規則集與分類的件數
    pub fn count(&self, rule_set: &RuleSetId, category: &str) -> usize {
        self.category_counts
            .get(rule_set)
            .and_then(|counts| counts.get(category))
            .copied()
            .unwrap_or(0)
    }
}

impl FeeEngine {
    /// 批次計算
    pub fn compute_batch(&self, records: &[ProductRecord], evaluations: &[Evaluation]) -> BatchResult {
        let start_time = std::time::Instant::now();
        tracing::info!("開始批次計算：商品 {} 筆，組合 {} 個", records.len(), evaluations.len());

        let outcomes: Vec<Result<ResultRecord, RecordFailure>> = records
            .par_iter()
            .map(|record| {
                self.compute(record, evaluations).map_err(|error| {
                    tracing::warn!("商品 {} 計算失敗: {}", record.id, error);
                    RecordFailure {
                        record_id: record.id.clone(),
                        error,
                    }
                })
            })
            .collect();

        let mut batch = BatchResult::empty();
        for outcome in outcomes {
            match outcome {
                Ok(result) => batch.results.push(result),
                Err(failure) => batch.failures.push(failure),
            }
        }

        batch.calculation_time_ms = Some(start_time.elapsed().as_millis());
        tracing::info!(
            "批次計算完成：成功 {} 筆，失敗 {} 筆，耗時 {:?}",
            batch.results.len(),
            batch.failures.len(),
            start_time.elapsed()
        );

        batch
    }
}
