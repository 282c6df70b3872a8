//! 費用查詢

use fba_core::{FeeError, FeeKey, FeeService, FeeTable};
use rust_decimal::Decimal;

/// 費用查詢器
///
/// 級距採「向上歸入」：取上界 ≥ 輸入值的最小級距。
pub struct FeeLookup;

impl FeeLookup {
    /// 查詢配送費
    pub fn lookup_fee(
        fee_table: &FeeTable,
        category: &str,
        shipping_weight: Decimal,
        price: Decimal,
        period: &str,
        country: &str,
    ) -> fba_core::Result<Decimal> {
        Self::lookup_service_fee(
            fee_table,
            FeeService::Fulfillment,
            category,
            shipping_weight,
            price,
            period,
            country,
        )
    }

    /// 查詢指定類型的費用
    pub fn lookup_service_fee(
        fee_table: &FeeTable,
        service: FeeService,
        category: &str,
        shipping_weight: Decimal,
        price: Decimal,
        period: &str,
        country: &str,
    ) -> fba_core::Result<Decimal> {
        if price < Decimal::ZERO {
            return Err(FeeError::InvalidPrice(format!("價格不可為負數: {}", price)));
        }

        let key = FeeKey::new(service, country, period, category);
        let schedule = fee_table
            .schedule(&key)
            .ok_or_else(|| FeeError::FeeNotFound(format!("費用表沒有 {}", key)))?;

        let band = schedule
            .bands()
            .iter()
            .find(|band| band.upper.admits(price))
            .ok_or_else(|| {
                FeeError::FeeNotFound(format!("{}: 價格 {} 超出所有價格區間", key, price))
            })?;

        let bracket = band
            .brackets
            .iter()
            .find(|bracket| bracket.upper.admits(shipping_weight))
            .ok_or_else(|| {
                FeeError::FeeNotFound(format!(
                    "{}: 計費重量 {} 超出所有重量級距",
                    key, shipping_weight
                ))
            })?;

        let fee = bracket.amount.evaluate(shipping_weight)?;
        tracing::debug!(
            "費用查詢: {} (價格區間 {}, 重量級距 {}) => {}",
            key,
            band.upper,
            bracket.upper,
            fee
        );

        Ok(fee)
    }
}
