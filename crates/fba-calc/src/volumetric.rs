//! 體積重量計算

use fba_core::{Dimensions, FeeError, VolumetricRule};
use rust_decimal::Decimal;

/// 體積重量計算器
pub struct VolumetricCalculator;

impl VolumetricCalculator {
    /// 體積重量 = (最長邊 × 次長邊 × 最短邊) / 除數 × 乘數
    ///
    /// 邊長必須為正數，不做任何截斷；中間值溢位時回傳 `InvalidDimension`。
    pub fn volumetric_weight(
        longest: Decimal,
        median: Decimal,
        shortest: Decimal,
        rule: &VolumetricRule,
    ) -> fba_core::Result<Decimal> {
        for side in [longest, median, shortest] {
            if side <= Decimal::ZERO {
                return Err(FeeError::InvalidDimension(format!(
                    "體積重量的邊長必須為正數: {}",
                    side
                )));
            }
        }
        rule.validate()?;

        longest
            .checked_mul(median)
            .and_then(|area| area.checked_mul(shortest))
            .and_then(|volume| volume.checked_div(rule.divisor))
            .and_then(|weight| weight.checked_mul(rule.multiplier))
            .ok_or_else(|| {
                FeeError::InvalidDimension(format!(
                    "體積重量超出可計算範圍: {} × {} × {}",
                    longest, median, shortest
                ))
            })
    }

    /// 以正規化尺寸計算體積重量
    pub fn for_dimensions(dimensions: &Dimensions, rule: &VolumetricRule) -> fba_core::Result<Decimal> {
        Self::volumetric_weight(
            dimensions.longest(),
            dimensions.median(),
            dimensions.shortest(),
            rule,
        )
    }
}
