//! 包裹尺寸模型

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{FeeError, Result};

/// 正規化後的包裹尺寸
///
/// 三邊一律以 最長邊 ≥ 次長邊 ≥ 最短邊 排列，單位由所屬市場的標準單位決定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    longest: Decimal,
    median: Decimal,
    shortest: Decimal,
}

impl Dimensions {
    /// 以任意順序的三邊創建尺寸
    ///
    /// 非正值，或體積與長度加圍長超出 `Decimal` 範圍時回傳錯誤。
    pub fn new(a: Decimal, b: Decimal, c: Decimal) -> Result<Self> {
        let mut sides = [a, b, c];
        for side in sides {
            if side <= Decimal::ZERO {
                return Err(FeeError::InvalidDimension(format!(
                    "邊長必須為正數: {}",
                    side
                )));
            }
        }

        sides.sort_unstable_by(|x, y| y.cmp(x));
        let [longest, median, shortest] = sides;

        let volume = longest
            .checked_mul(median)
            .and_then(|area| area.checked_mul(shortest));
        let girth = median
            .checked_add(shortest)
            .and_then(|sum| sum.checked_mul(Decimal::TWO))
            .and_then(|twice| twice.checked_add(longest));
        if volume.is_none() || girth.is_none() {
            return Err(FeeError::InvalidDimension(format!(
                "尺寸超出可計算範圍: {} × {} × {}",
                longest, median, shortest
            )));
        }

        Ok(Self {
            longest,
            median,
            shortest,
        })
    }

    /// 最長邊
    pub fn longest(&self) -> Decimal {
        self.longest
    }

    /// 次長邊
    pub fn median(&self) -> Decimal {
        self.median
    }

    /// 最短邊
    pub fn shortest(&self) -> Decimal {
        self.shortest
    }

    /// 長度加圍長：最長邊 + 2 × (次長邊 + 最短邊)
    ///
    /// 建構時已確認不會溢位。
    pub fn length_plus_girth(&self) -> Decimal {
        self.longest + Decimal::TWO * (self.median + self.shortest)
    }

    /// 體積
    pub fn volume(&self) -> Decimal {
        self.longest * self.median * self.shortest
    }

    /// 以 [最長, 次長, 最短] 形式輸出
    pub fn to_array(&self) -> [Decimal; 3] {
        [self.longest, self.median, self.shortest]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sides_are_sorted() {
        let dims = Dimensions::new(dec!(2), dec!(10), dec!(8)).unwrap();

        assert_eq!(dims.longest(), dec!(10));
        assert_eq!(dims.median(), dec!(8));
        assert_eq!(dims.shortest(), dec!(2));
        assert_eq!(dims.to_array(), [dec!(10), dec!(8), dec!(2)]);
    }

    #[test]
    fn test_length_plus_girth() {
        let dims = Dimensions::new(dec!(59), dec!(33), dec!(33)).unwrap();

        // 59 + 2 × (33 + 33) = 191
        assert_eq!(dims.length_plus_girth(), dec!(191));
        assert_eq!(dims.volume(), dec!(64251));
    }

    #[test]
    fn test_non_positive_side_is_rejected() {
        assert!(matches!(
            Dimensions::new(dec!(10), dec!(0), dec!(2)),
            Err(FeeError::InvalidDimension(_))
        ));
        assert!(matches!(
            Dimensions::new(dec!(-1), dec!(5), dec!(2)),
            Err(FeeError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_oversized_sides_are_rejected() {
        let huge = dec!(100000000000);

        assert!(matches!(
            Dimensions::new(huge, huge, huge),
            Err(FeeError::InvalidDimension(_))
        ));
        assert!(matches!(
            Dimensions::new(Decimal::MAX, dec!(1), dec!(1)),
            Err(FeeError::InvalidDimension(_))
        ));
        assert!(Dimensions::new(huge, dec!(10), dec!(1)).is_ok());
    }
}
