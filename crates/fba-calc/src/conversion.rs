//! 單位轉換

use fba_core::{Dimensions, FeeError, LengthUnit, MassUnit, UnitSystem};
use rust_decimal::Decimal;

/// 單位轉換器
///
/// 標準單位由市場配置決定（美國：英寸 / 磅，歐洲：公分 / 克）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitConverter {
    system: UnitSystem,
}

impl UnitConverter {
    /// 以指定單位制創建轉換器
    pub fn new(system: UnitSystem) -> Self {
        Self { system }
    }

    /// 標準單位制
    pub fn system(&self) -> UnitSystem {
        self.system
    }

    /// 長度單位換算，溢位時回傳 `InvalidDimension`
    pub fn convert_length(
        value: Decimal,
        from: LengthUnit,
        to: LengthUnit,
    ) -> fba_core::Result<Decimal> {
        if from == to {
            return Ok(value);
        }
        value
            .checked_mul(from.centimeters_per_unit())
            .and_then(|cm| cm.checked_div(to.centimeters_per_unit()))
            .ok_or_else(|| FeeError::InvalidDimension(format!("長度超出可換算範圍: {}", value)))
    }

    /// 重量單位換算，溢位時回傳 `InvalidWeight`
    pub fn convert_mass(value: Decimal, from: MassUnit, to: MassUnit) -> fba_core::Result<Decimal> {
        if from == to {
            return Ok(value);
        }
        value
            .checked_mul(from.pounds_per_unit())
            .and_then(|lb| lb.checked_div(to.pounds_per_unit()))
            .ok_or_else(|| FeeError::InvalidWeight(format!("重量超出可換算範圍: {}", value)))
    }

    /// 轉換為標準長度單位
    pub fn to_canonical_length(&self, value: Decimal, from_unit: &str) -> fba_core::Result<Decimal> {
        let from = LengthUnit::parse(from_unit)?;
        Self::convert_length(value, from, self.system.length)
    }

    /// 轉換為標準重量單位
    pub fn to_canonical_mass(&self, value: Decimal, from_unit: &str) -> fba_core::Result<Decimal> {
        let from = MassUnit::parse(from_unit)?;
        Self::convert_mass(value, from, self.system.mass)
    }

    /// 由標準長度單位轉出
    pub fn from_canonical_length(&self, value: Decimal, to_unit: &str) -> fba_core::Result<Decimal> {
        let to = LengthUnit::parse(to_unit)?;
        Self::convert_length(value, self.system.length, to)
    }

    /// 由標準重量單位轉出
    pub fn from_canonical_mass(&self, value: Decimal, to_unit: &str) -> fba_core::Result<Decimal> {
        let to = MassUnit::parse(to_unit)?;
        Self::convert_mass(value, self.system.mass, to)
    }

    /// 三邊轉為標準單位並排序
    ///
    /// 單位無法識別時不做任何部分轉換，直接回傳錯誤。
    pub fn normalize_dimensions(
        &self,
        sides: &[Decimal; 3],
        unit: &str,
    ) -> fba_core::Result<Dimensions> {
        let from = LengthUnit::parse(unit)?;
        let mut converted = [Decimal::ZERO; 3];
        for (slot, side) in converted.iter_mut().zip(sides) {
            *slot = Self::convert_length(*side, from, self.system.length)?;
        }
        let [a, b, c] = converted;
        Dimensions::new(a, b, c)
    }

    /// 重量轉為標準單位，並檢查為正數
    pub fn normalize_weight(&self, value: Decimal, unit: &str) -> fba_core::Result<Decimal> {
        let weight = self.to_canonical_mass(value, unit)?;
        if weight <= Decimal::ZERO {
            return Err(FeeError::InvalidWeight(format!("重量必須為正數: {} {}", value, unit)));
        }
        Ok(weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(2.54), "cm", dec!(1))]
    #[case(dec!(25.4), "millimeters", dec!(1))]
    #[case(dec!(10), "inches", dec!(10))]
    #[case(dec!(0.0254), "m", dec!(1))]
    fn test_to_canonical_inches(#[case] value: Decimal, #[case] unit: &str, #[case] expected: Decimal) {
        let converter = UnitConverter::new(UnitSystem::imperial());
        assert_eq!(converter.to_canonical_length(value, unit).unwrap(), expected);
    }

    #[test]
    fn test_to_canonical_grams() {
        let converter = UnitConverter::new(UnitSystem::metric());

        assert_eq!(converter.to_canonical_mass(dec!(1.5), "kg").unwrap(), dec!(1500));
        assert_eq!(converter.to_canonical_mass(dec!(1500), "Grams").unwrap(), dec!(1500));
        assert_eq!(converter.to_canonical_length(dec!(1), "in").unwrap(), dec!(2.54));
    }

    #[test]
    fn test_grams_to_pounds() {
        let converter = UnitConverter::new(UnitSystem::imperial());

        assert_eq!(
            converter.to_canonical_mass(dec!(1000), "grams").unwrap(),
            dec!(2.20462)
        );
        assert_eq!(converter.to_canonical_mass(dec!(16), "oz").unwrap(), dec!(1));
    }

    #[test]
    fn test_inverse_conversion() {
        let converter = UnitConverter::new(UnitSystem::imperial());

        assert_eq!(converter.from_canonical_length(dec!(1), "cm").unwrap(), dec!(2.54));
        assert_eq!(converter.from_canonical_mass(dec!(2), "oz").unwrap(), dec!(32));
    }

    #[test]
    fn test_unknown_unit_performs_no_conversion() {
        let converter = UnitConverter::new(UnitSystem::metric());

        assert_eq!(
            converter.to_canonical_mass(dec!(3), "stone"),
            Err(FeeError::UnsupportedUnit("stone".to_string()))
        );
        assert!(matches!(
            converter.normalize_dimensions(&[dec!(1), dec!(2), dec!(3)], "cubits"),
            Err(FeeError::UnsupportedUnit(_))
        ));
    }

    #[test]
    fn test_normalize_dimensions_sorts_sides() {
        let converter = UnitConverter::new(UnitSystem::imperial());
        let dims = converter
            .normalize_dimensions(&[dec!(5.08), dec!(25.4), dec!(20.32)], "centimeters")
            .unwrap();

        assert_eq!(dims.to_array(), [dec!(10), dec!(8), dec!(2)]);
    }

    #[test]
    fn test_conversion_overflow_is_an_error() {
        let metric = UnitConverter::new(UnitSystem::metric());

        assert!(matches!(
            metric.normalize_dimensions(&[Decimal::MAX, dec!(1), dec!(1)], "in"),
            Err(FeeError::InvalidDimension(_))
        ));
        assert!(matches!(
            metric.normalize_weight(Decimal::MAX, "lb"),
            Err(FeeError::InvalidWeight(_))
        ));
    }

    #[test]
    fn test_normalize_weight_rejects_zero() {
        let converter = UnitConverter::new(UnitSystem::imperial());

        assert!(matches!(
            converter.normalize_weight(Decimal::ZERO, "lb"),
            Err(FeeError::InvalidWeight(_))
        ));
        assert_eq!(converter.normalize_weight(dec!(1.5), "lb").unwrap(), dec!(1.5));
    }
}
