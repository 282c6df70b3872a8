//! 長度與重量單位

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{FeeError, Result};

/// 長度單位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    /// 英寸
    Inch,
    /// 公分
    Centimeter,
    /// 公釐
    Millimeter,
    /// 公尺
    Meter,
}

impl LengthUnit {
    /// 解析單位字串（不分大小寫，接受常見同義詞）
    pub fn parse(token: &str) -> Result<Self> {
        match token.trim().to_lowercase().as_str() {
            "inches" | "inch" | "in" => Ok(Self::Inch),
            "centimeters" | "centimeter" | "cm" => Ok(Self::Centimeter),
            "millimeters" | "millimeter" | "mm" => Ok(Self::Millimeter),
            "meters" | "meter" | "m" => Ok(Self::Meter),
            _ => Err(FeeError::UnsupportedUnit(token.to_string())),
        }
    }

    /// 每單位等於多少公分
    pub fn centimeters_per_unit(self) -> Decimal {
        match self {
            Self::Inch => Decimal::new(254, 2),
            Self::Centimeter => Decimal::ONE,
            Self::Millimeter => Decimal::new(1, 1),
            Self::Meter => Decimal::from(100),
        }
    }

    /// 單位符號
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Inch => "in",
            Self::Centimeter => "cm",
            Self::Millimeter => "mm",
            Self::Meter => "m",
        }
    }
}

impl FromStr for LengthUnit {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// 重量單位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassUnit {
    /// 磅
    Pound,
    /// 盎司
    Ounce,
    /// 克
    Gram,
    /// 公斤
    Kilogram,
}

impl MassUnit {
    /// 解析單位字串（不分大小寫，接受常見同義詞）
    pub fn parse(token: &str) -> Result<Self> {
        match token.trim().to_lowercase().as_str() {
            "pounds" | "pound" | "lbs" | "lb" => Ok(Self::Pound),
            "ounces" | "ounce" | "oz" => Ok(Self::Ounce),
            "grams" | "gram" | "g" => Ok(Self::Gram),
            "kilograms" | "kilogram" | "kg" => Ok(Self::Kilogram),
            _ => Err(FeeError::UnsupportedUnit(token.to_string())),
        }
    }

    /// 每單位等於多少磅
    ///
    /// 1 克 = 0.00220462 磅，1 磅 = 16 盎司
    pub fn pounds_per_unit(self) -> Decimal {
        match self {
            Self::Pound => Decimal::ONE,
            Self::Ounce => Decimal::new(625, 4),
            Self::Gram => Decimal::new(220462, 8),
            Self::Kilogram => Decimal::new(220462, 5),
        }
    }

    /// 單位符號
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Pound => "lb",
            Self::Ounce => "oz",
            Self::Gram => "g",
            Self::Kilogram => "kg",
        }
    }
}

impl FromStr for MassUnit {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// 市場的標準單位制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSystem {
    /// 標準長度單位
    pub length: LengthUnit,

    /// 標準重量單位
    pub mass: MassUnit,
}

impl UnitSystem {
    /// 創建新的單位制
    pub fn new(length: LengthUnit, mass: MassUnit) -> Self {
        Self { length, mass }
    }

    /// 英制（英寸 / 磅）
    pub fn imperial() -> Self {
        Self::new(LengthUnit::Inch, MassUnit::Pound)
    }

    /// 公制（公分 / 克）
    pub fn metric() -> Self {
        Self::new(LengthUnit::Centimeter, MassUnit::Gram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("inches", LengthUnit::Inch)]
    #[case("IN", LengthUnit::Inch)]
    #[case(" Centimeters ", LengthUnit::Centimeter)]
    #[case("cm", LengthUnit::Centimeter)]
    #[case("mm", LengthUnit::Millimeter)]
    #[case("Meter", LengthUnit::Meter)]
    fn test_parse_length_unit(#[case] token: &str, #[case] expected: LengthUnit) {
        assert_eq!(LengthUnit::parse(token).unwrap(), expected);
    }

    #[rstest]
    #[case("pounds", MassUnit::Pound)]
    #[case("LBS", MassUnit::Pound)]
    #[case("oz", MassUnit::Ounce)]
    #[case("Grams", MassUnit::Gram)]
    #[case("g", MassUnit::Gram)]
    #[case("kilograms", MassUnit::Kilogram)]
    fn test_parse_mass_unit(#[case] token: &str, #[case] expected: MassUnit) {
        assert_eq!(token.parse::<MassUnit>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_unit_token() {
        assert_eq!(
            MassUnit::parse("stone"),
            Err(FeeError::UnsupportedUnit("stone".to_string()))
        );
        assert!(LengthUnit::parse("furlong").is_err());
        assert!(LengthUnit::parse("").is_err());
    }

    #[test]
    fn test_kilogram_factor_matches_gram_factor() {
        assert_eq!(
            MassUnit::Kilogram.pounds_per_unit(),
            MassUnit::Gram.pounds_per_unit() * Decimal::from(1000)
        );
    }
}
