//! 市場與引擎配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fee::FeeService;
use crate::units::UnitSystem;
use crate::{FeeError, Result};

/// 體積重量規則：(長 × 寬 × 高) / 除數 × 乘數
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumetricRule {
    /// 體積除數（如美國 139、歐洲 5000）
    pub divisor: Decimal,

    /// 結果乘數（歐洲將公斤換算為克時為 1000）
    pub multiplier: Decimal,
}

impl VolumetricRule {
    /// 創建新的體積重量規則（乘數預設為 1）
    pub fn new(divisor: Decimal) -> Self {
        Self {
            divisor,
            multiplier: Decimal::ONE,
        }
    }

    /// 建構器模式：設置乘數
    pub fn with_multiplier(mut self, multiplier: Decimal) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// 檢查規則是否有效
    pub fn validate(&self) -> Result<()> {
        if self.divisor <= Decimal::ZERO {
            return Err(FeeError::InvalidConfig(format!(
                "體積除數必須為正數: {}",
                self.divisor
            )));
        }
        if self.multiplier <= Decimal::ZERO {
            return Err(FeeError::InvalidConfig(format!(
                "體積乘數必須為正數: {}",
                self.multiplier
            )));
        }
        Ok(())
    }
}

/// 市場配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceProfile {
    /// 市場代碼（如 US、EU）
    pub code: String,

    /// 標準單位制
    pub units: UnitSystem,

    /// 體積重量規則
    pub volumetric: VolumetricRule,

    /// 幣別
    pub currency: String,

    /// 此市場服務的國家代碼
    pub countries: Vec<String>,
}

impl MarketplaceProfile {
    /// 創建新的市場配置
    pub fn new(
        code: impl Into<String>,
        units: UnitSystem,
        volumetric: VolumetricRule,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            units,
            volumetric,
            currency: currency.into(),
            countries: Vec::new(),
        }
    }

    /// 美國站：英寸 / 磅，除數 139
    pub fn us() -> Self {
        Self::new(
            "US",
            UnitSystem::imperial(),
            VolumetricRule::new(Decimal::from(139)),
            "USD",
        )
        .with_countries(vec!["US".to_string()])
    }

    /// 歐洲站：公分 / 克，除數 5000 再乘 1000
    pub fn eu() -> Self {
        Self::new(
            "EU",
            UnitSystem::metric(),
            VolumetricRule::new(Decimal::from(5000)).with_multiplier(Decimal::from(1000)),
            "EUR",
        )
        .with_countries(vec!["GB".to_string(), "DE".to_string()])
    }

    /// 建構器模式：設置服務國家
    pub fn with_countries(mut self, countries: Vec<String>) -> Self {
        self.countries = countries;
        self
    }

    /// 建構器模式：設置幣別
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// 檢查是否服務指定國家（不分大小寫）
    pub fn serves(&self, country: &str) -> bool {
        self.countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country.trim()))
    }

    /// 預設國家（第一個服務國家）
    pub fn default_country(&self) -> Option<&str> {
        self.countries.first().map(String::as_str)
    }

    /// 檢查配置是否有效
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(FeeError::InvalidConfig("市場代碼不可為空".to_string()));
        }
        self.volumetric.validate()
    }
}

/// 費用引擎配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 重量輸出的小數位數
    pub weight_scale: u32,

    /// 費用輸出的小數位數
    pub fee_scale: u32,

    /// 配送費以外需要額外計算的費用
    pub extra_services: Vec<FeeService>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weight_scale: 3,
            fee_scale: 2,
            extra_services: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// 從 JSON 字串讀取配置
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| FeeError::InvalidConfig(e.to_string()))
    }

    /// 建構器模式：設置重量小數位數
    pub fn with_weight_scale(mut self, scale: u32) -> Self {
        self.weight_scale = scale;
        self
    }

    /// 建構器模式：設置費用小數位數
    pub fn with_fee_scale(mut self, scale: u32) -> Self {
        self.fee_scale = scale;
        self
    }

    /// 建構器模式：添加額外費用
    pub fn with_extra_service(mut self, service: FeeService) -> Self {
        if !self.extra_services.contains(&service) {
            self.extra_services.push(service);
        }
        self
    }

    /// 需要計算的全部費用（配送費在前）
    pub fn services(&self) -> Vec<FeeService> {
        let mut services = vec![FeeService::Fulfillment];
        for service in &self.extra_services {
            if !services.contains(service) {
                services.push(*service);
            }
        }
        services
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee::ServiceLevel;
    use crate::units::{LengthUnit, MassUnit};
    use rust_decimal_macros::dec;

    #[test]
    fn test_marketplace_presets() {
        let us = MarketplaceProfile::us();
        assert_eq!(us.units.length, LengthUnit::Inch);
        assert_eq!(us.units.mass, MassUnit::Pound);
        assert_eq!(us.volumetric.divisor, dec!(139));
        assert_eq!(us.volumetric.multiplier, dec!(1));
        assert!(us.serves("us"));

        let eu = MarketplaceProfile::eu();
        assert_eq!(eu.units.mass, MassUnit::Gram);
        assert_eq!(eu.volumetric.multiplier, dec!(1000));
        assert!(eu.serves("DE"));
        assert!(!eu.serves("US"));
        assert_eq!(eu.default_country(), Some("GB"));
    }

    #[test]
    fn test_invalid_volumetric_rule() {
        let rule = VolumetricRule::new(Decimal::ZERO);
        assert!(matches!(rule.validate(), Err(FeeError::InvalidConfig(_))));

        let profile = MarketplaceProfile::us().with_currency("USD");
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_engine_config_builder() {
        let config = EngineConfig::default()
            .with_fee_scale(4)
            .with_extra_service(FeeService::Removal)
            .with_extra_service(FeeService::Removal)
            .with_extra_service(FeeService::Fulfillment);

        assert_eq!(config.fee_scale, 4);
        assert_eq!(config.weight_scale, 3);
        assert_eq!(
            config.services(),
            vec![FeeService::Fulfillment, FeeService::Removal]
        );
    }

    #[test]
    fn test_engine_config_from_json() {
        let config = EngineConfig::from_json(
            r#"{ "fee_scale": 2, "extra_services": ["removal", { "multi_channel": "express" }] }"#,
        )
        .unwrap();

        assert_eq!(config.weight_scale, 3);
        assert_eq!(
            config.extra_services,
            vec![
                FeeService::Removal,
                FeeService::MultiChannel(ServiceLevel::Express)
            ]
        );

        assert!(matches!(
            EngineConfig::from_json("{ not json"),
            Err(FeeError::InvalidConfig(_))
        ));
    }
}
