//! 費率表來源介面
//!
//! 試算表 / CSV 的讀取屬於外部環境，核心只接收已解析好的不可變結構。

use crate::fee::FeeTable;
use crate::tier::TierTable;

/// 費率表來源（表格載入器）
pub trait TableSource {
    type Error: std::error::Error;

    /// 載入分段規則表
    fn load_tier_table(&self) -> Result<TierTable, Self::Error>;

    /// 載入費用表
    fn load_fee_table(&self) -> Result<FeeTable, Self::Error>;
}

/// 記憶體內的費率表來源
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tier_table: TierTable,
    fee_table: FeeTable,
}

impl InMemorySource {
    pub fn new(tier_table: TierTable, fee_table: FeeTable) -> Self {
        Self {
            tier_table,
            fee_table,
        }
    }
}

impl TableSource for InMemorySource {
    type Error = crate::FeeError;

    fn load_tier_table(&self) -> crate::Result<TierTable> {
        Ok(self.tier_table.clone())
    }

    fn load_fee_table(&self) -> crate::Result<FeeTable> {
        Ok(self.fee_table.clone())
    }
}
