//! # FBA Table Loader
//!
//! 從 CSV 讀取分段規則表、費用表與商品清單

pub mod amount;
pub mod bracket;
pub mod products;
pub mod tables;

pub use products::read_products;
pub use tables::{read_fee_table, read_tier_table, CsvTableSource};

use fba_core::FeeError;

/// 載入錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("讀取檔案失敗: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 格式錯誤: {0}")]
    Csv(#[from] csv::Error),

    #[error("第 {line} 列資料無效: {message}")]
    InvalidRow { line: usize, message: String },

    #[error("缺少欄位: {0}")]
    MissingColumn(String),

    #[error(transparent)]
    Core(#[from] FeeError),
}

impl LoadError {
    pub(crate) fn row(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidRow {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// 建立與匯入工具一致的 CSV 讀取器（含標題列、去除空白、允許欄數不一）
pub(crate) fn csv_reader<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// 檢查必要欄位
pub(crate) fn require_columns<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    columns: &[&str],
) -> Result<()> {
    let headers = reader.headers()?;
    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(LoadError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}
