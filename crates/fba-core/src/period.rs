//! 費率時期模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 費率時期
///
/// 只作為費用表的查詢鍵，核心不做任何日曆判斷。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// 時期標籤（如 2024Q1）
    pub label: String,

    /// 生效日（含）
    pub start: Option<NaiveDate>,

    /// 失效日（不含），None 表示持續有效
    pub end: Option<NaiveDate>,
}

impl Period {
    /// 創建只有標籤的時期
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: None,
            end: None,
        }
    }

    /// 建構器模式：設置生效區間 [start, end)
    pub fn with_range(mut self, start: NaiveDate, end: Option<NaiveDate>) -> Self {
        self.start = Some(start);
        self.end = end;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// 是否沒有失效日
    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }
}

impl From<&str> for Period {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
