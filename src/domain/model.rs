use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 一個日曆月的查詢區間（UTC）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// 月份標籤取自區間的結束日期，例如 "Mar"
    pub fn month_label(&self) -> String {
        self.end.format("%b").to_string()
    }

    pub fn year_label(&self) -> String {
        self.end.format("%Y").to_string()
    }
}

/// 報表資料序列中的一個點。`y` 永遠是整數計數（貼文數、註冊數）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: String,
    pub y: i64,
}

/// 管理後台 API 回傳的單一報表物件
#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub data: Vec<DataPoint>,
    pub start_date: Option<String>,
    pub prev_start_date: Option<String>,
}

/// `/admin/reports/bulk` 的回應外殼。`error_type` 是唯一的錯誤分類機制
#[derive(Debug, Clone, Deserialize)]
pub struct BulkReportsResponse {
    #[serde(default)]
    pub reports: Vec<Report>,
    pub error_type: Option<String>,
}

/// 彙總後的單月紀錄，欄位順序即 CSV 欄位順序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: String,
    pub year: String,
    pub sum: i64,
}

/// 一種報表（posts 或 signups）的完整彙總結果，最近的月份排最前面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBundle {
    pub name: String,
    pub data: Vec<MonthlyTotal>,
}

/// 待寄出的郵件內容，與 SMTP 傳輸解耦
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<PathBuf>,
}
