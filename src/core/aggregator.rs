use crate::core::{DateRange, MonthlyTotal, ReportBundle, ReportSource};
use crate::utils::error::Result;
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, TimeZone, Utc};

/// 產生往回 N 個日曆月的查詢區間，最近的月份排最前面。
/// 不含當月：i=1 是上個月。
pub fn trailing_month_ranges(today: DateTime<Utc>, look_back: usize) -> Vec<DateRange> {
    let current_month_start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap();

    let mut ranges = Vec::with_capacity(look_back);

    for i in 1..=look_back as u32 {
        let month_start = current_month_start - Months::new(i);
        let next_month_start = month_start + Months::new(1);

        let start = Utc.from_utc_datetime(&month_start.and_hms_opt(0, 0, 0).unwrap());
        let end = Utc.from_utc_datetime(&next_month_start.and_hms_opt(0, 0, 0).unwrap())
            - Duration::seconds(1);

        ranges.push(DateRange { start, end });
    }

    ranges
}

/// 對單一報表類型依序抓取每個月份並加總。
/// 區間內的抓取是循序的（受速率限制），兩種報表類型之間才並發。
pub struct StatsAggregator<S: ReportSource> {
    source: S,
}

impl<S: ReportSource> StatsAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// 任一月份抓取失敗就放棄整個彙總，不產生部分結果
    pub async fn aggregate(&self, report_name: &str, ranges: &[DateRange]) -> Result<ReportBundle> {
        let mut data = Vec::with_capacity(ranges.len());

        for range in ranges {
            let report = self.source.fetch_monthly(report_name, range).await?;

            let sum: i64 = report.data.iter().map(|point| point.y).sum();

            data.push(MonthlyTotal {
                month: range.month_label(),
                year: range.year_label(),
                sum,
            });
        }

        Ok(ReportBundle {
            name: report_name.to_string(),
            data,
        })
    }
}
