use crate::core::aggregator::{trailing_month_ranges, StatsAggregator};
use crate::core::report_csv::write_bundle;
use crate::core::ReportSource;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// 每次執行都抓這兩種報表
pub const REPORT_NAMES: [&str; 2] = ["posts", "signups"];

pub struct StatsEngine<S: ReportSource> {
    aggregator: StatsAggregator<S>,
    output_dir: PathBuf,
}

impl<S: ReportSource> StatsEngine<S> {
    pub fn new(source: S, output_dir: PathBuf) -> Self {
        Self {
            aggregator: StatsAggregator::new(source),
            output_dir,
        }
    }

    /// 兩種報表各自獨立彙總、並發執行；任何一邊失敗整次執行就失敗。
    /// 回傳實際寫出的 CSV 路徑，讓寄送階段不必靠掃目錄猜。
    pub async fn run_fetch(
        &self,
        today: DateTime<Utc>,
        look_back: usize,
    ) -> Result<Vec<PathBuf>> {
        let ranges = trailing_month_ranges(today, look_back);

        tracing::info!(
            "fetching {} month(s) of stats for {:?}",
            ranges.len(),
            REPORT_NAMES
        );

        let [posts_name, signups_name] = REPORT_NAMES;
        let (posts, signups) = tokio::try_join!(
            self.aggregator.aggregate(posts_name, &ranges),
            self.aggregator.aggregate(signups_name, &ranges),
        )?;

        let mut written = Vec::with_capacity(REPORT_NAMES.len());
        for bundle in [posts, signups] {
            written.push(write_bundle(&bundle, &self.output_dir)?);
        }

        Ok(written)
    }
}
