use crate::config::FetchConfig;
use crate::core::throttle::ThrottledClient;
use crate::core::{DateRange, Report, ReportSource};
use crate::domain::model::BulkReportsResponse;
use crate::utils::error::{Result, StatsError};
use chrono::SecondsFormat;
use url::Url;

/// 對 Discourse 管理後台報表 API 的單月查詢。
/// 憑證放在 query string，而不是 header。
pub struct DiscourseReportSource {
    client: ThrottledClient,
    base_url: String,
    api_key: String,
    api_username: String,
}

impl DiscourseReportSource {
    pub fn new(config: &FetchConfig, client: ThrottledClient) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            api_username: config.api_username.clone(),
        }
    }

    fn bulk_report_url(&self, report_name: &str, range: &DateRange) -> Result<Url> {
        let endpoint = format!("{}/admin/reports/bulk", self.base_url);

        let url = Url::parse_with_params(
            &endpoint,
            &[
                (
                    format!("reports[{}][facets][]", report_name),
                    "prev_period".to_string(),
                ),
                (
                    format!("reports[{}][start_date]", report_name),
                    range.start.to_rfc3339_opts(SecondsFormat::Secs, true),
                ),
                (
                    format!("reports[{}][end_date]", report_name),
                    range.end.to_rfc3339_opts(SecondsFormat::Secs, true),
                ),
                (format!("reports[{}][limit]", report_name), "50".to_string()),
                ("api_key".to_string(), self.api_key.clone()),
                ("api_username".to_string(), self.api_username.clone()),
            ],
        )?;

        Ok(url)
    }
}

#[async_trait::async_trait]
impl ReportSource for DiscourseReportSource {
    async fn fetch_monthly(&self, report_name: &str, range: &DateRange) -> Result<Report> {
        let url = self.bulk_report_url(report_name, range)?;

        tracing::debug!("fetching {} report: {}", report_name, range.month_label());
        let response = self.client.get(url).await?;

        // 不檢查 HTTP 狀態碼，error_type 欄位是唯一的錯誤分類機制
        let body: BulkReportsResponse = response.json().await?;

        if let Some(error_type) = body.error_type {
            return Err(StatsError::FetchError { error_type });
        }

        body.reports
            .into_iter()
            .next()
            .ok_or_else(|| StatsError::FetchError {
                error_type: "missing_report".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use httpmock::prelude::*;
    use std::time::Duration;

    fn test_config(base_url: String) -> FetchConfig {
        FetchConfig {
            base_url,
            api_key: "secret-key".to_string(),
            api_username: "stats-bot".to_string(),
        }
    }

    fn march_2024() -> DateRange {
        DateRange {
            start: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_fetch_monthly_builds_bulk_report_query() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/admin/reports/bulk")
                .query_param("reports[posts][facets][]", "prev_period")
                .query_param("reports[posts][start_date]", "2024-03-01T00:00:00Z")
                .query_param("reports[posts][end_date]", "2024-03-31T23:59:59Z")
                .query_param("reports[posts][limit]", "50")
                .query_param("api_key", "secret-key")
                .query_param("api_username", "stats-bot");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "reports": [{
                        "data": [{"x": "2024-03-01", "y": 5}, {"x": "2024-03-02", "y": 7}],
                        "start_date": "2024-03-01T00:00:00Z",
                        "prev_start_date": "2024-02-01T00:00:00Z"
                    }]
                }));
        });

        let config = test_config(server.base_url());
        let source =
            DiscourseReportSource::new(&config, ThrottledClient::new(Duration::from_millis(1)));

        let report = source.fetch_monthly("posts", &march_2024()).await.unwrap();

        api_mock.assert();
        assert_eq!(report.data.len(), 2);
        assert_eq!(report.data[0].y, 5);
        assert_eq!(report.data[1].y, 7);
        assert_eq!(
            report.prev_start_date.as_deref(),
            Some("2024-02-01T00:00:00Z")
        );
    }

    #[tokio::test]
    async fn test_fetch_monthly_returns_first_report() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/admin/reports/bulk");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "reports": [
                        {"data": [{"x": "2024-03-01", "y": 1}]},
                        {"data": [{"x": "2024-03-01", "y": 99}]}
                    ]
                }));
        });

        let config = test_config(server.base_url());
        let source =
            DiscourseReportSource::new(&config, ThrottledClient::new(Duration::from_millis(1)));

        let report = source.fetch_monthly("posts", &march_2024()).await.unwrap();
        assert_eq!(report.data[0].y, 1);
    }

    #[tokio::test]
    async fn test_error_type_in_body_becomes_fetch_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/admin/reports/bulk");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"error_type": "rate_limited"}));
        });

        let config = test_config(server.base_url());
        let source =
            DiscourseReportSource::new(&config, ThrottledClient::new(Duration::from_millis(1)));

        let err = source
            .fetch_monthly("posts", &march_2024())
            .await
            .unwrap_err();

        match err {
            StatsError::FetchError { error_type } => assert_eq!(error_type, "rate_limited"),
            other => panic!("expected FetchError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_reports_array_is_a_fetch_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/admin/reports/bulk");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"reports": []}));
        });

        let config = test_config(server.base_url());
        let source =
            DiscourseReportSource::new(&config, ThrottledClient::new(Duration::from_millis(1)));

        let err = source
            .fetch_monthly("posts", &march_2024())
            .await
            .unwrap_err();

        match err {
            StatsError::FetchError { error_type } => assert_eq!(error_type, "missing_report"),
            other => panic!("expected FetchError, got {:?}", other),
        }
    }
}
