use crate::domain::model::{DateRange, EmailMessage, Report};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_monthly(&self, report_name: &str, range: &DateRange) -> Result<Report>;
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}
