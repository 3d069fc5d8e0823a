pub mod aggregator;
pub mod engine;
pub mod fetcher;
pub mod mailer;
pub mod report_csv;
pub mod throttle;

pub use crate::domain::model::{DateRange, EmailMessage, MonthlyTotal, Report, ReportBundle};
pub use crate::domain::ports::{MailTransport, ReportSource};
pub use crate::utils::error::Result;
