pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::{Cli, Command};
pub use config::{FetchConfig, MailConfig};
pub use core::engine::StatsEngine;
pub use core::fetcher::DiscourseReportSource;
pub use core::mailer::{Mailer, SmtpMailTransport};
pub use core::throttle::ThrottledClient;
pub use utils::error::{Result, StatsError};
