pub mod cli;

use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};

/// 讀一個必要的環境變數；空字串視同缺少
fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| StatsError::MissingEnvError {
            name: name.to_string(),
        })
}

/// 抓取階段的設定，啟動時讀取一次，之後不再碰環境變數
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_username: String,
}

impl FetchConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: require_env("DISCOURSE_BASE_URL")?,
            api_key: require_env("DISCOURSE_KEY")?,
            api_username: require_env("DISCOURSE_USERNAME")?,
        })
    }
}

impl Validate for FetchConfig {
    fn validate(&self) -> Result<()> {
        validate_url("DISCOURSE_BASE_URL", &self.base_url)?;
        validate_non_empty_string("DISCOURSE_KEY", &self.api_key)?;
        validate_non_empty_string("DISCOURSE_USERNAME", &self.api_username)?;
        Ok(())
    }
}

/// 寄送階段的設定
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub base_url: String,
    pub email_to: String,
    pub email_reply_to: String,
    pub email_host: String,
    pub email_username: String,
    pub email_password: String,
}

impl MailConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: require_env("DISCOURSE_BASE_URL")?,
            email_to: require_env("EMAIL_TO")?,
            email_reply_to: require_env("EMAIL_REPLY_TO")?,
            email_host: require_env("EMAIL_HOST")?,
            email_username: require_env("EMAIL_USERNAME")?,
            email_password: require_env("EMAIL_PASSWORD")?,
        })
    }
}

impl Validate for MailConfig {
    fn validate(&self) -> Result<()> {
        validate_url("DISCOURSE_BASE_URL", &self.base_url)?;
        validate_non_empty_string("EMAIL_TO", &self.email_to)?;
        validate_non_empty_string("EMAIL_REPLY_TO", &self.email_reply_to)?;
        validate_non_empty_string("EMAIL_HOST", &self.email_host)?;
        validate_non_empty_string("EMAIL_USERNAME", &self.email_username)?;
        validate_non_empty_string("EMAIL_PASSWORD", &self.email_password)?;
        Ok(())
    }
}
