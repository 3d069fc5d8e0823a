use crate::utils::error::Result;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_DELAY_MS: u64 = 300;

/// 包裝 reqwest::Client：每次請求前先固定延遲，避免觸發遠端 API 的速率限制。
/// 只是單純的節流，不是 token bucket；並發呼叫各自延遲，不會互相排隊。
#[derive(Debug, Clone)]
pub struct ThrottledClient {
    client: Client,
    delay: Duration,
}

impl ThrottledClient {
    pub fn new(delay: Duration) -> Self {
        Self {
            client: Client::new(),
            delay,
        }
    }

    pub async fn get(&self, url: Url) -> Result<reqwest::Response> {
        tokio::time::sleep(self.delay).await;

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        Ok(response)
    }
}
