//! HTTP client for the OpenCode server session API
//!
//! Queries `GET {server}/session/{id}` for session metadata.

use super::{SessionInfo, SessionSource};
use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Default OpenCode server address
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4096";

/// Shared HTTP client for session lookups and the event stream.
/// No overall timeout: the event stream is long-lived.
pub static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(2)
        .build()
        .expect("Failed to create HTTP client")
});

/// [`SessionSource`] backed by the OpenCode server
#[derive(Debug, Clone)]
pub struct HttpSessionSource {
    base_url: String,
}

impl HttpSessionSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn session_url(&self, session_id: &str) -> String {
        format!(
            "{}/session/{}",
            self.base_url,
            urlencoding::encode(session_id)
        )
    }
}

#[async_trait]
impl SessionSource for HttpSessionSource {
    async fn get_session(&self, session_id: &str) -> Result<SessionInfo> {
        let response = HTTP_CLIENT
            .get(self.session_url(session_id))
            .timeout(Duration::from_secs(5))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Session API returned status {}", response.status());
        }

        Ok(response.json().await?)
    }
}
