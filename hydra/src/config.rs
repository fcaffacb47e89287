use serde::Deserialize;

/// Production API root. Endpoints are joined onto it as `hydra/{data_source_id}/`.
pub const DEFAULT_BASE_URL: &str = "https://siftrics.com/api/";

/// Transport settings for a [`Client`](crate::Client).
///
/// Everything here is in-memory; the library never reads the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    /// Overall request timeout. `None` keeps the HTTP transport's default.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}
