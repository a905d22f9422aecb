use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production API origin
pub const DEFAULT_BASE_URL: &str = "https://api.zehnly.ai";

/// Fixed per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base origin every relative path is resolved against
    pub base_url: String,
    /// Request timeout
    #[serde(with = "serde_duration", default = "default_timeout")]
    pub timeout: Duration,
    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_user_agent() -> String {
    format!("zehnly-admin/{}", env!("CARGO_PKG_VERSION"))
}

/// Serialize the timeout as whole seconds
mod serde_duration {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
