//! Carrier lookup API configuration

use serde::{Deserialize, Serialize};

/// Connection settings for the remote carrier-verification API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CarrierApiConfig {
    /// Base URL; requests go to `{base_url}/format/{key}/{secret}/{number}`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub api_secret: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CarrierApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            api_secret: String::new(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl CarrierApiConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("CARRIER_API_BASE_URL").unwrap_or(defaults.base_url),
            api_key: std::env::var("CARRIER_API_KEY").unwrap_or_default(),
            api_secret: std::env::var("CARRIER_API_SECRET").unwrap_or_default(),
            timeout_secs: std::env::var("CARRIER_API_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            user_agent: defaults.user_agent,
        }
    }

    /// Both the key and the secret are present
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.api_secret.trim().is_empty()
    }
}

fn default_base_url() -> String {
    String::from("https://api.tmtvelocity.com/live")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("phone-verification/{}", env!("CARGO_PKG_VERSION"))
}
