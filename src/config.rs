//! Bridge configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the POS sync engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Base URL for the POS API (e.g., "https://pos.example.com").
    pub api_base_url: String,

    /// Bearer token for the POS API. May be absent at construction;
    /// the client rejects the first remote call instead.
    pub api_token: Option<String>,

    /// Country code applied to every mapped customer record.
    pub default_country_code: String,

    /// Page size requested when listing the customer directory.
    pub page_size: u32,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://pos.example.com".to_string(),
            api_token: None,
            default_country_code: "PH".to_string(),
            page_size: 100,
            request_timeout_secs: 30,
        }
    }
}

impl BridgeConfig {
    /// Builds a config from process environment variables, falling back to
    /// defaults for anything unset: `POS_API_BASE_URL`, `POS_API_TOKEN`,
    /// `POS_COUNTRY_CODE`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: std::env::var("POS_API_BASE_URL")
                .unwrap_or(defaults.api_base_url),
            api_token: std::env::var("POS_API_TOKEN").ok(),
            default_country_code: std::env::var("POS_COUNTRY_CODE")
                .unwrap_or(defaults.default_country_code),
            page_size: defaults.page_size,
            request_timeout_secs: defaults.request_timeout_secs,
        }
    }
}
