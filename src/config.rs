//! Checkout endpoint configuration.
//!
//! ```json
//! {
//!   "base_url": "https://pay.example",
//!   "success_url": "https://shop.example/success",
//!   "failure_url": "https://shop.example/failure",
//!   "timeout_secs": 30
//! }
//! ```
//!
//! `timeout_secs` is optional and defaults to 30.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Where to submit verification requests and where the user lands after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Root URL of the checkout service.
    pub base_url: String,
    /// Redirect target after a successful verification.
    pub success_url: String,
    /// Redirect target after a failed verification.
    pub failure_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CheckoutConfig {
    /// Creates a config with the default timeout.
    pub fn new(
        base_url: impl Into<String>,
        success_url: impl Into<String>,
        failure_url: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            success_url: success_url.into(),
            failure_url: failure_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&json)
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "base_url",
                reason: "must start with http:// or https://",
            });
        }
        if self.success_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "success_url",
                reason: "must not be empty",
            });
        }
        if self.failure_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "failure_url",
                reason: "must not be empty",
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout_secs",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    /// The verification endpoint, `{base_url}/pay/`.
    pub fn pay_endpoint(&self) -> String {
        format!("{}/pay/", self.base_url.trim_end_matches('/'))
    }

    /// Request timeout.
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
