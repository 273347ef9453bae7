//! Error types for submission and configuration.
//!
//! Typing never produces errors: malformed keystrokes are absorbed by the
//! field filters and validation results are plain booleans. Errors only
//! come from the outside world, the checkout service and config loading.

use std::fmt;

/// Failures reported by a [`crate::checkout::CheckoutService`].
///
/// [`crate::checkout::CheckoutFeature`] never forwards these to the UI; any
/// of them becomes a single generic failure event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The request could not be sent or no response arrived.
    Transport(String),

    /// The endpoint answered with a non-success HTTP status.
    Status(u16),

    /// The response body was not a verification URL.
    Decode(String),
}

impl fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(reason) => write!(f, "checkout request failed: {}", reason),
            Self::Status(code) => write!(f, "checkout endpoint returned status {}", code),
            Self::Decode(reason) => {
                write!(f, "unexpected checkout response: {}", reason)
            }
        }
    }
}

impl std::error::Error for CheckoutError {}

/// Errors loading or checking a [`crate::config::CheckoutConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(String),

    /// The config is not valid JSON for the expected shape.
    Parse(String),

    /// A field holds an unusable value.
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(reason) => write!(f, "cannot read config: {}", reason),
            Self::Parse(reason) => write!(f, "cannot parse config: {}", reason),
            Self::Invalid { field, reason } => {
                write!(f, "invalid config field '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
