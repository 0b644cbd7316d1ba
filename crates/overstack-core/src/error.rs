#![forbid(unsafe_code)]

//! Error types for the modal stack.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Duplicate key | Key generator produced a key already in the stack | `open` returns [`ModalError::DuplicateKey`], stack untouched |
//! | Unknown component | Probe asked about an unregistered name | Cleanup skipped, logged |
//! | Misconfigured component | Component factory failed | Cleanup skipped, logged |
//! | Probe panic | Component code panicked while probed | Panic contained, cleanup skipped |
//! | Bad config | Malformed TOML/JSON | [`ConfigError`] from the loader |

use thiserror::Error;

use crate::record::ModalKey;

/// Errors from stack mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModalError {
    /// A record with this key is already in the stack.
    #[error("modal key '{0}' is already in the stack")]
    DuplicateKey(ModalKey),
}

/// Errors raised while probing a content component for URL-bound fields.
///
/// These never leave the manager; they are logged and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// No component is registered under this name.
    #[error("unknown content component '{0}'")]
    UnknownComponent(String),
    /// The component exists but could not be instantiated.
    #[error("content component '{component}' is misconfigured: {reason}")]
    Misconfigured { component: String, reason: String },
    /// Component code panicked while being probed.
    #[error("content component '{0}' panicked while probed")]
    Panicked(String),
}

/// Errors from loading a [`ManagerConfig`](crate::ManagerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON configuration could not be parsed.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// TOML configuration could not be parsed.
    #[cfg(feature = "config-toml")]
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
}
