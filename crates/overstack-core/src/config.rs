#![forbid(unsafe_code)]

//! Manager configuration.
//!
//! Every field has a default, so an empty document is a valid
//! configuration:
//!
//! ```
//! use overstack_core::ManagerConfig;
//!
//! let config = ManagerConfig::from_json_str("{}").unwrap();
//! assert_eq!(config, ManagerConfig::default());
//! assert!(config.preserves_url_field("currentTab"));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// URL-bound fields whose reflection survives a modal close.
pub const DEFAULT_PRESERVED_URL_FIELDS: [&str; 3] = ["filter", "currentTableFilter", "currentTab"];

/// Session key of the fullscreen display preference.
pub const DEFAULT_FULLSCREEN_KEY: &str = "modal_fullscreen";

/// Tunables of a [`ModalStackManager`](crate::ModalStackManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ManagerConfig {
    /// URL-bound fields never cleared on close-top.
    pub preserved_url_fields: Vec<String>,
    /// Session key toggled by `toggle_fullscreen`.
    pub fullscreen_session_key: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            preserved_url_fields: DEFAULT_PRESERVED_URL_FIELDS
                .iter()
                .map(|field| (*field).to_owned())
                .collect(),
            fullscreen_session_key: DEFAULT_FULLSCREEN_KEY.to_owned(),
        }
    }
}

impl ManagerConfig {
    /// Parse a JSON configuration document.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parse a TOML configuration document.
    #[cfg(feature = "config-toml")]
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Whether `field` is on the preserve list.
    #[must_use]
    pub fn preserves_url_field(&self, field: &str) -> bool {
        self.preserved_url_fields.iter().any(|kept| kept == field)
    }
}
