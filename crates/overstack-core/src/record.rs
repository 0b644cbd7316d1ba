#![forbid(unsafe_code)]

//! The modal record: one open overlay.

use core::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parameters forwarded to a content component, in caller order.
pub type Arguments = IndexMap<String, serde_json::Value>;

/// Opaque identity of a record within a stack.
///
/// Keys are never reused for the lifetime of a stack instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModalKey(String);

impl ModalKey {
    /// Wrap an existing key string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModalKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ModalKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// One stacked overlay.
///
/// Created only by the manager's open operation. The stack flips
/// `top_modal` during top recomputation; nothing else mutates a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalRecord {
    /// Stack identity, stable for the record's lifetime.
    pub key: ModalKey,
    /// Content component rendered inside the overlay.
    pub component_name: String,
    /// Parameters forwarded to the content component.
    pub arguments: Arguments,
    /// Originating list/view, targeted by a refresh on close.
    pub source: Option<String>,
    /// Whether the record is visible. Always `true` on creation.
    pub show: bool,
    /// Whether this is the single focused overlay.
    pub top_modal: bool,
    /// 1-based stacking depth at creation time. Never recomputed.
    pub iteration: u32,
}

impl ModalRecord {
    /// Build a freshly opened, visible record that is not yet top.
    #[must_use]
    pub fn new(
        key: ModalKey,
        component_name: impl Into<String>,
        arguments: Arguments,
        source: Option<String>,
        iteration: u32,
    ) -> Self {
        Self {
            key,
            component_name: component_name.into(),
            arguments,
            source,
            show: true,
            top_modal: false,
            iteration,
        }
    }

    /// Whether this record matches both a component name and a key.
    #[must_use]
    pub fn matches(&self, component_name: &str, key: &ModalKey) -> bool {
        self.component_name == component_name && &self.key == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_visible_and_not_top() {
        let record = ModalRecord::new(ModalKey::new("k1"), "detail", Arguments::new(), None, 1);
        assert!(record.show);
        assert!(!record.top_modal);
        assert_eq!(record.iteration, 1);
    }

    #[test]
    fn matches_requires_name_and_key() {
        let record = ModalRecord::new(ModalKey::new("k1"), "detail", Arguments::new(), None, 1);
        assert!(record.matches("detail", &ModalKey::new("k1")));
        assert!(!record.matches("other", &ModalKey::new("k1")));
        assert!(!record.matches("detail", &ModalKey::new("k2")));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let mut arguments = Arguments::new();
        arguments.insert("id".into(), serde_json::json!(7));
        let record = ModalRecord::new(
            ModalKey::new("abc"),
            "customer-detail",
            arguments,
            Some("customers-list".into()),
            2,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["key"], "abc");
        assert_eq!(json["componentName"], "customer-detail");
        assert_eq!(json["topModal"], false);
        assert_eq!(json["arguments"]["id"], 7);
        assert_eq!(json["source"], "customers-list");
    }

    #[test]
    fn key_display_is_raw_string() {
        assert_eq!(ModalKey::from("deadbeef").to_string(), "deadbeef");
    }
}
