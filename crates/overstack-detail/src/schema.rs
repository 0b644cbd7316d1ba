#![forbid(unsafe_code)]

//! Form-schema model read from page-layout configuration.
//!
//! A layout carries an ordered list of field descriptors. A descriptor
//! with `type: "block"` is a container whose own `fields` nest to any
//! depth; every other descriptor is a leaf. Keys the core does not use
//! are kept in `extra` so a layout survives a round trip untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// `type` value marking a container descriptor.
pub const BLOCK_TYPE: &str = "block";

/// One entry of a form schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Descriptor kind, e.g. `text`, `divider` or `block`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Model path the field binds to, e.g. `model.name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Any truthy value marks the field required (`true`, `1`, `"yes"`).
    #[serde(
        default,
        deserialize_with = "truthy",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub required: bool,
    /// Children of a block.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldDescriptor {
    /// A named leaf.
    #[must_use]
    pub fn leaf(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: Some(name.into()),
            required,
            ..Self::default()
        }
    }

    /// A block containing `fields`.
    #[must_use]
    pub fn block(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            kind: Some(BLOCK_TYPE.to_owned()),
            fields,
            ..Self::default()
        }
    }

    /// Whether this descriptor is a container.
    #[must_use]
    pub fn is_block(&self) -> bool {
        self.kind.as_deref() == Some(BLOCK_TYPE)
    }
}

/// Read a flag written by hand in a layout file.
///
/// `null`, `false`, `0`, `""`, `"0"`, `"false"`, `[]` and `{}` are false;
/// everything else is true.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !matches!(s.trim(), "" | "0" | "false"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    })
}

/// A component's active page layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageLayout {
    /// Layout with only a field list.
    #[must_use]
    pub fn with_fields(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Parse a layout from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
