#![forbid(unsafe_code)]

//! Validation-rule extraction from a form schema.
//!
//! # Invariants
//!
//! 1. Only named, required leaves produce an entry; their rule list is
//!    exactly `[Required]`.
//! 2. Blocks never produce an entry of their own; their children are
//!    merged into the same mapping.
//! 3. Nesting depth is limited by memory only. Traversal keeps an
//!    explicit work stack instead of recursing.
//! 4. A later required leaf with an already-seen name overwrites that
//!    entry in place; a later optional leaf leaves it alone.

use core::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::FieldDescriptor;

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    /// The field must hold a non-blank value.
    Required,
}

impl Rule {
    /// Rule name as written in validation messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field path to the rules applying to it, in discovery order.
pub type RuleSet = IndexMap<String, Vec<Rule>>;

/// Flatten `fields` into a rule mapping.
#[must_use]
pub fn extract_rules(fields: &[FieldDescriptor]) -> RuleSet {
    let mut rules = RuleSet::new();
    let mut pending = vec![fields.iter()];

    while let Some(level) = pending.last_mut() {
        let Some(field) = level.next() else {
            pending.pop();
            continue;
        };

        if field.is_block() {
            pending.push(field.fields.iter());
            continue;
        }

        let Some(name) = field.name.as_deref() else {
            continue;
        };

        if field.required {
            rules.insert(name.to_owned(), vec![Rule::Required]);
        }
    }

    rules
}
