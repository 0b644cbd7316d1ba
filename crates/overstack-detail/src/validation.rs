#![forbid(unsafe_code)]

//! Validation of component data against an extracted [`RuleSet`].
//!
//! Field paths are dotted (`model.address.city`). Each segment indexes an
//! object by key, or an array by position when the segment is numeric.
//!
//! # Failure Modes
//!
//! | condition | outcome |
//! |-----------|---------|
//! | path does not resolve | `Required` fails for that field |
//! | value is `null`, blank string, `[]` or `{}` | `Required` fails |
//! | empty rule set | always passes |
//!
//! A field produces at most one error per rule; failing fields appear in
//! rule-set order.

use core::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rules::{Rule, RuleSet};

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub rule: Rule,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, rule: Rule) -> Self {
        let message = match rule {
            Rule::Required => format!("The {field} field is required."),
        };
        Self { rule, message }
    }
}

/// Per-field validation failures, in rule-set order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: IndexMap<String, Vec<FieldError>>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed for {} field(s)", self.fields.len())?;
        if let Some((field, errors)) = self.fields.first() {
            if let Some(error) = errors.first() {
                write!(f, ": {field}: {}", error.message)?;
            }
        }
        Ok(())
    }
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure of `rule` on `field`.
    pub fn add(&mut self, field: impl Into<String>, error: FieldError) {
        self.fields.entry(field.into()).or_default().push(error);
    }

    /// Errors recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[FieldError]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Whether `field` failed any rule.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Failing field paths, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `Ok` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// External validation subsystem a detail component submits rules to.
pub trait Validator {
    fn validate(&self, rules: &RuleSet, data: &Value) -> Result<(), ValidationErrors>;
}

/// Validator over a JSON document of component data.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataValidator;

impl DataValidator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Validator for DataValidator {
    fn validate(&self, rules: &RuleSet, data: &Value) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for (field, field_rules) in rules {
            let value = resolve(data, field);
            for &rule in field_rules {
                if !passes(rule, value) {
                    errors.add(field.as_str(), FieldError::new(field, rule));
                }
            }
        }

        if !errors.is_empty() {
            tracing::debug!(failed = errors.len(), checked = rules.len(), "validation failed");
        }
        errors.into_result()
    }
}

impl<F> Validator for F
where
    F: Fn(&RuleSet, &Value) -> Result<(), ValidationErrors>,
{
    fn validate(&self, rules: &RuleSet, data: &Value) -> Result<(), ValidationErrors> {
        self(rules, data)
    }
}

/// Look up a dotted path inside `data`.
fn resolve<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn passes(rule: Rule, value: Option<&Value>) -> bool {
    match rule {
        Rule::Required => match value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::Bool(_) | Value::Number(_)) => true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn required(names: &[&str]) -> RuleSet {
        names
            .iter()
            .map(|name| ((*name).to_owned(), vec![Rule::Required]))
            .collect()
    }

    #[test]
    fn present_values_pass() {
        let data = json!({"model": {"name": "Acme", "active": false, "credit": 0, "tags": ["a"]}});
        let rules = required(&["model.name", "model.active", "model.credit", "model.tags"]);
        assert_eq!(DataValidator.validate(&rules, &data), Ok(()));
    }

    #[test]
    fn blank_values_fail_in_rule_order() {
        let data = json!({"model": {"name": "  ", "email": null, "tags": [], "meta": {}}});
        let rules = required(&["model.email", "model.name", "model.tags", "model.meta", "model.phone"]);

        let errors = DataValidator.validate(&rules, &data).unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(
            fields,
            ["model.email", "model.name", "model.tags", "model.meta", "model.phone"]
        );
        assert_eq!(errors.get("model.phone").unwrap().len(), 1);
    }

    #[test]
    fn one_error_per_offending_field() {
        let rules = required(&["model.name"]);
        let errors = DataValidator.validate(&rules, &json!({})).unwrap_err();

        assert_eq!(errors.len(), 1);
        let error = &errors.get("model.name").unwrap()[0];
        assert_eq!(error.rule, Rule::Required);
        assert_eq!(error.message, "The model.name field is required.");
    }

    #[test]
    fn array_segments_index_by_position() {
        let data = json!({"lines": [{"sku": "A-1"}, {"sku": ""}]});
        let errors = DataValidator
            .validate(&required(&["lines.0.sku", "lines.1.sku", "lines.x.sku"]), &data)
            .unwrap_err();

        assert!(!errors.has("lines.0.sku"));
        assert!(errors.has("lines.1.sku"));
        assert!(errors.has("lines.x.sku"));
    }

    #[test]
    fn scalar_in_the_middle_of_a_path_does_not_resolve() {
        let data = json!({"model": "flat"});
        assert!(DataValidator.validate(&required(&["model.name"]), &data).is_err());
    }

    #[test]
    fn empty_rule_set_passes() {
        assert_eq!(DataValidator.validate(&RuleSet::new(), &Value::Null), Ok(()));
    }

    #[test]
    fn display_names_first_failure() {
        let errors = DataValidator
            .validate(&required(&["model.name"]), &json!({}))
            .unwrap_err();
        assert_eq!(
            errors.to_string(),
            "validation failed for 1 field(s): model.name: The model.name field is required."
        );
    }

    #[test]
    fn closures_are_validators() {
        let reject_all = |rules: &RuleSet, _: &Value| {
            let mut errors = ValidationErrors::new();
            for field in rules.keys() {
                errors.add(field.as_str(), FieldError::new(field, Rule::Required));
            }
            errors.into_result()
        };
        let errors = reject_all
            .validate(&required(&["a", "b"]), &json!({"a": 1, "b": 2}))
            .unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn errors_serialize_as_field_map() {
        let errors = DataValidator
            .validate(&required(&["model.name"]), &json!({}))
            .unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"model.name": [{"rule": "required", "message": "The model.name field is required."}]})
        );
    }
}
