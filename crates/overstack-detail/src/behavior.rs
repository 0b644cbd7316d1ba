#![forbid(unsafe_code)]

//! Lifecycle shared by every component hosted inside a modal.
//!
//! A detail component embeds a [`DetailState`] and implements the three
//! required methods of [`DetailComponent`]; everything else is provided.
//! Provided operations never talk to the manager directly: they return
//! the signals to put on the page bus, in emission order.
//!
//! # Invariants
//!
//! 1. `select` always emits the selection event before `CloseTopModal`.
//! 2. `close_process` resets the tab to [`INITIAL_TAB`] before emitting.
//! 3. `mount_process` only ever replaces the layout; it never clears it.

use indexmap::IndexMap;
use overstack_core::Signal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::inflect;
use crate::rules::{RuleSet, extract_rules};
use crate::schema::PageLayout;
use crate::validation::{ValidationErrors, Validator};

/// URL-bound fields every detail component carries.
pub const DETAIL_URL_FIELDS: [&str; 1] = ["currentTab"];

/// Query-string name `current_tab` is reflected under.
pub const TAB_QUERY_KEY: &str = "tab";

/// Tab shown when a detail component opens.
pub const INITIAL_TAB: u32 = 1;

/// Per-instance state of a detail component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailState {
    /// Set after a successful store; the host shows a success affordance.
    pub show_success_indicator: bool,
    pub current_tab: u32,
    /// Active form schema.
    pub page_layout: Option<PageLayout>,
    pub disable_modal: bool,
    /// Display titles of related records, keyed by relation name.
    pub relation_titles: IndexMap<String, String>,
    /// Opaque value passed back with a selection.
    pub context: Value,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            show_success_indicator: false,
            current_tab: INITIAL_TAB,
            page_layout: None,
            disable_modal: false,
            relation_titles: IndexMap::new(),
            context: Value::String(String::new()),
        }
    }
}

impl DetailState {
    /// Query-string pair for the current tab, omitted on the initial tab.
    #[must_use]
    pub fn tab_query(&self) -> Option<(&'static str, String)> {
        (self.current_tab != INITIAL_TAB).then(|| (TAB_QUERY_KEY, self.current_tab.to_string()))
    }

    /// Rules extracted from the active layout; empty without one.
    #[must_use]
    pub fn layout_rules(&self) -> RuleSet {
        self.page_layout
            .as_ref()
            .map(|layout| extract_rules(&layout.fields))
            .unwrap_or_default()
    }
}

/// [`DETAIL_URL_FIELDS`] as owned strings, for `ContentComponent` impls.
#[must_use]
pub fn detail_url_fields() -> Vec<String> {
    DETAIL_URL_FIELDS.iter().map(|field| (*field).to_owned()).collect()
}

/// Behavior of a component hosted inside a modal.
pub trait DetailComponent {
    /// Explicitly declared identifier, e.g. `customers-list`.
    const COMPONENT: Option<&'static str> = None;

    fn state(&self) -> &DetailState;

    fn state_mut(&mut self) -> &mut DetailState;

    /// Identifier used when [`Self::COMPONENT`] is not declared.
    fn fallback_name(&self) -> String;

    /// Declared identifier, or the fallback.
    fn component_name(&self) -> String {
        Self::COMPONENT.map_or_else(|| self.fallback_name(), str::to_owned)
    }

    /// Name of the event [`select`](Self::select) emits.
    fn select_event(&self) -> String {
        inflect::select_event(&self.component_name())
    }

    /// Adopt `layout` as the active schema when one is supplied.
    ///
    /// `model` is not inspected.
    fn mount_process(&mut self, identifier: &str, _model: &Value, layout: Option<PageLayout>) {
        if let Some(layout) = layout {
            tracing::debug!(component = identifier, fields = layout.fields.len(), "mount layout");
            self.state_mut().page_layout = Some(layout);
        }
    }

    /// Report `model_id` as picked and dismiss the modal.
    fn select(&self, model_id: Value, _relation_id: Value) -> Vec<Signal> {
        let event = self.select_event();
        tracing::debug!(event = %event, model_id = %model_id, "select");
        vec![
            Signal::Selected {
                event,
                model_id,
                context: self.state().context.clone(),
            },
            Signal::CloseTopModal,
        ]
    }

    /// Dismiss the modal, asking `source` to reload when given.
    fn close_process(&mut self, source: Option<&str>) -> Vec<Signal> {
        self.state_mut().current_tab = INITIAL_TAB;

        let mut emitted = vec![Signal::CloseTopModal];
        if let Some(source) = source {
            emitted.push(Signal::refresh(source));
        }
        emitted
    }

    /// Mark a successful store.
    fn store_process(&mut self, _model: &Value) {
        self.state_mut().show_success_indicator = true;
    }

    /// Validate `data` against the required fields of the active layout.
    fn validate_from_layout(
        &self,
        validator: &impl Validator,
        data: &Value,
    ) -> Result<(), ValidationErrors> {
        let rules = self.state().layout_rules();
        if rules.is_empty() {
            return Ok(());
        }
        validator.validate(&rules, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use crate::schema::FieldDescriptor;
    use crate::validation::DataValidator;
    use serde_json::json;
    use std::cell::Cell;

    #[derive(Default)]
    struct CustomersList {
        state: DetailState,
    }

    impl DetailComponent for CustomersList {
        const COMPONENT: Option<&'static str> = Some("customers-list");

        fn state(&self) -> &DetailState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut DetailState {
            &mut self.state
        }

        fn fallback_name(&self) -> String {
            "customers-list-component".into()
        }
    }

    #[derive(Default)]
    struct Undeclared {
        state: DetailState,
    }

    impl DetailComponent for Undeclared {
        fn state(&self) -> &DetailState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut DetailState {
            &mut self.state
        }

        fn fallback_name(&self) -> String {
            "bank-accounts-list".into()
        }
    }

    fn customer_layout() -> PageLayout {
        PageLayout::with_fields(vec![
            FieldDescriptor::leaf("model.name", true),
            FieldDescriptor::block(vec![FieldDescriptor::leaf("model.email", true)]),
            FieldDescriptor::leaf("model.phone", false),
        ])
    }

    #[test]
    fn default_state() {
        let state = DetailState::default();
        assert!(!state.show_success_indicator);
        assert_eq!(state.current_tab, 1);
        assert!(state.page_layout.is_none());
        assert!(!state.disable_modal);
        assert!(state.relation_titles.is_empty());
        assert_eq!(state.context, json!(""));
    }

    #[test]
    fn declared_constant_wins_over_fallback() {
        assert_eq!(CustomersList::default().component_name(), "customers-list");
        assert_eq!(Undeclared::default().component_name(), "bank-accounts-list");
    }

    #[test]
    fn select_event_derives_from_identifier() {
        assert_eq!(CustomersList::default().select_event(), "customerSelected");
        assert_eq!(Undeclared::default().select_event(), "bankAccountSelected");
    }

    #[test]
    fn select_emits_event_with_context_then_close_top() {
        let mut component = CustomersList::default();
        component.state.context = json!("test-context");

        let emitted = component.select(json!(123), Value::Null);
        assert_eq!(
            emitted,
            vec![
                Signal::Selected {
                    event: "customerSelected".into(),
                    model_id: json!(123),
                    context: json!("test-context"),
                },
                Signal::CloseTopModal,
            ]
        );
    }

    #[test]
    fn close_process_with_source_refreshes_list() {
        let mut component = CustomersList::default();
        component.state.current_tab = 3;

        let emitted = component.close_process(Some("customers-list"));
        assert_eq!(
            emitted,
            vec![Signal::CloseTopModal, Signal::refresh("customers-list")]
        );
        assert_eq!(component.state.current_tab, 1);
    }

    #[test]
    fn close_process_without_source() {
        let mut component = CustomersList::default();
        assert_eq!(component.close_process(None), vec![Signal::CloseTopModal]);
    }

    #[test]
    fn store_process_sets_indicator_only() {
        let mut component = CustomersList::default();
        component.state.current_tab = 2;
        component.store_process(&json!({"id": 1}));

        assert!(component.state.show_success_indicator);
        assert_eq!(component.state.current_tab, 2);
    }

    #[test]
    fn mount_process_adopts_layout() {
        let mut component = CustomersList::default();
        component.mount_process("customer-detail", &Value::Null, Some(customer_layout()));
        assert_eq!(component.state.page_layout, Some(customer_layout()));
    }

    #[test]
    fn mount_process_without_layout_keeps_existing() {
        let mut component = CustomersList::default();
        component.state.page_layout = Some(customer_layout());
        component.mount_process("customer-detail", &json!({"id": 1}), None);
        assert_eq!(component.state.page_layout, Some(customer_layout()));
    }

    #[test]
    fn layout_rules_flatten_blocks() {
        let mut component = CustomersList::default();
        component.state.page_layout = Some(customer_layout());

        let rules = component.state.layout_rules();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules["model.email"], [Rule::Required]);
    }

    #[test]
    fn validate_from_layout_reports_missing_required_fields() {
        let mut component = CustomersList::default();
        component.mount_process("customer-detail", &Value::Null, Some(customer_layout()));

        let errors = component
            .validate_from_layout(&DataValidator, &json!({"model": {"name": "Acme"}}))
            .unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["model.email"]);

        let ok = component.validate_from_layout(
            &DataValidator,
            &json!({"model": {"name": "Acme", "email": "a@b.c"}}),
        );
        assert_eq!(ok, Ok(()));
    }

    #[test]
    fn validator_not_consulted_without_required_fields() {
        let calls = Cell::new(0);
        let counting = |_: &RuleSet, _: &Value| {
            calls.set(calls.get() + 1);
            Ok::<(), ValidationErrors>(())
        };

        let mut component = CustomersList::default();
        assert_eq!(component.validate_from_layout(&counting, &Value::Null), Ok(()));

        component.state.page_layout = Some(PageLayout::with_fields(vec![
            FieldDescriptor::leaf("model.note", false),
        ]));
        assert_eq!(component.validate_from_layout(&counting, &Value::Null), Ok(()));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn tab_query_omits_initial_tab() {
        let mut state = DetailState::default();
        assert_eq!(state.tab_query(), None);
        state.current_tab = 2;
        assert_eq!(state.tab_query(), Some(("tab", "2".to_owned())));
    }

    #[test]
    fn detail_url_fields_are_preserved_by_default() {
        let config = overstack_core::ManagerConfig::default();
        for field in detail_url_fields() {
            assert!(config.preserves_url_field(&field));
        }
    }

    #[test]
    fn state_round_trips_camel_case() {
        let mut state = DetailState::default();
        state.relation_titles.insert("customer".into(), "Acme".into());
        let value = serde_json::to_value(&state).unwrap();

        assert_eq!(value["currentTab"], 1);
        assert_eq!(value["relationTitles"]["customer"], "Acme");
        let back: DetailState = serde_json::from_value(value).unwrap();
        assert_eq!(back, state);
    }
}
