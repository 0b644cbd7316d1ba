#![forbid(unsafe_code)]

//! Shared behavior for components hosted inside Overstack modals.
//!
//! - [`schema`]: page layouts and their form-field tree.
//! - [`rules`]: flattening a field tree into validation rules.
//! - [`inflect`]: deriving `<entity>Selected` event names.
//! - [`validation`]: checking component data against extracted rules.
//! - [`behavior`]: the [`DetailComponent`] lifecycle tying these together.
//!
//! # Example
//!
//! ```
//! use overstack_detail::{DetailComponent, DetailState};
//! use overstack_core::Signal;
//!
//! #[derive(Default)]
//! struct ProductsList {
//!     state: DetailState,
//! }
//!
//! impl DetailComponent for ProductsList {
//!     const COMPONENT: Option<&'static str> = Some("products-list");
//!
//!     fn state(&self) -> &DetailState { &self.state }
//!     fn state_mut(&mut self) -> &mut DetailState { &mut self.state }
//!     fn fallback_name(&self) -> String { "products-list".into() }
//! }
//!
//! let list = ProductsList::default();
//! let emitted = list.select(serde_json::json!(7), serde_json::Value::Null);
//! assert_eq!(emitted[0].event_name(), "productSelected");
//! assert_eq!(emitted[1], Signal::CloseTopModal);
//! ```

pub mod behavior;
pub mod inflect;
pub mod rules;
pub mod schema;
pub mod validation;

pub use behavior::{DETAIL_URL_FIELDS, DetailComponent, DetailState, detail_url_fields};
pub use inflect::select_event;
pub use rules::{Rule, RuleSet, extract_rules};
pub use schema::{FieldDescriptor, PageLayout};
pub use validation::{DataValidator, FieldError, ValidationErrors, Validator};
