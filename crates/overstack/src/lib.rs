#![forbid(unsafe_code)]

//! Overstack: stacked modal overlays for server-rendered views.
//!
//! This crate re-exports the modal stack manager ([`modal`]) and the
//! behavior shared by components hosted inside a modal ([`detail`]).
//! Most hosts only need the [`prelude`].
//!
//! ```
//! use overstack::prelude::*;
//!
//! let mut manager = ModalStackManager::new();
//! let emitted = manager.pump([
//!     Signal::open("customer-detail", Arguments::new(), Some("customers-list".into())),
//!     Signal::CloseTopModal,
//! ]);
//! assert_eq!(
//!     emitted,
//!     [Signal::AllModalsClosed, Signal::refresh("customers-list")]
//! );
//! ```

pub use overstack_core as modal;
pub use overstack_detail as detail;

pub use overstack_core::{
    Arguments, ComponentRegistry, ConfigError, ContentComponent, HashKeyGenerator, KeyGenerator,
    ManagerConfig, MemorySessionStore, ModalError, ModalKey, ModalRecord, ModalStack,
    ModalStackManager, ProbeError, SessionStore, Signal, UrlFieldProbe,
};
pub use overstack_detail::{
    DataValidator, DetailComponent, DetailState, FieldDescriptor, FieldError, PageLayout, Rule,
    RuleSet, ValidationErrors, Validator, extract_rules, select_event,
};

/// Everything a host wiring views to the manager needs.
pub mod prelude {
    pub use overstack_core::{
        Arguments, ComponentRegistry, ContentComponent, ManagerConfig, MemorySessionStore,
        ModalKey, ModalStackManager, SessionStore, Signal,
    };
    pub use overstack_detail::{
        DataValidator, DetailComponent, DetailState, PageLayout, Validator, detail_url_fields,
    };
}
