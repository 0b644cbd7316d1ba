#![forbid(unsafe_code)]

//! Page-bus signals exchanged between views, hosted components and the
//! modal stack manager.
//!
//! Signals flow both ways on the same bus: views and hosted components
//! emit manager-bound signals ([`Signal::is_manager_bound`]), the manager
//! answers with notifications the host forwards to other views.

use serde::{Deserialize, Serialize};

use crate::record::{Arguments, ModalKey};

/// Wire name of [`Signal::OpenModal`].
pub const OPEN_MODAL: &str = "noerdModal";
/// Wire name of [`Signal::CloseModal`].
pub const CLOSE_MODAL: &str = "closeModal";
/// Wire name of [`Signal::CloseTopModal`].
pub const CLOSE_TOP_MODAL: &str = "closeTopModal";
/// Wire name of [`Signal::AllModalsClosed`].
pub const ALL_MODALS_CLOSED: &str = "modal-closed-global";
/// Wire name of [`Signal::ClearUrlField`].
pub const CLEAR_URL_FIELD: &str = "clear-modal-url-params";
/// Wire-name prefix of [`Signal::RefreshList`].
pub const REFRESH_LIST_PREFIX: &str = "refreshList-";

/// One event on the page bus.
///
/// The serialized `signal` tag equals [`Signal::event_name`] for every
/// variant with a fixed name. `RefreshList` and `Selected` carry their
/// variable part in a field and are tagged `refreshList` / `selected`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "camelCase")]
pub enum Signal {
    /// Ask the manager to stack a content component.
    #[serde(rename = "noerdModal")]
    OpenModal {
        component: String,
        #[serde(default)]
        arguments: Arguments,
        #[serde(default)]
        source: Option<String>,
    },
    /// Ask the manager to close the record matching name and key.
    CloseModal {
        component: String,
        #[serde(default)]
        source: Option<String>,
        key: ModalKey,
    },
    /// Ask the manager to close whichever record is on top.
    CloseTopModal,
    /// A close left no visible record.
    #[serde(rename = "modal-closed-global")]
    AllModalsClosed,
    /// A URL-bound field of a closing component must be dropped from the
    /// query string.
    #[serde(rename = "clear-modal-url-params")]
    ClearUrlField { field: String },
    /// The list view identified by `source` should reload.
    RefreshList { source: String },
    /// A hosted component picked a model.
    Selected {
        event: String,
        model_id: serde_json::Value,
        context: serde_json::Value,
    },
}

impl Signal {
    /// Convenience constructor for [`Signal::OpenModal`].
    #[must_use]
    pub fn open(
        component: impl Into<String>,
        arguments: Arguments,
        source: Option<String>,
    ) -> Self {
        Self::OpenModal {
            component: component.into(),
            arguments,
            source,
        }
    }

    /// Convenience constructor for [`Signal::CloseModal`].
    #[must_use]
    pub fn close(component: impl Into<String>, source: Option<String>, key: ModalKey) -> Self {
        Self::CloseModal {
            component: component.into(),
            source,
            key,
        }
    }

    /// Convenience constructor for [`Signal::RefreshList`].
    #[must_use]
    pub fn refresh(source: impl Into<String>) -> Self {
        Self::RefreshList {
            source: source.into(),
        }
    }

    /// Event name the host dispatches this signal under.
    #[must_use]
    pub fn event_name(&self) -> String {
        match self {
            Self::OpenModal { .. } => OPEN_MODAL.to_owned(),
            Self::CloseModal { .. } => CLOSE_MODAL.to_owned(),
            Self::CloseTopModal => CLOSE_TOP_MODAL.to_owned(),
            Self::AllModalsClosed => ALL_MODALS_CLOSED.to_owned(),
            Self::ClearUrlField { .. } => CLEAR_URL_FIELD.to_owned(),
            Self::RefreshList { source } => format!("{REFRESH_LIST_PREFIX}{source}"),
            Self::Selected { event, .. } => event.clone(),
        }
    }

    /// Whether the modal stack manager consumes this signal.
    #[must_use]
    pub fn is_manager_bound(&self) -> bool {
        matches!(
            self,
            Self::OpenModal { .. } | Self::CloseModal { .. } | Self::CloseTopModal
        )
    }
}
