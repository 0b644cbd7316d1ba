#![forbid(unsafe_code)]

//! The modal stack manager: the state machine views talk to.
//!
//! The manager has no state beyond its [`ModalStack`]. Each operation is
//! one atomic step: it mutates the stack, recomputes the top flag, and
//! returns the signals the host must dispatch, in emission order.
//!
//! | operation | effect | emitted |
//! |-----------|--------|---------|
//! | `open` | insert a visible record at depth `visible + 1` | nothing |
//! | `close` | remove records matching name and key | `AllModalsClosed` when nothing visible remains |
//! | `close_top` | clear URL fields, then `close` the top record | `ClearUrlField`*, `close` output, `RefreshList` if the record had a source |
//!
//! # Failure Modes
//!
//! - `close` for a name/key pair that matches nothing only recomputes the top.
//! - `close_top` on an empty or fully hidden stack does nothing and emits nothing.
//! - URL-field probe errors and panics are swallowed; cleanup for that
//!   record is skipped and the close proceeds.

use core::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::config::ManagerConfig;
use crate::error::{ModalError, ProbeError};
use crate::key::{HashKeyGenerator, KeyGenerator};
use crate::record::{Arguments, ModalKey, ModalRecord};
use crate::registry::UrlFieldProbe;
use crate::session::{self, SessionStore};
use crate::signal::Signal;
use crate::stack::ModalStack;

/// Per-session modal orchestrator.
pub struct ModalStackManager<G = HashKeyGenerator> {
    stack: ModalStack,
    keys: G,
    probe: Option<Box<dyn UrlFieldProbe>>,
    config: ManagerConfig,
}

impl Default for ModalStackManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalStackManager {
    /// Create a manager with the default key generator and configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    /// Create a manager with the default key generator.
    #[must_use]
    pub fn with_config(config: ManagerConfig) -> Self {
        Self {
            stack: ModalStack::new(),
            keys: HashKeyGenerator::new(),
            probe: None,
            config,
        }
    }
}

impl<G> fmt::Debug for ModalStackManager<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalStackManager")
            .field("stack", &self.stack)
            .field("has_probe", &self.probe.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<G: KeyGenerator> ModalStackManager<G> {
    /// Swap the key generator.
    #[must_use]
    pub fn with_key_generator<H: KeyGenerator>(self, keys: H) -> ModalStackManager<H> {
        ModalStackManager {
            stack: self.stack,
            keys,
            probe: self.probe,
            config: self.config,
        }
    }

    /// Install the URL-bound field probe consulted by `close_top`.
    #[must_use]
    pub fn with_probe(mut self, probe: impl UrlFieldProbe + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Resume from a previously persisted stack.
    #[must_use]
    pub fn with_stack(mut self, mut stack: ModalStack) -> Self {
        stack.recompute_top();
        self.stack = stack;
        self
    }

    /// The current stack, always with a settled top flag.
    #[inline]
    #[must_use]
    pub fn stack(&self) -> &ModalStack {
        &self.stack
    }

    /// Active configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    // --- Transitions ---

    /// Stack `component` above every open overlay.
    ///
    /// Returns the new record's key.
    pub fn open(
        &mut self,
        component: impl Into<String>,
        arguments: Arguments,
        source: Option<String>,
    ) -> Result<ModalKey, ModalError> {
        let component = component.into();
        let key = self.keys.generate(&arguments);
        let iteration = self.stack.next_iteration();

        let record = ModalRecord::new(key.clone(), component, arguments, source, iteration);
        tracing::debug!(
            component = %record.component_name,
            key = %key,
            iteration,
            source = ?record.source,
            "open modal"
        );
        self.stack.insert(record)?;
        self.stack.recompute_top();
        Ok(key)
    }

    /// Close the record matching both `component` and `key`.
    ///
    /// `source` is accepted for signal compatibility; refresh targeting is
    /// done by `close_top` from the record itself.
    pub fn close(
        &mut self,
        component: &str,
        source: Option<&str>,
        key: &ModalKey,
    ) -> Vec<Signal> {
        let removed = self.stack.remove(|record| record.matches(component, key));
        self.stack.recompute_top();

        tracing::debug!(
            component,
            key = %key,
            source,
            removed = removed.len(),
            depth = self.stack.len(),
            "close modal"
        );

        if self.stack.is_empty_of_visible() {
            vec![Signal::AllModalsClosed]
        } else {
            Vec::new()
        }
    }

    /// Close whichever record is on top.
    pub fn close_top(&mut self) -> Vec<Signal> {
        let Some(top) = self.stack.top_record() else {
            tracing::debug!("close top modal: nothing visible");
            return Vec::new();
        };
        let component = top.component_name.clone();
        let source = top.source.clone();
        let key = top.key.clone();

        let mut emitted: Vec<Signal> = self
            .url_fields_to_clear(&component)
            .into_iter()
            .map(|field| Signal::ClearUrlField { field })
            .collect();

        emitted.extend(self.close(&component, source.as_deref(), &key));

        if let Some(source) = source {
            emitted.push(Signal::RefreshList { source });
        }
        emitted
    }

    /// Apply one signal, returning what it emitted.
    ///
    /// Signals not addressed to the manager emit nothing. A failed open is
    /// logged and emits nothing.
    pub fn handle(&mut self, signal: Signal) -> Vec<Signal> {
        let _span = tracing::debug_span!("modal_signal", signal = %signal.event_name()).entered();

        match signal {
            Signal::OpenModal {
                component,
                arguments,
                source,
            } => {
                if let Err(err) = self.open(component, arguments, source) {
                    tracing::warn!(error = %err, "open modal rejected");
                }
                Vec::new()
            }
            Signal::CloseModal {
                component,
                source,
                key,
            } => self.close(&component, source.as_deref(), &key),
            Signal::CloseTopModal => self.close_top(),
            _ => Vec::new(),
        }
    }

    /// Process a batch of bus signals in emission order.
    ///
    /// Manager-bound signals are applied and replaced by whatever they
    /// emit; every other signal is forwarded unchanged in its original
    /// position.
    pub fn pump(&mut self, signals: impl IntoIterator<Item = Signal>) -> Vec<Signal> {
        let mut out = Vec::new();
        for signal in signals {
            if signal.is_manager_bound() {
                out.extend(self.handle(signal));
            } else {
                out.push(signal);
            }
        }
        out
    }

    /// Flip the session fullscreen preference, returning its new value.
    pub fn toggle_fullscreen(&self, store: &mut impl SessionStore) -> bool {
        let enabled = session::toggle(store, &self.config.fullscreen_session_key);
        tracing::debug!(enabled, "toggle modal fullscreen");
        enabled
    }

    /// Whether the session prefers fullscreen modals.
    #[must_use]
    pub fn is_fullscreen(&self, store: &impl SessionStore) -> bool {
        store.get(&self.config.fullscreen_session_key)
    }

    /// URL-bound fields of `component` that must be cleared on close.
    ///
    /// Best effort: an unknown component, a failing factory or a panic
    /// inside component code yields an empty list.
    fn url_fields_to_clear(&self, component: &str) -> Vec<String> {
        let Some(probe) = self.probe.as_deref() else {
            return Vec::new();
        };

        let probed = panic::catch_unwind(AssertUnwindSafe(|| probe.url_fields(component)))
            .unwrap_or_else(|_| Err(ProbeError::Panicked(component.to_owned())));

        match probed {
            Ok(fields) => fields
                .into_iter()
                .filter(|field| !self.config.preserves_url_field(field))
                .collect(),
            Err(err) => {
                tracing::debug!(component, error = %err, "skipping URL field cleanup");
                Vec::new()
            }
        }
    }
}
