#![forbid(unsafe_code)]

//! Modal stack orchestration for Overstack.
//!
//! Views ask for a named content component to be shown as a stacked
//! overlay by emitting [`Signal::OpenModal`]. The [`ModalStackManager`]
//! owns the ordered [`ModalStack`], keeps exactly one visible record
//! flagged as the top modal, and reports the cleanup signals hosts must
//! forward when overlays are dismissed.
//!
//! # Example
//!
//! ```
//! use overstack_core::{Arguments, ModalStackManager, Signal};
//!
//! let mut manager = ModalStackManager::new();
//! let key = manager
//!     .open("customer-detail", Arguments::new(), Some("customers-list".into()))
//!     .unwrap();
//! assert_eq!(manager.stack().top_record().map(|r| &r.key), Some(&key));
//!
//! let emitted = manager.close_top();
//! assert_eq!(
//!     emitted,
//!     vec![
//!         Signal::AllModalsClosed,
//!         Signal::RefreshList { source: "customers-list".into() },
//!     ]
//! );
//! ```

pub mod config;
pub mod error;
pub mod key;
pub mod manager;
pub mod record;
pub mod registry;
pub mod session;
pub mod signal;
pub mod stack;

pub use config::ManagerConfig;
pub use error::{ConfigError, ModalError, ProbeError};
pub use key::{HashKeyGenerator, KeyGenerator};
pub use manager::ModalStackManager;
pub use record::{Arguments, ModalKey, ModalRecord};
pub use registry::{ComponentRegistry, ContentComponent, UrlFieldProbe};
pub use session::{MemorySessionStore, SessionStore};
pub use signal::Signal;
pub use stack::ModalStack;
