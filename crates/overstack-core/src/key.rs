#![forbid(unsafe_code)]

//! Key generation for new modal records.
//!
//! # Invariants
//!
//! - Two calls in the same process never feed identical input to the hash:
//!   a process-wide counter is mixed in alongside the arguments and the
//!   wall-clock timestamp.
//! - Keys carry no ordering meaning; the stack's insertion order does.
//!
//! # Failure Modes
//!
//! Generation never fails. If the arguments cannot be serialized the
//! failure is logged and the key is derived from the counter and
//! timestamp alone.

use std::sync::atomic::{AtomicU64, Ordering};

use web_time::{SystemTime, UNIX_EPOCH};

use crate::record::{Arguments, ModalKey};

/// Number of hex characters kept from the digest.
const KEY_HEX_LEN: usize = 32;

/// Global counter mixed into every generated key.
static KEY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Produces the key for a record about to be inserted.
pub trait KeyGenerator {
    /// Generate a key for a record opened with `arguments`.
    fn generate(&self, arguments: &Arguments) -> ModalKey;
}

impl<F> KeyGenerator for F
where
    F: Fn(&Arguments) -> ModalKey,
{
    fn generate(&self, arguments: &Arguments) -> ModalKey {
        self(arguments)
    }
}

/// Default generator: BLAKE3 over serialized arguments, a monotonic
/// counter and a nanosecond timestamp.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashKeyGenerator;

impl HashKeyGenerator {
    /// Create the generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl KeyGenerator for HashKeyGenerator {
    fn generate(&self, arguments: &Arguments) -> ModalKey {
        let mut hasher = blake3::Hasher::new();
        if let Err(err) = serde_json::to_writer(&mut hasher, arguments) {
            tracing::warn!(error = %err, "modal arguments not hashable, keying on counter only");
        }
        let counter = KEY_COUNTER.fetch_add(1, Ordering::Relaxed);
        hasher.update(&counter.to_le_bytes());
        hasher.update(&timestamp_nanos().to_le_bytes());

        let digest = hasher.finalize();
        let hex = digest.to_hex();
        ModalKey::new(&hex.as_str()[..KEY_HEX_LEN])
    }
}

fn timestamp_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
}
