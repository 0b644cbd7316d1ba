#![forbid(unsafe_code)]

//! Session-scoped boolean preferences.
//!
//! The host keeps per-session flags (today only the fullscreen display
//! preference) in whatever store it already has. The manager only needs
//! `get`/`set`/`clear` on a string key.

use ahash::AHashSet;

/// Key-value store for session-scoped boolean flags.
pub trait SessionStore {
    /// Whether the flag is currently set.
    fn get(&self, key: &str) -> bool;
    /// Set the flag.
    fn set(&mut self, key: &str);
    /// Remove the flag.
    fn clear(&mut self, key: &str);
}

/// In-memory session store.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    flags: AHashSet<String>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> bool {
        self.flags.contains(key)
    }

    fn set(&mut self, key: &str) {
        self.flags.insert(key.to_owned());
    }

    fn clear(&mut self, key: &str) {
        self.flags.remove(key);
    }
}

/// Flip a flag, returning its new value.
pub fn toggle(store: &mut impl SessionStore, key: &str) -> bool {
    if store.get(key) {
        store.clear(key);
        false
    } else {
        store.set(key);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flag_reads_false() {
        let store = MemorySessionStore::new();
        assert!(!store.get("modal_fullscreen"));
    }

    #[test]
    fn toggle_sets_then_clears() {
        let mut store = MemorySessionStore::new();
        assert!(toggle(&mut store, "modal_fullscreen"));
        assert!(store.get("modal_fullscreen"));
        assert!(!toggle(&mut store, "modal_fullscreen"));
        assert!(!store.get("modal_fullscreen"));
    }

    #[test]
    fn flags_are_independent() {
        let mut store = MemorySessionStore::new();
        store.set("a");
        assert!(store.get("a"));
        assert!(!store.get("b"));
        store.clear("b");
        assert!(store.get("a"));
    }
}
