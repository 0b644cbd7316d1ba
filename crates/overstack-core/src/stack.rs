#![forbid(unsafe_code)]

//! Ordered stack of modal records.
//!
//! The `ModalStack` keeps records in insertion order keyed by
//! [`ModalKey`]. Later records sit visually above earlier ones; the top
//! modal is the most recently inserted record with `show == true`.
//!
//! # Invariants
//!
//! - Keys are unique within the stack.
//! - After [`ModalStack::recompute_top`], at most one record has
//!   `top_modal == true`, and if any record is visible exactly one does:
//!   the last visible record in insertion order.
//! - Removal never reorders surviving records.
//!
//! # Failure Modes
//!
//! - `insert()` with a key already present returns
//!   [`ModalError::DuplicateKey`] and leaves the stack untouched.
//! - `remove()` with a predicate matching nothing is a no-op.
//! - `top_record()` on an empty or fully hidden stack returns `None`.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModalError;
use crate::record::{ModalKey, ModalRecord};

/// Insertion-ordered mapping of key to record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalStack {
    records: IndexMap<ModalKey, ModalRecord>,
}

impl ModalStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Mutation ---

    /// Append a record above every existing one.
    pub fn insert(&mut self, record: ModalRecord) -> Result<(), ModalError> {
        if self.records.contains_key(&record.key) {
            return Err(ModalError::DuplicateKey(record.key));
        }
        self.records.insert(record.key.clone(), record);
        Ok(())
    }

    /// Remove every record matching `predicate`, returning them in
    /// stack order.
    ///
    /// The surviving mapping is rebuilt from the previous one and swapped
    /// in whole, so the predicate never observes a half-updated stack.
    pub fn remove<P>(&mut self, mut predicate: P) -> Vec<ModalRecord>
    where
        P: FnMut(&ModalRecord) -> bool,
    {
        let mut removed = Vec::new();
        let kept: IndexMap<ModalKey, ModalRecord> = std::mem::take(&mut self.records)
            .into_iter()
            .filter_map(|(key, record)| {
                if predicate(&record) {
                    removed.push(record);
                    None
                } else {
                    Some((key, record))
                }
            })
            .collect();
        self.records = kept;
        removed
    }

    /// Clear every top flag, then flag the last visible record.
    pub fn recompute_top(&mut self) {
        let top_key = self
            .records
            .values()
            .rev()
            .find(|record| record.show)
            .map(|record| record.key.clone());

        for record in self.records.values_mut() {
            record.top_modal = top_key.as_ref() == Some(&record.key);
        }

        tracing::trace!(top = ?top_key.as_ref().map(ModalKey::as_str), "recomputed top modal");
    }

    // --- State Queries ---

    /// Whether no record is visible.
    #[must_use]
    pub fn is_empty_of_visible(&self) -> bool {
        !self.records.values().any(|record| record.show)
    }

    /// Number of visible records.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.records.values().filter(|record| record.show).count()
    }

    /// Stacking depth a record inserted now would receive.
    #[must_use]
    pub fn next_iteration(&self) -> u32 {
        u32::try_from(self.visible_count())
            .unwrap_or(u32::MAX)
            .saturating_add(1)
    }

    /// The record flagged as top, if any.
    #[must_use]
    pub fn top_record(&self) -> Option<&ModalRecord> {
        self.records.values().find(|record| record.top_modal)
    }

    /// Look up a record by key.
    #[must_use]
    pub fn get(&self, key: &ModalKey) -> Option<&ModalRecord> {
        self.records.get(key)
    }

    /// Whether a record with this key exists.
    #[must_use]
    pub fn contains(&self, key: &ModalKey) -> bool {
        self.records.contains_key(key)
    }

    /// Total number of records, visible or not.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the stack holds no records at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records from bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ModalRecord> + ExactSizeIterator {
        self.records.values()
    }

    /// Keys from bottom to top.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &ModalKey> + ExactSizeIterator {
        self.records.keys()
    }
}

impl<'a> IntoIterator for &'a ModalStack {
    type Item = &'a ModalRecord;
    type IntoIter = indexmap::map::Values<'a, ModalKey, ModalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}

impl Serialize for ModalStack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records.values())
    }
}

impl<'de> Deserialize<'de> for ModalStack {
    /// Rebuilds the stack record by record, rejecting duplicate keys and
    /// recomputing the top flag rather than trusting the stored one.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = Vec::<ModalRecord>::deserialize(deserializer)?;
        let mut stack = Self::new();
        for record in records {
            stack.insert(record).map_err(D::Error::custom)?;
        }
        stack.recompute_top();
        Ok(stack)
    }
}
