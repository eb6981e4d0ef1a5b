// ============================================================
// Layer 4 — Idiom Store
// ============================================================
// The in-memory dictionary: phrase → IdiomRecord.
//
// Backed by an IndexMap so iteration follows insertion order.
// The matcher scans in that order and the first hit wins, so the
// order has to be deterministic.
//
// Re-inserting an existing phrase replaces its record but keeps
// the phrase's original position (last-write-wins on content,
// first-write-wins on position).
//
// The store has no public mutation API. It is built once, via
// FromIterator or the loader, then shared read-only (Arc) by
// every caller.

use indexmap::IndexMap;

use crate::domain::idiom::IdiomRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdiomStore {
    entries: IndexMap<String, IdiomRecord>,
}

impl IdiomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Crate-private: only loaders build stores.
    pub(crate) fn insert(&mut self, record: IdiomRecord) {
        self.entries.insert(record.phrase.clone(), record);
    }

    pub fn get(&self, phrase: &str) -> Option<&IdiomRecord> {
        self.entries.get(phrase)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Phrases in scan order
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<IdiomRecord> for IdiomStore {
    fn from_iter<T: IntoIterator<Item = IdiomRecord>>(iter: T) -> Self {
        let mut store = Self::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}
