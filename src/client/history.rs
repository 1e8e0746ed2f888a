use std::sync::Arc;

use tracing::warn;

use crate::application::StateStore;
use crate::domain::{DomainError, HistoryEntry, HistoryLog};

/// Storage key for the persisted history sequence.
pub const HISTORY_KEY: &str = "ai_search_history";

/// Bounded query/answer history backed by a [`StateStore`].
///
/// Every mutation persists immediately; the in-memory log is the single
/// source of truth between writes.
pub struct HistoryStore {
    store: Arc<dyn StateStore>,
    log: HistoryLog,
}

impl HistoryStore {
    /// Load the persisted history. A missing key yields an empty log; a
    /// malformed one is discarded with a warning rather than wedging the
    /// session.
    pub fn load(store: Arc<dyn StateStore>) -> Self {
        let log = match store.get(HISTORY_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<HistoryEntry>>(&json) {
                Ok(entries) => HistoryLog::from_entries(entries),
                Err(e) => {
                    warn!("Discarding malformed history: {e}");
                    HistoryLog::new()
                }
            },
            Ok(None) => HistoryLog::new(),
            Err(e) => {
                warn!("Could not read history: {e}");
                HistoryLog::new()
            }
        };

        Self { store, log }
    }

    /// Prepend a pair and persist. The log is truncated to capacity before
    /// the write, so the stored sequence never exceeds the bound either.
    pub fn record(
        &mut self,
        query: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.log.record(query, answer);
        self.persist()
    }

    /// Drop all entries, in memory and on disk.
    pub fn clear(&mut self) -> Result<(), DomainError> {
        self.log.clear();
        self.store.remove(HISTORY_KEY)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        self.log.entries()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.log.get(index)
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    fn persist(&self) -> Result<(), DomainError> {
        let json = serde_json::to_string(&self.log)
            .map_err(|e| DomainError::storage(format!("encode history: {e}")))?;
        self.store.set(HISTORY_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::MemoryStateStore;
    use crate::domain::HISTORY_CAPACITY;

    #[test]
    fn record_persists_and_reloads() {
        let store = Arc::new(MemoryStateStore::new());

        let mut history = HistoryStore::load(store.clone());
        history.record("q", "a").unwrap();

        let reloaded = HistoryStore::load(store);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get(0).unwrap().query(), "q");
    }

    #[test]
    fn clear_removes_persisted_key() {
        let store = Arc::new(MemoryStateStore::new());

        let mut history = HistoryStore::load(store.clone());
        history.record("q", "a").unwrap();
        history.clear().unwrap();

        assert!(store.get(HISTORY_KEY).unwrap().is_none());
        assert!(HistoryStore::load(store).is_empty());
    }

    #[test]
    fn persisted_sequence_respects_capacity() {
        let store = Arc::new(MemoryStateStore::new());

        let mut history = HistoryStore::load(store.clone());
        for i in 0..HISTORY_CAPACITY + 5 {
            history.record(format!("q{i}"), "a").unwrap();
        }

        let reloaded = HistoryStore::load(store);
        assert_eq!(reloaded.len(), HISTORY_CAPACITY);
        assert_eq!(reloaded.get(0).unwrap().query(), "q54");
    }

    #[test]
    fn malformed_history_is_discarded() {
        let store = Arc::new(MemoryStateStore::new());
        store.set(HISTORY_KEY, "not json").unwrap();

        let history = HistoryStore::load(store);
        assert!(history.is_empty());
    }
}
