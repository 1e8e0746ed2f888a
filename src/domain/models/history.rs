use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Maximum number of entries the history retains. The oldest entry is
/// evicted once the log grows past this bound.
pub const HISTORY_CAPACITY: usize = 50;

/// A persisted query/answer pair. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    query: String,
    answer: String,
    timestamp: String,
}

impl HistoryEntry {
    /// Create an entry stamped with the current time (RFC 3339).
    pub fn new(query: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            answer: answer.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Ordered sequence of [`HistoryEntry`] values, newest first, bounded by
/// [`HISTORY_CAPACITY`]. Serializes as a plain JSON array so the persisted
/// form is directly inspectable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from previously persisted entries, enforcing the capacity
    /// bound in case the stored sequence predates it.
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }

    /// Prepend a new entry for the given pair and return a reference to it.
    /// The oldest entry is dropped when the log is full. No deduplication:
    /// recording the same pair twice yields two entries.
    pub fn record(&mut self, query: impl Into<String>, answer: impl Into<String>) -> &HistoryEntry {
        self.entries.insert(0, HistoryEntry::new(query, answer));
        self.entries.truncate(HISTORY_CAPACITY);
        &self.entries[0]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_prepends_newest_first() {
        let mut log = HistoryLog::new();
        log.record("first", "a1");
        log.record("second", "a2");

        assert_eq!(log.len(), 2);
        assert_eq!(log.get(0).unwrap().query(), "second");
        assert_eq!(log.get(1).unwrap().query(), "first");
    }

    #[test]
    fn record_evicts_oldest_beyond_capacity() {
        let mut log = HistoryLog::new();
        for i in 0..HISTORY_CAPACITY + 1 {
            log.record(format!("q{i}"), format!("a{i}"));
        }

        assert_eq!(log.len(), HISTORY_CAPACITY);
        // Newest at the front, the very first entry gone.
        assert_eq!(log.get(0).unwrap().query(), "q50");
        assert!(log.entries().iter().all(|e| e.query() != "q0"));
    }

    #[test]
    fn record_does_not_deduplicate() {
        let mut log = HistoryLog::new();
        log.record("same", "answer");
        log.record("same", "answer");

        assert_eq!(log.len(), 2);
        assert_eq!(log.get(0).unwrap().query(), log.get(1).unwrap().query());
    }

    #[test]
    fn from_entries_enforces_capacity() {
        let entries: Vec<HistoryEntry> = (0..HISTORY_CAPACITY + 10)
            .map(|i| HistoryEntry::new(format!("q{i}"), "a"))
            .collect();

        let log = HistoryLog::from_entries(entries);
        assert_eq!(log.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn serializes_as_json_array() {
        let mut log = HistoryLog::new();
        log.record("q", "a");

        let json = serde_json::to_string(&log).unwrap();
        assert!(json.starts_with('['));

        let parsed: HistoryLog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get(0).unwrap().answer(), "a");
    }
}
