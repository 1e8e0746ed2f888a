use crate::domain::DomainError;

/// Durable key/value persistence for small client-side state (theme, history).
///
/// The browser-storage shape — `get` returns the stored string or nothing —
/// so the same controller logic targets files in production and an in-memory
/// map in tests without modification.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), DomainError>;
}
