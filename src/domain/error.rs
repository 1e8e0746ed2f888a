use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Completion error: {0}")]
    CompletionError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn completion(msg: impl Into<String>) -> Self {
        Self::CompletionError(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }

    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::ClipboardError(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_completion_error(&self) -> bool {
        matches!(self, Self::CompletionError(_))
    }

    /// The user-facing message: the inner diagnostic for message-bearing
    /// variants, the full `Display` form otherwise.
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidInput(m)
            | Self::CompletionError(m)
            | Self::TransportError(m)
            | Self::StorageError(m)
            | Self::ClipboardError(m) => m.clone(),
            other => other.to_string(),
        }
    }
}
