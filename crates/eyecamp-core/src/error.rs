use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid choice '{value}' for {field}")]
    InvalidChoice { field: &'static str, value: String },
}

/// Refraction notation that does not follow the `±xDS/±yDCxA` grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("expected '+' or '-' at position {0}")]
    MissingSign(usize),

    #[error("expected a magnitude at position {0}")]
    MissingMagnitude(usize),

    #[error("expected '{expected}' at position {position}")]
    MissingUnit {
        expected: &'static str,
        position: usize,
    },

    #[error("expected an axis after 'x' at position {0}")]
    MissingAxis(usize),

    #[error("unexpected trailing input at position {0}")]
    Trailing(usize),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage quota exceeded writing {key} ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A finalized record could not be handed to its downstream collaborator.
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("record has no camp id")]
    MissingCamp,

    #[error("record hand-off failed: {0}")]
    Rejected(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
