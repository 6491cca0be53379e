use thiserror::Error;

use eyecamp_core::error::StoreError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("not authenticated with the spreadsheet service")]
    NotAuthenticated,

    #[error("no spreadsheet registered for camp {0}")]
    UnknownCamp(String),

    #[error("spreadsheet service returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<ureq::Error> for SyncError {
    fn from(e: ureq::Error) -> Self {
        SyncError::Http(e.to_string())
    }
}

impl From<SyncError> for eyecamp_core::error::HandoffError {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::Store(e) => Self::Store(e),
            other => Self::Rejected(other.to_string()),
        }
    }
}
