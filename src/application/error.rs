use thiserror::Error;

use crate::domain::models::usage::format_mb;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Absent or owned by someone else; the two are deliberately indistinguishable.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("{}", quota_message(.used, .limit))]
    QuotaExceeded { used: u64, limit: u64 },

    #[error("File too large")]
    PayloadTooLarge,

    #[error("Share link has expired")]
    Expired,

    #[error("Upload failed: {0}")]
    UploadError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

fn quota_message(used: &u64, limit: &u64) -> String {
    format!(
        "Storage quota exceeded. You have used {} MB of {} MB. This file would exceed your limit.",
        format_mb(*used),
        limit / (1024 * 1024)
    )
}

impl From<tokio::task::JoinError> for ApplicationError {
    fn from(error: tokio::task::JoinError) -> Self {
        ApplicationError::InternalError(format!("Blocking task failed: {}", error))
    }
}
