//! Credential error types

use thiserror::Error;

use crate::user::Field;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Passwords don't match")]
    PasswordMismatch,

    #[error("{0} is required")]
    MissingField(Field),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Storage error: {0}")]
    Storage(#[from] mindsync_storage::StorageError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CredentialError {
    /// Whether this error came from bad form input rather than a system fault
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CredentialError::PasswordMismatch | CredentialError::MissingField(_)
        )
    }
}
