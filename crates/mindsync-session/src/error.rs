//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Credential error: {0}")]
    Credential(#[from] mindsync_credentials::CredentialError),

    #[error("Storage error: {0}")]
    Storage(#[from] mindsync_storage::StorageError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
