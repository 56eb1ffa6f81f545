//! Core error types

use thiserror::Error;

use mindsync_credentials::CredentialError;
use mindsync_session::SessionError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] mindsync_storage::StorageError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Whether the user can fix this by resubmitting the form
    pub fn is_user_error(&self) -> bool {
        match self {
            CoreError::Credential(e) => credential_is_user_error(e),
            CoreError::Session(SessionError::InvalidCredentials) => true,
            CoreError::Session(SessionError::Credential(e)) => credential_is_user_error(e),
            _ => false,
        }
    }

    /// Text for the blocking notification shown to the user
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Credential(e) | CoreError::Session(SessionError::Credential(e)) => {
                credential_message(e)
            }
            CoreError::Session(SessionError::InvalidCredentials) => {
                "Invalid email or password!".to_string()
            }
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

fn credential_is_user_error(e: &CredentialError) -> bool {
    e.is_validation() || matches!(e, CredentialError::DuplicateEmail(_))
}

fn credential_message(e: &CredentialError) -> String {
    match e {
        CredentialError::PasswordMismatch => "Passwords don't match!".to_string(),
        CredentialError::MissingField(field) => format!("{field} is required."),
        CredentialError::DuplicateEmail(_) => "Email already registered!".to_string(),
        _ => "Something went wrong. Please try again.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindsync_credentials::Field;

    #[test]
    fn test_user_messages() {
        let mismatch = CoreError::from(CredentialError::PasswordMismatch);
        assert!(mismatch.is_user_error());
        assert_eq!(mismatch.user_message(), "Passwords don't match!");

        let duplicate = CoreError::from(CredentialError::DuplicateEmail("b@x.com".into()));
        assert_eq!(duplicate.user_message(), "Email already registered!");

        let missing = CoreError::from(CredentialError::MissingField(Field::Email));
        assert_eq!(missing.user_message(), "Email is required.");

        let invalid = CoreError::from(SessionError::InvalidCredentials);
        assert!(invalid.is_user_error());
        assert_eq!(invalid.user_message(), "Invalid email or password!");
    }

    #[test]
    fn test_system_faults_are_not_user_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CoreError::from(io);
        assert!(!err.is_user_error());
        assert_eq!(err.user_message(), "Something went wrong. Please try again.");

        let json = serde_json::from_str::<u32>("x").unwrap_err();
        let err = CoreError::from(SessionError::Credential(CredentialError::Json(json)));
        assert!(!err.is_user_error());
    }
}
