//! Session Manager
//!
//! Owns the single session record in volatile storage.

use rand::rngs::OsRng;
use rand::RngCore;

use mindsync_credentials::CredentialStore;
use mindsync_storage::{KeyValueStore, CURRENT_USER_KEY};

use crate::error::SessionError;
use crate::session::SessionRecord;
use crate::Result;

/// Token byte length before hex encoding.
const TOKEN_BYTES: usize = 32;

/// What a successful login hands back to the caller.
///
/// `token` is shown exactly once; only its digest is stored.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub session: SessionRecord,
    pub token: String,
}

pub struct SessionManager<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionManager<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Log in with an email and password checked against `credentials`.
    ///
    /// On failure nothing is written and any existing session stays as it was.
    pub fn login<D: KeyValueStore>(
        &self,
        credentials: &CredentialStore<D>,
        email: &str,
        password: &str,
    ) -> Result<LoginGrant> {
        let profile = match credentials.verify(email, password)? {
            Some(profile) => profile,
            None => {
                tracing::warn!(email = %email, "Login rejected: invalid credentials");
                return Err(SessionError::InvalidCredentials);
            }
        };

        let token = generate_token();
        let session = SessionRecord::new(profile, &token);
        self.save_session(&session)?;

        tracing::info!(email = %session.email, "Logged in");

        Ok(LoginGrant { session, token })
    }

    fn save_session(&self, session: &SessionRecord) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.storage.set_item(CURRENT_USER_KEY, &json)?;
        Ok(())
    }

    /// Read the stored record, whatever its login flag says
    fn load_session(&self) -> Option<SessionRecord> {
        let json = match self.storage.get_item(CURRENT_USER_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!("Failed to read session record: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Ignoring malformed session record: {}", e);
                None
            }
        }
    }

    /// Whether a logged-in session record is present. Never fails.
    pub fn is_authenticated(&self) -> bool {
        self.current_session().is_some()
    }

    /// The active session, if logged in
    pub fn current_session(&self) -> Option<SessionRecord> {
        self.load_session().filter(|s| s.is_logged_in)
    }

    /// The active session if `token` was issued for it
    pub fn validate_token(&self, token: &str) -> Option<SessionRecord> {
        self.current_session().filter(|s| s.matches_token(token))
    }

    /// Remove the session record. Safe to call when logged out.
    pub fn logout(&self) -> Result<()> {
        let email = self.load_session().map(|s| s.email);
        self.storage.remove_item(CURRENT_USER_KEY)?;

        match email {
            Some(email) => tracing::info!(email = %email, "Logged out"),
            None => tracing::debug!("Logout with no active session"),
        }

        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: Clone> Clone for SessionManager<S> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
