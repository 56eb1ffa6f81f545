//! Main application state container
//!
//! Owns both stores: durable for registered users, volatile for the active
//! login. The front end only renders what these operations return.

use std::sync::Arc;

use mindsync_credentials::{CredentialStore, RegistrationForm, UserProfile};
use mindsync_session::{LoginGrant, SessionManager, SessionRecord};
use mindsync_storage::{Database, KeyValueStore, MemoryStore};

use crate::config::Config;
use crate::error::CoreError;
use crate::navigation::{Navigation, View};
use crate::Result;

type SharedStore = Arc<dyn KeyValueStore>;

pub struct App {
    /// Configuration
    config: Config,
    /// Registered users
    credentials: CredentialStore<SharedStore>,
    /// Active login for this browsing session
    sessions: SessionManager<SharedStore>,
}

impl App {
    /// Open the durable database named by `config` and start a fresh
    /// browsing session
    pub fn new(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::open(&config.database_path)?;

        tracing::info!(
            database = %config.database_path.display(),
            "Opened durable storage"
        );

        Ok(Self::with_stores(config, Arc::new(db), Arc::new(MemoryStore::new())))
    }

    /// Build on caller-supplied stores
    pub fn with_stores(config: Config, durable: SharedStore, volatile: SharedStore) -> Self {
        let credentials = CredentialStore::with_iterations(durable, config.hash_iterations);
        let sessions = SessionManager::new(volatile);

        Self {
            config,
            credentials,
            sessions,
        }
    }

    /// In-memory durable and volatile stores
    pub fn in_memory(config: Config) -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self::with_stores(config, Arc::new(db), Arc::new(MemoryStore::new())))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialStore<SharedStore> {
        &self.credentials
    }

    pub fn session_manager(&self) -> &SessionManager<SharedStore> {
        &self.sessions
    }

    // === Account operations ===

    /// Register a user, then send them to the login view
    pub fn register(&self, form: &RegistrationForm) -> Result<Navigation<UserProfile>> {
        let profile = self.credentials.register(form).map_err(log_fault)?;
        Ok(Navigation::new(profile, View::Login))
    }

    /// Log in, then send the user to the dashboard
    pub fn login(&self, email: &str, password: &str) -> Result<Navigation<LoginGrant>> {
        let grant = self
            .sessions
            .login(&self.credentials, email, password)
            .map_err(log_fault)?;
        Ok(Navigation::new(grant, View::Dashboard))
    }

    /// Log out, then send the user to the landing view
    pub fn logout(&self) -> Result<Navigation<()>> {
        self.sessions.logout().map_err(log_fault)?;
        Ok(Navigation::new((), View::Landing))
    }

    pub fn is_authenticated(&self) -> bool {
        self.sessions.is_authenticated()
    }

    pub fn current_session(&self) -> Option<SessionRecord> {
        self.sessions.current_session()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.current_session().map(|s| s.profile())
    }

    pub fn validate_token(&self, token: &str) -> Option<UserProfile> {
        self.sessions.validate_token(token).map(|s| s.profile())
    }

    pub fn list_users(&self) -> Result<Vec<UserProfile>> {
        Ok(self.credentials.list_users()?)
    }

    pub fn find_user(&self, email: &str) -> Result<Option<UserProfile>> {
        Ok(self.credentials.find_by_email(email)?)
    }

    /// The view actually shown when `requested` is asked for by a client
    /// holding `token`. Protected views need a token issued for the active
    /// session.
    pub fn guard(&self, requested: View, token: Option<&str>) -> View {
        let authorized = token.and_then(|t| self.validate_token(t)).is_some();
        if requested.requires_auth() && !authorized {
            tracing::debug!(requested = %requested, "Redirecting unauthenticated user to login");
            View::Login
        } else {
            requested
        }
    }
}

/// Log system faults; user errors go back to the form untouched
fn log_fault<E: Into<CoreError>>(e: E) -> CoreError {
    let err = e.into();
    if !err.is_user_error() {
        tracing::error!("Account operation failed: {}", err);
    }
    err
}
