//! MindSync Core
//!
//! Central coordination layer for the account flow: registration, login,
//! logout, and which view the user lands on after each.

mod app;
mod config;
mod error;
mod navigation;

pub use app::App;
pub use config::Config;
pub use error::CoreError;
pub use navigation::{Navigation, View};

// Re-export core components
pub use mindsync_credentials::{
    CredentialError, CredentialStore, Field, RegistrationForm, UserProfile,
    DEFAULT_HASH_ITERATIONS,
};
pub use mindsync_session::{LoginGrant, SessionError, SessionManager, SessionRecord};
pub use mindsync_storage::{
    Database, KeyValueStore, MemoryStore, StorageError, CURRENT_USER_KEY, USERS_KEY,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
