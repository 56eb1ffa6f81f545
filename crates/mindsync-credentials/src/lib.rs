//! MindSync Credential Store
//!
//! Registered users live as one JSON array under the durable
//! `mindsync_users` key. Passwords are never stored: each record keeps a
//! salted PBKDF2-HMAC-SHA256 hash instead.

mod error;
mod password;
mod store;
mod user;

pub use error::CredentialError;
pub use password::{constant_time_eq, PasswordHash, DEFAULT_HASH_ITERATIONS};
pub use store::CredentialStore;
pub use user::{Field, RegistrationForm, User, UserProfile};

pub type Result<T> = std::result::Result<T, CredentialError>;
