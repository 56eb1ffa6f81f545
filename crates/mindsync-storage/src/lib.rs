//! MindSync Storage Layer
//!
//! Two kinds of key/value storage back the account layer:
//! - durable storage (SQLite) that survives restarts, holding registered users
//! - volatile storage (in memory) scoped to one browsing session, holding the
//!   active login
//!
//! Both implement [`KeyValueStore`] so callers never reach for a global.

mod database;
mod error;
mod memory;
mod migrations;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use store::{KeyValueStore, CURRENT_USER_KEY, USERS_KEY};

pub type Result<T> = std::result::Result<T, StorageError>;
