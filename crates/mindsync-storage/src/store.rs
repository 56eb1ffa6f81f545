//! Key/value storage interface

use crate::Result;

/// Durable key holding the JSON array of registered users.
pub const USERS_KEY: &str = "mindsync_users";

/// Volatile key holding the JSON session record of the logged-in user.
pub const CURRENT_USER_KEY: &str = "mindsync_current_user";

/// String key/value storage with explicit read and write operations.
///
/// Values are opaque strings; callers own the encoding.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
