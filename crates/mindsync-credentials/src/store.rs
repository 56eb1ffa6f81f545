//! Credential Store
//!
//! The whole user collection is read, modified and written back on every
//! registration. A write lock shared by all clones keeps concurrent
//! registrations from losing each other's records.

use parking_lot::Mutex;
use std::sync::Arc;

use mindsync_storage::{KeyValueStore, USERS_KEY};

use crate::error::CredentialError;
use crate::password::{PasswordHash, DEFAULT_HASH_ITERATIONS};
use crate::user::{RegistrationForm, User, UserProfile};
use crate::Result;

pub struct CredentialStore<S> {
    storage: S,
    write_lock: Arc<Mutex<()>>,
    hash_iterations: u32,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_iterations(storage, DEFAULT_HASH_ITERATIONS)
    }

    pub fn with_iterations(storage: S, hash_iterations: u32) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
            hash_iterations: hash_iterations.max(1),
        }
    }

    /// Load every stored user. An absent key is an empty collection.
    fn load_users(&self) -> Result<Vec<User>> {
        match self.storage.get_item(USERS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the stored collection in full
    fn save_users(&self, users: &[User]) -> Result<()> {
        let json = serde_json::to_string(users)?;
        self.storage.set_item(USERS_KEY, &json)?;
        Ok(())
    }

    /// Register a new user.
    ///
    /// Fails without touching storage when the passwords differ, a field
    /// is blank, or the email is already registered.
    pub fn register(&self, form: &RegistrationForm) -> Result<UserProfile> {
        if let Err(e) = form.validate() {
            tracing::warn!(email = %form.email, error = %e, "Registration rejected");
            return Err(e);
        }

        let _guard = self.write_lock.lock();

        let mut users = self.load_users()?;
        if users.iter().any(|u| u.email == form.email) {
            tracing::warn!(email = %form.email, "Registration rejected: email already registered");
            return Err(CredentialError::DuplicateEmail(form.email.clone()));
        }

        let password = PasswordHash::generate(&form.password, self.hash_iterations);
        let user = User::new(form.name.clone(), form.email.clone(), password);
        let profile = user.profile();

        users.push(user);
        self.save_users(&users)?;

        tracing::info!(
            email = %profile.email,
            user_count = users.len(),
            "Registered user"
        );

        Ok(profile)
    }

    /// Find the first user whose email and password both match.
    pub fn verify(&self, email: &str, password: &str) -> Result<Option<UserProfile>> {
        let users = self.load_users()?;

        let mut candidates = users.iter().filter(|u| u.email == email).peekable();
        if candidates.peek().is_none() {
            PasswordHash::dummy_verify(password, self.hash_iterations);
            return Ok(None);
        }

        Ok(candidates
            .find(|u| u.password.verify(password))
            .map(User::profile))
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        Ok(self
            .load_users()?
            .iter()
            .find(|u| u.email == email)
            .map(User::profile))
    }

    /// All registered users, in registration order
    pub fn list_users(&self) -> Result<Vec<UserProfile>> {
        Ok(self.load_users()?.iter().map(User::profile).collect())
    }

    pub fn user_count(&self) -> Result<usize> {
        Ok(self.load_users()?.len())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: Clone> Clone for CredentialStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            write_lock: Arc::clone(&self.write_lock),
            hash_iterations: self.hash_iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindsync_storage::{Database, MemoryStore};
    use std::thread;

    fn store() -> CredentialStore<MemoryStore> {
        CredentialStore::with_iterations(MemoryStore::new(), 10)
    }

    fn form(name: &str, email: &str, password: &str) -> RegistrationForm {
        RegistrationForm::new(name, email, password, password)
    }

    #[test]
    fn test_register_then_verify() {
        let store = store();
        let profile = store.register(&form("Alice", "a@x.com", "p1")).unwrap();
        assert_eq!(profile.name, "Alice");
        assert_eq!(store.user_count().unwrap(), 1);

        let found = store.verify("a@x.com", "p1").unwrap().unwrap();
        assert_eq!(found, profile);
        assert!(store.verify("a@x.com", "wrong").unwrap().is_none());
        assert!(store.verify("nobody@x.com", "p1").unwrap().is_none());
    }

    #[test]
    fn test_whitespace_password_registers_and_verifies() {
        let store = store();
        store
            .register(&RegistrationForm::new("Alice", "a@x.com", "   ", "   "))
            .unwrap();
        assert_eq!(store.user_count().unwrap(), 1);
        assert!(store.verify("a@x.com", "   ").unwrap().is_some());
        assert!(store.verify("a@x.com", "").unwrap().is_none());
    }

    #[test]
    fn test_find_by_email() {
        let store = store();
        store.register(&form("Alice", "a@x.com", "p1")).unwrap();

        let found = store.find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(found.name, "Alice");
        assert!(store.find_by_email("A@x.com").unwrap().is_none());
    }

    #[test]
    fn test_password_mismatch_adds_nothing() {
        let store = store();
        let result = store.register(&RegistrationForm::new("Alice", "a@x.com", "p1", "p2"));
        assert!(matches!(result, Err(CredentialError::PasswordMismatch)));
        assert_eq!(store.user_count().unwrap(), 0);
        assert_eq!(store.storage().get_item(USERS_KEY).unwrap(), None);
    }

    #[test]
    fn test_duplicate_email_keeps_first_record() {
        let store = store();
        store.register(&form("Bob", "b@x.com", "q")).unwrap();

        let result = store.register(&form("Bob2", "b@x.com", "r"));
        assert!(matches!(result, Err(CredentialError::DuplicateEmail(e)) if e == "b@x.com"));

        let users = store.list_users().unwrap();
        let bobs: Vec<_> = users.iter().filter(|u| u.email == "b@x.com").collect();
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].name, "Bob");
        assert!(store.verify("b@x.com", "r").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_after_many_registrations() {
        let store = store();
        for i in 0..5 {
            store
                .register(&form("User", &format!("u{i}@x.com"), "pw"))
                .unwrap();
        }

        assert!(store.register(&form("Again", "u0@x.com", "pw")).is_err());
        assert!(store.register(&form("Again", "u4@x.com", "pw")).is_err());
        assert_eq!(store.user_count().unwrap(), 5);
    }

    #[test]
    fn test_email_match_is_case_sensitive() {
        let store = store();
        store.register(&form("Alice", "a@x.com", "p1")).unwrap();
        store.register(&form("Alice", "A@x.com", "p1")).unwrap();
        assert_eq!(store.user_count().unwrap(), 2);
        assert!(store.verify("A@X.COM", "p1").unwrap().is_none());
    }

    #[test]
    fn test_registration_preserves_prior_records() {
        let store = store();
        store.register(&form("Alice", "a@x.com", "p1")).unwrap();
        store.register(&form("Bob", "b@x.com", "q")).unwrap();

        let emails: Vec<_> = store
            .list_users()
            .unwrap()
            .into_iter()
            .map(|u| u.email)
            .collect();
        assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
        assert!(store.verify("a@x.com", "p1").unwrap().is_some());
    }

    #[test]
    fn test_plaintext_password_never_stored() {
        let store = store();
        store
            .register(&form("Alice", "a@x.com", "correct-horse"))
            .unwrap();

        let raw = store.storage().get_item(USERS_KEY).unwrap().unwrap();
        assert!(!raw.contains("correct-horse"));
        assert!(!raw.contains("\"password\""));
        assert!(raw.contains("\"passwordHash\""));
    }

    #[test]
    fn test_corrupt_collection_is_an_error() {
        let storage = MemoryStore::new();
        storage.set_item(USERS_KEY, "not json").unwrap();
        let store = CredentialStore::with_iterations(storage, 10);

        assert!(matches!(
            store.register(&form("Alice", "a@x.com", "p1")),
            Err(CredentialError::Json(_))
        ));
        assert_eq!(
            store.storage().get_item(USERS_KEY).unwrap().as_deref(),
            Some("not json")
        );
    }

    #[test]
    fn test_concurrent_registrations_are_not_lost() {
        let store = store();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                thread::spawn(move || {
                    store
                        .register(&form("User", &format!("u{i}@x.com"), "pw"))
                        .unwrap();
                    // Everyone also races on one shared email
                    let _ = store.register(&form("Shared", "shared@x.com", "pw"));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.user_count().unwrap(), 9);
    }

    #[test]
    fn test_backed_by_database() {
        let db = Database::open_in_memory().unwrap();
        let store = CredentialStore::with_iterations(db.clone(), 10);
        store.register(&form("Alice", "a@x.com", "p1")).unwrap();

        let reopened = CredentialStore::with_iterations(db, 10);
        assert!(reopened.verify("a@x.com", "p1").unwrap().is_some());
    }
}
