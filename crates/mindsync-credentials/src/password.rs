//! Password hashing
//!
//! PBKDF2-HMAC-SHA256 with a random per-user salt. The iteration count is
//! stored next to each hash so raising it later never locks out existing
//! users.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

/// Iteration count for newly registered users.
pub const DEFAULT_HASH_ITERATIONS: u32 = 100_000;

/// Salt byte length before hex encoding.
const SALT_BYTES: usize = 16;

/// Derived key length in bytes.
const HASH_BYTES: usize = 32;

/// A salted password hash, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordHash {
    pub password_hash: String,
    pub salt: String,
    pub iterations: u32,
}

impl PasswordHash {
    /// Hash `password` under a freshly generated salt
    pub fn generate(password: &str, iterations: u32) -> Self {
        let salt = generate_salt();
        let password_hash = derive(password, &salt, iterations);
        Self {
            password_hash,
            salt,
            iterations,
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        let attempt = derive(password, &self.salt, self.iterations);
        constant_time_eq(self.password_hash.as_bytes(), attempt.as_bytes())
    }

    /// Burn the same work as a real verification when there is nothing to
    /// verify against, so unknown emails can't be told apart by timing.
    pub fn dummy_verify(password: &str, iterations: u32) {
        let _ = derive(password, "00000000000000000000000000000000", iterations);
    }
}

fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn derive(password: &str, salt: &str, iterations: u32) -> String {
    let mut key = [0u8; HASH_BYTES];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut key);
    hex::encode(key)
}

/// Constant-time byte comparison.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify() {
        let hash = PasswordHash::generate("p1", 10);
        assert!(hash.verify("p1"));
        assert!(!hash.verify("p2"));
        assert!(!hash.verify(""));
    }

    #[test]
    fn test_salts_differ() {
        let a = PasswordHash::generate("same", 10);
        let b = PasswordHash::generate("same", 10);
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.password_hash, b.password_hash);
        assert_eq!(a.salt.len(), SALT_BYTES * 2);
        assert_eq!(a.password_hash.len(), HASH_BYTES * 2);
    }

    #[test]
    fn test_iterations_are_part_of_the_hash() {
        let mut hash = PasswordHash::generate("p1", 10);
        hash.iterations = 11;
        assert!(!hash.verify("p1"));
    }

    #[test]
    fn test_hash_never_contains_password() {
        let hash = PasswordHash::generate("hunter2", 10);
        let json = serde_json::to_string(&hash).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("passwordHash"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"short", b"longer"));
    }
}
