//! Session record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use mindsync_credentials::{constant_time_eq, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub name: String,
    pub email: String,
    /// Missing in a stored record means logged out
    #[serde(default)]
    pub is_logged_in: bool,
    /// SHA-256 of the issued session token, hex-encoded
    #[serde(default)]
    pub token_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    pub fn new(profile: UserProfile, token: &str) -> Self {
        Self {
            name: profile.name,
            email: profile.email,
            is_logged_in: true,
            token_hash: hash_token(token),
            logged_in_at: Some(Utc::now()),
        }
    }

    /// Whether `token` is the one issued for this record
    pub fn matches_token(&self, token: &str) -> bool {
        !self.token_hash.is_empty()
            && constant_time_eq(self.token_hash.as_bytes(), hash_token(token).as_bytes())
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Single-pass SHA-256; tokens are already high-entropy.
pub(crate) fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
