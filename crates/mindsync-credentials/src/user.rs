//! User records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CredentialError;
use crate::password::PasswordHash;
use crate::Result;

/// A registered user as persisted in durable storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub password: PasswordHash,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password: PasswordHash) -> Self {
        Self {
            name,
            email,
            password,
            created_at: Utc::now(),
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The password-free view of a user handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

/// Registration form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "Full name",
            Field::Email => "Email",
            Field::Password => "Password",
        };
        f.write_str(label)
    }
}

/// A submitted registration form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Check the form without touching storage.
    ///
    /// The confirmation check runs first so a mismatch is always reported
    /// as such, whatever else is in the form.
    pub fn validate(&self) -> Result<()> {
        if self.password != self.confirm_password {
            return Err(CredentialError::PasswordMismatch);
        }

        let required = [
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::Password, &self.password),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(CredentialError::MissingField(field));
            }
        }

        Ok(())
    }
}
