//! MindSync Session Management
//!
//! - At most one active login per browsing session
//! - The session record lives in volatile storage under `mindsync_current_user`
//! - The record never carries a password; it carries the digest of an issued
//!   session token instead
//! - Absent or malformed records read as "logged out"

mod error;
mod manager;
mod session;

pub use error::SessionError;
pub use manager::{LoginGrant, SessionManager};
pub use session::SessionRecord;

pub type Result<T> = std::result::Result<T, SessionError>;
