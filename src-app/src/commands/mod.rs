//! Front-end commands
//!
//! These bridge form submissions to the Rust core. Every command answers
//! with a `CommandResult`; a failed one carries the message for the modal.

pub mod auth;

use serde::Serialize;

use mindsync_core::CoreError;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    pub fn from_result(result: mindsync_core::Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::from_error(&e),
        }
    }

    pub fn from_error(e: &CoreError) -> Self {
        Self::err(e.user_message())
    }
}
