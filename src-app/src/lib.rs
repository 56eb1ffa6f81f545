//! MindSync - Account Shell
//!
//! The terminal stands in for the browser tab: one process is one browsing
//! session, so the volatile store lives exactly as long as the shell.

pub mod commands;
pub mod shell;
pub mod state;

pub use shell::Shell;
pub use state::AppState;
