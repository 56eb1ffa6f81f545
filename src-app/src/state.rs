//! Application state management
use mindsync_core::{App, Config, Result};
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe application state wrapper
pub struct AppState {
    app: Arc<App>,
    /// Session token held by the front end, like a cookie
    token: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::from_app(App::new(config)?))
    }

    pub fn from_app(app: App) -> Self {
        Self {
            app: Arc::new(app),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_app<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&App) -> Result<T>,
    {
        f(&self.app)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            app: Arc::clone(&self.app),
            token: Arc::clone(&self.token),
        }
    }
}
