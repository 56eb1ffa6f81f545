//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use mindsync_credentials::DEFAULT_HASH_ITERATIONS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the durable storage database
    pub database_path: PathBuf,
    /// PBKDF2 iterations for newly registered passwords
    pub hash_iterations: u32,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("mindsync.db"),
            hash_iterations: DEFAULT_HASH_ITERATIONS,
        }
    }

    pub fn with_hash_iterations(mut self, hash_iterations: u32) -> Self {
        self.hash_iterations = hash_iterations;
        self
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("MindSync"))
            .unwrap_or_else(|| PathBuf::from(".mindsync"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Platform data directory lookup
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let config = Config::new(PathBuf::from("/tmp/ms")).with_hash_iterations(5);
        assert_eq!(config.database_path, PathBuf::from("/tmp/ms/mindsync.db"));
        assert_eq!(config.hash_iterations, 5);
    }
}
