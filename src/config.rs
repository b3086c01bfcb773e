//! Client configuration.
//!
//! The server address comes from the environment with a hardcoded fallback,
//! matching how the hosted build of the original service is deployed.

use crate::store::NameStore;
use std::path::PathBuf;

/// Environment variable naming the chat server.
pub const SERVER_ENV: &str = "WIRECHAT_SERVER";

/// Address used when [`SERVER_ENV`] is unset.
pub const DEFAULT_SERVER: &str = "ws://167.71.158.242:3000";

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// WebSocket address of the chat server.
    pub server_url: String,
    /// File backing the display-name store.
    pub name_path: PathBuf,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER.to_string(),
            name_path: NameStore::default_path(),
        }
    }
}

impl ChatConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            server_url: std::env::var(SERVER_ENV).unwrap_or_else(|_| DEFAULT_SERVER.to_string()),
            ..Self::default()
        }
    }
}
