//! Display-name persistence - save and load the last-confirmed name.

use crate::base::error::ChatError;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Serializable representation of the stored name.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct SavedName {
    display_name: String,
}

/// The single persisted slot holding the last-used display name.
///
/// Read once at session start, written back whenever a different name is
/// confirmed. A missing or unreadable file is treated as "no saved name",
/// never as an error.
pub struct NameStore {
    path: PathBuf,
}

impl NameStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<config dir>/wirechat/name.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("wirechat")
            .join("name.json")
    }

    /// The file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved name, if any.
    ///
    /// Corrupt or empty contents load as `None` rather than erroring.
    pub fn load(&self) -> Option<String> {
        let json = fs::read_to_string(&self.path).ok()?;
        let saved: SavedName = serde_json::from_str(&json)
            .map_err(|e| {
                tracing::debug!("unreadable name file, ignoring: {e}");
                e
            })
            .ok()?;
        let name = saved.display_name.trim().to_string();
        (!name.is_empty()).then_some(name)
    }

    /// Persist `name`, creating the parent directory if needed.
    pub fn save(&self, name: &str) -> Result<(), ChatError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let saved = SavedName {
            display_name: name.to_string(),
        };
        let json = serde_json::to_string_pretty(&saved)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
