//! Configuration management for the taskboard binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::persistence::StorageKeys;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default location of the storage file
pub const DEFAULT_STORAGE_PATH: &str = "taskboard.json";

/// Default tracing filter directive
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// File backing the key-value medium
    pub storage_path: PathBuf,
    /// Storage entry names
    pub keys: StorageKeys,
    /// Tracing filter directive (`RUST_LOG` syntax)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `TASKBOARD_STORAGE_PATH`: storage file (default `taskboard.json`)
    /// - `TASKBOARD_LISTS_KEY`: key of the list collection (default `task.lists`)
    /// - `TASKBOARD_SELECTED_LIST_KEY`: key of the selected list id
    ///   (default `task.selectedListsId`)
    /// - `RUST_LOG`: tracing filter (default `warn`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// Empty values count as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let defaults = StorageKeys::default();

        Self {
            storage_path: var("TASKBOARD_STORAGE_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from),
            keys: StorageKeys {
                lists: var("TASKBOARD_LISTS_KEY").unwrap_or(defaults.lists),
                selected_list_id: var("TASKBOARD_SELECTED_LIST_KEY")
                    .unwrap_or(defaults.selected_list_id),
            },
            log_level: var("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
