//! Persistence gateway between the document and a key-value medium.
//!
//! Two entries are kept: the list collection as a JSON array, and the raw
//! selected-list id (the literal `null` when nothing is selected).

use crate::error::TaskboardError;
use crate::types::{AppState, ListId, TaskList};
use serde::{Deserialize, Serialize};
use taskboard_core::environment::KeyValueStorage;

/// Default key of the serialized list collection
pub const DEFAULT_LISTS_KEY: &str = "task.lists";

/// Default key of the selected list id
pub const DEFAULT_SELECTED_LIST_KEY: &str = "task.selectedListsId";

/// Stored in place of an id when no list is selected
const NO_SELECTION: &str = "null";

/// Names of the two storage entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    /// Key holding the JSON list collection
    pub lists: String,
    /// Key holding the selected list id
    pub selected_list_id: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            lists: DEFAULT_LISTS_KEY.to_string(),
            selected_list_id: DEFAULT_SELECTED_LIST_KEY.to_string(),
        }
    }
}

/// Loads and saves [`AppState`] through a [`KeyValueStorage`]
#[derive(Debug, Clone)]
pub struct PersistenceGateway<K> {
    storage: K,
    keys: StorageKeys,
}

impl<K: KeyValueStorage> PersistenceGateway<K> {
    /// Gateway using the default keys
    #[must_use]
    pub fn new(storage: K) -> Self {
        Self::with_keys(storage, StorageKeys::default())
    }

    /// Gateway using custom keys
    #[must_use]
    pub const fn with_keys(storage: K, keys: StorageKeys) -> Self {
        Self { storage, keys }
    }

    /// The keys in use
    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// The underlying medium
    #[must_use]
    pub const fn storage(&self) -> &K {
        &self.storage
    }

    /// Read the document from the medium
    ///
    /// Missing or malformed list data yields an empty collection. A missing
    /// selection, or one naming no loaded list, yields no selection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskboardError::Storage`] if the medium cannot be read.
    pub fn load(&self) -> Result<AppState, TaskboardError> {
        let lists = match self.storage.get_item(&self.keys.lists)? {
            None => Vec::new(),
            Some(raw) => serde_json::from_str::<Vec<TaskList>>(&raw).unwrap_or_else(|e| {
                tracing::warn!(key = %self.keys.lists, error = %e, "Discarding malformed list data");
                Vec::new()
            }),
        };

        let selected_list_id = self
            .storage
            .get_item(&self.keys.selected_list_id)?
            .filter(|raw| !raw.is_empty() && raw != NO_SELECTION)
            .map(ListId::new);

        let mut state = AppState {
            lists,
            selected_list_id,
        };
        if state.sanitize() {
            tracing::warn!("Stored selection names no list, clearing it");
        }

        tracing::debug!(lists = state.lists.len(), "Loaded state");
        Ok(state)
    }

    /// Write the document to the medium, overwriting both entries
    ///
    /// # Errors
    ///
    /// Returns [`TaskboardError`] if serialization or either write fails.
    /// No attempt is made to undo the first write if the second fails.
    pub fn save(&self, state: &AppState) -> Result<(), TaskboardError> {
        let lists = serde_json::to_string(&state.lists)?;
        self.storage.set_item(&self.keys.lists, &lists)?;

        let selected = state
            .selected_list_id
            .as_ref()
            .map_or(NO_SELECTION, ListId::as_str);
        self.storage.set_item(&self.keys.selected_list_id, selected)?;

        tracing::trace!(bytes = lists.len(), "Saved state");
        Ok(())
    }
}
