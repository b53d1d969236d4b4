//! Domain types for the taskboard.
//!
//! The document is a flat collection of named lists, each owning an ordered
//! sequence of tasks, plus the id of the list currently shown in the detail
//! panel. Lists and tasks serialize to the plain
//! `{id, name, tasks: [{id, name, complete}]}` shape.

use serde::{Deserialize, Serialize};
use taskboard_macros::Action;

/// Unique identifier for a list
///
/// The empty string and the literal `null` are reserved: storage uses them
/// to mean "no list selected", so no list may carry them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    /// Wraps a raw identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Whether this id is one of the reserved "no selection" values
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.0.is_empty() || self.0 == "null"
    }

    /// Returns the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Unique identifier for a task within its list
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps a raw identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A named unit of work with a completion flag
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier within the owning list
    pub id: TaskId,
    /// What needs doing
    pub name: String,
    /// Whether the task is done
    pub complete: bool,
}

impl Task {
    /// Creates an incomplete task
    #[must_use]
    pub const fn new(id: TaskId, name: String) -> Self {
        Self {
            id,
            name,
            complete: false,
        }
    }
}

/// A named, ordered collection of tasks
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// Globally unique identifier
    pub id: ListId,
    /// Display name
    pub name: String,
    /// Tasks in insertion order
    pub tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty list
    #[must_use]
    pub const fn new(id: ListId, name: String) -> Self {
        Self {
            id,
            name,
            tasks: Vec::new(),
        }
    }

    /// Returns a task by ID
    #[must_use]
    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Returns a mutable task by ID
    pub fn find_task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == id)
    }

    /// Number of tasks not yet complete
    #[must_use]
    pub fn incomplete_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.complete).count()
    }

    /// Number of completed tasks
    #[must_use]
    pub fn complete_count(&self) -> usize {
        self.tasks.len() - self.incomplete_count()
    }

    /// Drops every completed task, returning how many were removed
    pub fn clear_complete(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.complete);
        before - self.tasks.len()
    }
}

/// The whole application document
///
/// Invariant: `selected_list_id` is `None` or names a list in `lists`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// All lists, in creation order
    pub lists: Vec<TaskList>,
    /// List shown in the detail panel
    pub selected_list_id: Option<ListId>,
}

impl AppState {
    /// Creates an empty document
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lists: Vec::new(),
            selected_list_id: None,
        }
    }

    /// Returns a list by ID
    #[must_use]
    pub fn find_list(&self, id: &ListId) -> Option<&TaskList> {
        self.lists.iter().find(|l| &l.id == id)
    }

    /// Returns a mutable list by ID
    pub fn find_list_mut(&mut self, id: &ListId) -> Option<&mut TaskList> {
        self.lists.iter_mut().find(|l| &l.id == id)
    }

    /// Returns a task by list and task ID
    #[must_use]
    pub fn find_task(&self, list_id: &ListId, task_id: &TaskId) -> Option<&Task> {
        self.find_list(list_id)?.find_task(task_id)
    }

    /// Checks if a list exists
    #[must_use]
    pub fn exists(&self, id: &ListId) -> bool {
        self.find_list(id).is_some()
    }

    /// The list shown in the detail panel, if any
    #[must_use]
    pub fn selected_list(&self) -> Option<&TaskList> {
        self.selected_list_id
            .as_ref()
            .and_then(|id| self.find_list(id))
    }

    /// Mutable access to the selected list
    pub fn selected_list_mut(&mut self) -> Option<&mut TaskList> {
        let id = self.selected_list_id.clone()?;
        self.find_list_mut(&id)
    }

    /// Whether `id` is the selected list
    #[must_use]
    pub fn is_selected(&self, id: &ListId) -> bool {
        self.selected_list_id.as_ref() == Some(id)
    }

    /// Every list and task id in the document
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.lists.iter().flat_map(|list| {
            std::iter::once(list.id.as_str()).chain(list.tasks.iter().map(|t| t.id.as_str()))
        })
    }

    /// Clears a selection that names no list
    ///
    /// Returns true if the selection was cleared.
    pub fn sanitize(&mut self) -> bool {
        match &self.selected_list_id {
            Some(id) if !self.exists(id) => {
                self.selected_list_id = None;
                true
            }
            _ => false,
        }
    }
}

/// Actions representing commands and events for the taskboard
///
/// Commands are user intents raised by the UI; the reducer validates them
/// and turns them into events. Events are facts that are applied to state
/// and may also be replayed directly.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskboardAction {
    // ========== Commands ==========
    /// Command: Create a new, unselected list
    #[command]
    CreateList {
        /// Display name (blank names are ignored)
        name: String,
    },

    /// Command: Delete the selected list and its tasks
    #[command]
    DeleteList,

    /// Command: Show a list in the detail panel
    #[command]
    SelectList {
        /// List to select
        list_id: ListId,
    },

    /// Command: Append a task to the selected list
    #[command]
    CreateTask {
        /// Task name (blank names are ignored)
        name: String,
    },

    /// Command: Set a task of the selected list complete or incomplete
    #[command]
    ToggleTask {
        /// Task to update
        task_id: TaskId,
        /// New completion state
        checked: bool,
    },

    /// Command: Remove completed tasks from the selected list
    #[command]
    ClearCompleteTasks,

    // ========== Events ==========
    /// Event: List was created
    #[event]
    ListCreated {
        /// List identifier
        id: ListId,
        /// Display name
        name: String,
    },

    /// Event: List was deleted
    #[event]
    ListDeleted {
        /// List identifier
        id: ListId,
    },

    /// Event: List was selected
    #[event]
    ListSelected {
        /// List identifier
        id: ListId,
    },

    /// Event: Task was appended to a list
    #[event]
    TaskCreated {
        /// Owning list
        list_id: ListId,
        /// Task identifier
        id: TaskId,
        /// Task name
        name: String,
    },

    /// Event: Task completion changed
    #[event]
    TaskToggled {
        /// Owning list
        list_id: ListId,
        /// Task identifier
        task_id: TaskId,
        /// New completion state
        complete: bool,
    },

    /// Event: Completed tasks were removed from a list
    #[event]
    CompleteTasksCleared {
        /// List identifier
        list_id: ListId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> TaskList {
        let mut list = TaskList::new(ListId::new("1"), "Groceries".to_string());
        list.tasks.push(Task::new(TaskId::new("2"), "Milk".to_string()));
        list.tasks.push(Task {
            id: TaskId::new("3"),
            name: "Eggs".to_string(),
            complete: true,
        });
        list
    }

    #[test]
    fn list_serializes_to_plain_shape() {
        let json = serde_json::to_value(sample_list()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "name": "Groceries",
                "tasks": [
                    {"id": "2", "name": "Milk", "complete": false},
                    {"id": "3", "name": "Eggs", "complete": true}
                ]
            })
        );
    }

    #[test]
    fn counts_and_clear() {
        let mut list = sample_list();
        assert_eq!(list.incomplete_count(), 1);
        assert_eq!(list.complete_count(), 1);

        assert_eq!(list.clear_complete(), 1);
        assert_eq!(list.tasks.len(), 1);
        assert_eq!(list.clear_complete(), 0);
    }

    #[test]
    fn lookups() {
        let state = AppState {
            lists: vec![sample_list()],
            selected_list_id: Some(ListId::new("1")),
        };

        assert!(state.exists(&ListId::new("1")));
        assert!(!ListId::new("1").is_reserved());
        assert!(ListId::new("").is_reserved());
        assert!(ListId::new("null").is_reserved());
        assert!(state.find_list(&ListId::new("9")).is_none());
        assert_eq!(
            state
                .find_task(&ListId::new("1"), &TaskId::new("2"))
                .map(|t| t.name.as_str()),
            Some("Milk")
        );
        assert!(state.find_task(&ListId::new("1"), &TaskId::new("9")).is_none());
        assert_eq!(state.selected_list().map(|l| l.name.as_str()), Some("Groceries"));
        assert_eq!(state.ids().collect::<Vec<_>>(), vec!["1", "2", "3"]);
    }

    #[test]
    fn sanitize_clears_dangling_selection() {
        let mut state = AppState {
            lists: vec![sample_list()],
            selected_list_id: Some(ListId::new("gone")),
        };
        assert!(state.sanitize());
        assert_eq!(state.selected_list_id, None);

        state.selected_list_id = Some(ListId::new("1"));
        assert!(!state.sanitize());
        assert!(state.is_selected(&ListId::new("1")));
    }

    #[test]
    fn action_kinds() {
        assert!(TaskboardAction::DeleteList.is_command());
        assert!(TaskboardAction::ListDeleted { id: ListId::new("1") }.is_event());
        assert_eq!(TaskboardAction::ClearCompleteTasks.name(), "ClearCompleteTasks");
    }
}
