//! Reducer logic for the taskboard.
//!
//! Commands are validated against the current state and turned into
//! events; events are applied to state and answered with effects:
//! persist, then redraw. Toggling a task only recounts, every other
//! mutation redraws the whole view.

use crate::types::{AppState, ListId, Task, TaskId, TaskList, TaskboardAction};
use std::sync::Arc;
use taskboard_core::{effect::Effect, environment::IdGenerator, reducer::Reducer, SmallVec};

/// Environment dependencies for the taskboard reducer
#[derive(Clone)]
pub struct TaskboardEnvironment {
    /// Source of fresh list and task ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TaskboardEnvironment {
    /// Creates a new `TaskboardEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

/// Reducer for the taskboard
#[derive(Clone, Copy, Debug, Default)]
pub struct TaskboardReducer;

impl TaskboardReducer {
    /// Creates a new `TaskboardReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn is_blank(name: &str) -> bool {
        name.trim().is_empty()
    }

    /// The selected list id, or the contract violation to report
    fn require_selection(state: &AppState, command: &str) -> Result<ListId, String> {
        state
            .selected_list_id
            .clone()
            .ok_or_else(|| format!("{command} requires a selected list"))
    }

    /// Applies an event to state
    ///
    /// Fails without touching state if the event refers to something that
    /// does not exist or would break id uniqueness.
    fn apply_event(state: &mut AppState, event: &TaskboardAction) -> Result<(), String> {
        match event {
            TaskboardAction::ListCreated { id, name } => {
                if id.is_reserved() {
                    return Err(format!("List ID {:?} is reserved", id.as_str()));
                }
                if state.exists(id) {
                    return Err(format!("List with ID {id} already exists"));
                }
                state.lists.push(TaskList::new(id.clone(), name.clone()));
            }
            TaskboardAction::ListDeleted { id } => {
                if !state.exists(id) {
                    return Err(format!("List with ID {id} not found"));
                }
                state.lists.retain(|l| &l.id != id);
                if state.is_selected(id) {
                    state.selected_list_id = None;
                }
            }
            TaskboardAction::ListSelected { id } => {
                if !state.exists(id) {
                    return Err(format!("List with ID {id} not found"));
                }
                state.selected_list_id = Some(id.clone());
            }
            TaskboardAction::TaskCreated { list_id, id, name } => {
                let list = state
                    .find_list_mut(list_id)
                    .ok_or_else(|| format!("List with ID {list_id} not found"))?;
                if list.find_task(id).is_some() {
                    return Err(format!("Task with ID {id} already exists in list {list_id}"));
                }
                list.tasks.push(Task::new(id.clone(), name.clone()));
            }
            TaskboardAction::TaskToggled {
                list_id,
                task_id,
                complete,
            } => {
                let task = state
                    .find_list_mut(list_id)
                    .ok_or_else(|| format!("List with ID {list_id} not found"))?
                    .find_task_mut(task_id)
                    .ok_or_else(|| format!("Task with ID {task_id} not found in list {list_id}"))?;
                task.complete = *complete;
            }
            TaskboardAction::CompleteTasksCleared { list_id } => {
                let list = state
                    .find_list_mut(list_id)
                    .ok_or_else(|| format!("List with ID {list_id} not found"))?;
                list.clear_complete();
            }
            // Commands are not applied to state
            TaskboardAction::CreateList { .. }
            | TaskboardAction::DeleteList
            | TaskboardAction::SelectList { .. }
            | TaskboardAction::CreateTask { .. }
            | TaskboardAction::ToggleTask { .. }
            | TaskboardAction::ClearCompleteTasks => {}
        }
        Ok(())
    }

    /// Applies an event and describes what must follow it
    fn commit(state: &mut AppState, event: &TaskboardAction) -> SmallVec<[Effect; 4]> {
        if let Err(reason) = Self::apply_event(state, event) {
            return Effect::fault(reason);
        }

        tracing::debug!(event = event.name(), "Applied event");

        match event {
            TaskboardAction::TaskToggled { .. } => Effect::persist_and_recount(),
            _ => Effect::persist_and_redraw(),
        }
    }

    /// Turns a command into the event it implies
    ///
    /// `Ok(None)` means the command is a silent no-op.
    fn decide(
        state: &AppState,
        command: TaskboardAction,
        env: &TaskboardEnvironment,
    ) -> Result<Option<TaskboardAction>, String> {
        let event = match command {
            TaskboardAction::CreateList { name } => {
                if Self::is_blank(&name) {
                    tracing::debug!("Ignoring list with blank name");
                    return Ok(None);
                }
                TaskboardAction::ListCreated {
                    id: ListId::new(env.ids.next_id()),
                    name,
                }
            }

            TaskboardAction::DeleteList => {
                let Some(id) = state.selected_list_id.clone() else {
                    tracing::debug!("No list selected, nothing to delete");
                    return Ok(None);
                };
                TaskboardAction::ListDeleted { id }
            }

            TaskboardAction::SelectList { list_id } => TaskboardAction::ListSelected { id: list_id },

            TaskboardAction::CreateTask { name } => {
                if Self::is_blank(&name) {
                    tracing::debug!("Ignoring task with blank name");
                    return Ok(None);
                }
                let list_id = Self::require_selection(state, "CreateTask")?;
                TaskboardAction::TaskCreated {
                    list_id,
                    id: TaskId::new(env.ids.next_id()),
                    name,
                }
            }

            TaskboardAction::ToggleTask { task_id, checked } => TaskboardAction::TaskToggled {
                list_id: Self::require_selection(state, "ToggleTask")?,
                task_id,
                complete: checked,
            },

            TaskboardAction::ClearCompleteTasks => {
                let list_id = Self::require_selection(state, "ClearCompleteTasks")?;
                let list = state
                    .find_list(&list_id)
                    .ok_or_else(|| format!("List with ID {list_id} not found"))?;
                if list.complete_count() == 0 {
                    tracing::debug!(%list_id, "No completed tasks to clear");
                    return Ok(None);
                }
                TaskboardAction::CompleteTasksCleared { list_id }
            }

            event => event,
        };
        Ok(Some(event))
    }
}

impl Reducer for TaskboardReducer {
    type State = AppState;
    type Action = TaskboardAction;
    type Environment = TaskboardEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect; 4]> {
        if action.is_event() {
            // Replayed or externally produced fact: apply as-is
            return Self::commit(state, &action);
        }

        let command = action.name();
        match Self::decide(state, action, env) {
            Ok(Some(event)) => Self::commit(state, &event),
            Ok(None) => SmallVec::new(),
            Err(reason) => {
                tracing::warn!(command, %reason, "Command rejected");
                Effect::fault(reason)
            }
        }
    }
}
