//! Line-oriented event dispatcher.
//!
//! Turns a line of user input into an [`Intent`], the way a click or a
//! form submission would in a graphical view. Rows are addressed by their
//! 1-based position as drawn by the text renderer; positions are resolved
//! to ids against the current state before anything reaches the store.

use crate::types::{AppState, ListId, TaskId, TaskList, TaskboardAction};
use thiserror::Error;

/// Usage text printed by `help`
pub const HELP: &str = "\
Commands:
  list add <name>     create a list
  list select <n>     show list n
  list delete         delete the shown list
  task add <name>     add a task to the shown list
  task check <n>      mark task n complete
  task uncheck <n>    mark task n incomplete
  task clear          remove completed tasks
  help                show this text
  quit                exit";

/// A user gesture, resolved to ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// A list row was clicked
    SelectList(ListId),
    /// A task checkbox changed
    ToggleTask {
        /// Task whose checkbox changed
        task_id: TaskId,
        /// New checkbox state
        checked: bool,
    },
    /// The clear-completed button was pressed
    ClearCompletedTasks,
    /// The delete-list button was pressed
    DeleteSelectedList,
    /// The new-list form was submitted
    CreateList(String),
    /// The new-task form was submitted
    CreateTask(String),
}

impl From<Intent> for TaskboardAction {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::SelectList(list_id) => Self::SelectList { list_id },
            Intent::ToggleTask { task_id, checked } => Self::ToggleTask { task_id, checked },
            Intent::ClearCompletedTasks => Self::ClearCompleteTasks,
            Intent::DeleteSelectedList => Self::DeleteList,
            Intent::CreateList(name) => Self::CreateList { name },
            Intent::CreateTask(name) => Self::CreateTask { name },
        }
    }
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Something to send to the store
    Intent(Intent),
    /// Print usage
    Help,
    /// Leave the input loop
    Quit,
    /// Blank line
    Empty,
}

/// Why an input line produced no command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not a known command
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    /// A row position is required
    #[error("`{0}` needs a position")]
    MissingArgument(&'static str),

    /// The position is not a positive number
    #[error("not a valid position: {0}")]
    InvalidPosition(String),

    /// No list is drawn at that position
    #[error("no list at position {0}")]
    NoSuchList(usize),

    /// No task is drawn at that position
    #[error("no task at position {0}")]
    NoSuchTask(usize),

    /// Task commands need a shown list
    #[error("no list selected")]
    NoListSelected,
}

/// Parse `line` against the rows currently drawn for `state`
///
/// # Errors
///
/// Returns [`ParseError`] when the line is not a command or names a row
/// that does not exist. Nothing is dispatched in that case.
pub fn parse_line(line: &str, state: &AppState) -> Result<Command, ParseError> {
    let line = line.trim();
    let (noun, rest) = split_word(line);
    let (verb, arg) = split_word(rest);

    let intent = match (noun, verb) {
        ("", _) => return Ok(Command::Empty),
        ("help", "") => return Ok(Command::Help),
        ("quit" | "exit", "") => return Ok(Command::Quit),

        ("list", "add") => Intent::CreateList(arg.to_string()),
        ("list", "select") => {
            let position = position(arg, "list select")?;
            let list = state
                .lists
                .get(position - 1)
                .ok_or(ParseError::NoSuchList(position))?;
            Intent::SelectList(list.id.clone())
        }
        ("list", "delete") if arg.is_empty() => Intent::DeleteSelectedList,

        ("task", "add") => {
            require_selection(state)?;
            Intent::CreateTask(arg.to_string())
        }
        ("task", "check") => toggle(state, arg, "task check", true)?,
        ("task", "uncheck") => toggle(state, arg, "task uncheck", false)?,
        ("task", "clear") if arg.is_empty() => {
            require_selection(state)?;
            Intent::ClearCompletedTasks
        }

        _ => return Err(ParseError::Unknown(line.to_string())),
    };

    Ok(Command::Intent(intent))
}

fn toggle(
    state: &AppState,
    arg: &str,
    command: &'static str,
    checked: bool,
) -> Result<Intent, ParseError> {
    let position = position(arg, command)?;
    let list = require_selection(state)?;
    let task = list
        .tasks
        .get(position - 1)
        .ok_or(ParseError::NoSuchTask(position))?;

    Ok(Intent::ToggleTask {
        task_id: task.id.clone(),
        checked,
    })
}

/// Task controls only exist while a list is shown
fn require_selection(state: &AppState) -> Result<&TaskList, ParseError> {
    state.selected_list().ok_or(ParseError::NoListSelected)
}

/// 1-based row position
fn position(arg: &str, command: &'static str) -> Result<usize, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingArgument(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::InvalidPosition(arg.to_string())),
    }
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}
