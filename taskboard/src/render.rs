//! Render engine: a stateless projection of [`AppState`] onto a view.
//!
//! The projection functions ([`list_index`], [`detail_panel`],
//! [`task_count`]) build plain view models. A [`Renderer`] draws them; it
//! never reads previous output, so drawing the same state twice yields the
//! same view.

use crate::types::{AppState, ListId, TaskId, TaskList};
use std::fmt;
use std::io::Write;
use thiserror::Error;

/// Errors raised by a [`Renderer`]
#[derive(Error, Debug)]
pub enum RenderError {
    /// Output could not be written
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// One row of the list index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    /// List the row stands for
    pub id: ListId,
    /// Display name
    pub name: String,
    /// Whether this is the selected list
    pub active: bool,
}

/// One row of the detail panel's task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Task the row stands for
    pub id: TaskId,
    /// Display name
    pub name: String,
    /// Checkbox state
    pub complete: bool,
}

/// Number of incomplete tasks in a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCount {
    /// Tasks not yet complete
    pub remaining: usize,
}

impl fmt::Display for TaskCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.remaining == 1 { "task" } else { "tasks" };
        write!(f, "{} {noun} remaining", self.remaining)
    }
}

/// Contents of the detail panel for the selected list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    /// Selected list
    pub list_id: ListId,
    /// List name shown as the title
    pub title: String,
    /// Incomplete-task count
    pub count: TaskCount,
    /// One row per task, in list order
    pub tasks: Vec<TaskRow>,
}

/// Rows of the list index, one per list, in order
#[must_use]
pub fn list_index(state: &AppState) -> Vec<ListRow> {
    state
        .lists
        .iter()
        .map(|list| ListRow {
            id: list.id.clone(),
            name: list.name.clone(),
            active: state.is_selected(&list.id),
        })
        .collect()
}

/// Incomplete-task count of `list`
#[must_use]
pub fn task_count(list: &TaskList) -> TaskCount {
    TaskCount {
        remaining: list.incomplete_count(),
    }
}

/// The detail panel, or `None` when it is hidden (no selection)
#[must_use]
pub fn detail_panel(state: &AppState) -> Option<DetailPanel> {
    let list = state.selected_list()?;
    Some(DetailPanel {
        list_id: list.id.clone(),
        title: list.name.clone(),
        count: task_count(list),
        tasks: list
            .tasks
            .iter()
            .map(|task| TaskRow {
                id: task.id.clone(),
                name: task.name.clone(),
                complete: task.complete,
            })
            .collect(),
    })
}

/// Capability interface implemented by a concrete UI
pub trait Renderer {
    /// Replace the list index with `rows`
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the output cannot be drawn.
    fn render_list_index(&mut self, rows: &[ListRow]) -> Result<(), RenderError>;

    /// Show `panel`, or hide the detail panel when `None`
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the output cannot be drawn.
    fn render_detail_panel(&mut self, panel: Option<&DetailPanel>) -> Result<(), RenderError>;

    /// Update only the remaining-task count, leaving task rows alone
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the output cannot be drawn.
    fn render_task_count(&mut self, count: TaskCount) -> Result<(), RenderError>;
}

/// Redraw everything from `state`
///
/// # Errors
///
/// Returns [`RenderError`] if the renderer fails.
pub fn render_full<R: Renderer + ?Sized>(state: &AppState, renderer: &mut R) -> Result<(), RenderError> {
    renderer.render_list_index(&list_index(state))?;
    renderer.render_detail_panel(detail_panel(state).as_ref())
}

/// Redraw only the selected list's task count
///
/// Does nothing when no list is selected.
///
/// # Errors
///
/// Returns [`RenderError`] if the renderer fails.
pub fn render_count_only<R: Renderer + ?Sized>(
    state: &AppState,
    renderer: &mut R,
) -> Result<(), RenderError> {
    match state.selected_list() {
        Some(list) => renderer.render_task_count(task_count(list)),
        None => Ok(()),
    }
}

/// Everything currently on screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// List index rows
    pub lists: Vec<ListRow>,
    /// Detail panel, `None` while hidden
    pub detail: Option<DetailPanel>,
}

impl Frame {
    /// Whether the detail panel is shown
    #[must_use]
    pub const fn detail_visible(&self) -> bool {
        self.detail.is_some()
    }

    /// The count line as displayed, if the panel is shown
    #[must_use]
    pub fn count_line(&self) -> Option<String> {
        self.detail.as_ref().map(|d| d.count.to_string())
    }
}

/// How many times each sub-render ran
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Calls to `render_list_index`
    pub list_index: usize,
    /// Calls to `render_detail_panel`
    pub detail_panel: usize,
    /// Calls to `render_task_count`
    pub task_count: usize,
}

/// Renderer that keeps the drawn view in memory
///
/// Useful wherever the view must be inspected rather than shown.
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    frame: Frame,
    stats: RenderStats,
}

impl FrameRenderer {
    /// Creates a renderer with an empty frame
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current frame
    #[must_use]
    pub const fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Sub-render call counts
    #[must_use]
    pub const fn stats(&self) -> RenderStats {
        self.stats
    }
}

impl Renderer for FrameRenderer {
    fn render_list_index(&mut self, rows: &[ListRow]) -> Result<(), RenderError> {
        self.stats.list_index += 1;
        self.frame.lists = rows.to_vec();
        Ok(())
    }

    fn render_detail_panel(&mut self, panel: Option<&DetailPanel>) -> Result<(), RenderError> {
        self.stats.detail_panel += 1;
        self.frame.detail = panel.cloned();
        Ok(())
    }

    fn render_task_count(&mut self, count: TaskCount) -> Result<(), RenderError> {
        self.stats.task_count += 1;
        if let Some(detail) = self.frame.detail.as_mut() {
            detail.count = count;
        }
        Ok(())
    }
}

/// Plain-text renderer for terminals
///
/// Each sub-render prints its own section; rows are numbered from 1 so
/// they can be referred to by position.
#[derive(Debug)]
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    /// Creates a renderer writing to `out`
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the renderer, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render_list_index(&mut self, rows: &[ListRow]) -> Result<(), RenderError> {
        writeln!(self.out, "Lists")?;
        if rows.is_empty() {
            writeln!(self.out, "  (none)")?;
        }
        for (position, row) in rows.iter().enumerate() {
            let marker = if row.active { '>' } else { ' ' };
            writeln!(self.out, "{marker} {}. {}", position + 1, row.name)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn render_detail_panel(&mut self, panel: Option<&DetailPanel>) -> Result<(), RenderError> {
        let Some(panel) = panel else {
            return Ok(());
        };
        writeln!(self.out)?;
        writeln!(self.out, "{}", panel.title)?;
        writeln!(self.out, "{}", panel.count)?;
        for (position, task) in panel.tasks.iter().enumerate() {
            let check = if task.complete { 'x' } else { ' ' };
            writeln!(self.out, "  [{check}] {}. {}", position + 1, task.name)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn render_task_count(&mut self, count: TaskCount) -> Result<(), RenderError> {
        writeln!(self.out, "{count}")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Task;

    fn state() -> AppState {
        let mut groceries = TaskList::new(ListId::new("g"), "Groceries".to_string());
        groceries.tasks.push(Task::new(TaskId::new("m"), "Milk".to_string()));
        groceries.tasks.push(Task {
            id: TaskId::new("e"),
            name: "Eggs".to_string(),
            complete: true,
        });
        AppState {
            lists: vec![groceries, TaskList::new(ListId::new("w"), "Work".to_string())],
            selected_list_id: Some(ListId::new("g")),
        }
    }

    #[test]
    fn count_pluralization() {
        assert_eq!(TaskCount { remaining: 0 }.to_string(), "0 tasks remaining");
        assert_eq!(TaskCount { remaining: 1 }.to_string(), "1 task remaining");
        assert_eq!(TaskCount { remaining: 2 }.to_string(), "2 tasks remaining");
    }

    #[test]
    fn list_index_marks_selected_only() {
        let rows = list_index(&state());
        assert_eq!(rows.len(), 2);
        assert!(rows[0].active);
        assert!(!rows[1].active);
        assert_eq!(rows[1].name, "Work");
    }

    #[test]
    fn detail_panel_reflects_selected_list() {
        let panel = detail_panel(&state()).unwrap();
        assert_eq!(panel.title, "Groceries");
        assert_eq!(panel.count, TaskCount { remaining: 1 });
        assert_eq!(panel.tasks.len(), 2);
        assert!(panel.tasks[1].complete);
    }

    #[test]
    fn detail_panel_hidden_without_selection() {
        let mut state = state();
        state.selected_list_id = None;
        assert_eq!(detail_panel(&state), None);

        let mut renderer = FrameRenderer::new();
        render_full(&state, &mut renderer).unwrap();
        assert!(!renderer.frame().detail_visible());
        assert_eq!(renderer.frame().lists.len(), 2);
    }

    #[test]
    fn full_render_is_idempotent() {
        let state = state();
        let mut renderer = FrameRenderer::new();

        render_full(&state, &mut renderer).unwrap();
        let first = renderer.frame().clone();
        render_full(&state, &mut renderer).unwrap();

        assert_eq!(renderer.frame(), &first);
    }

    #[test]
    fn count_only_leaves_rows_alone() {
        let mut state = state();
        let mut renderer = FrameRenderer::new();
        render_full(&state, &mut renderer).unwrap();

        state.lists[0].tasks[0].complete = true;
        render_count_only(&state, &mut renderer).unwrap();

        let frame = renderer.frame();
        assert_eq!(frame.count_line().as_deref(), Some("0 tasks remaining"));
        // Rows still show what the last full render drew
        assert!(!frame.detail.as_ref().unwrap().tasks[0].complete);
        assert_eq!(
            renderer.stats(),
            RenderStats {
                list_index: 1,
                detail_panel: 1,
                task_count: 1,
            }
        );
    }

    #[test]
    fn text_renderer_output() {
        let mut renderer = TextRenderer::new(Vec::new());
        render_full(&state(), &mut renderer).unwrap();
        renderer.render_task_count(TaskCount { remaining: 3 }).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        let expected = [
            "Lists",
            "> 1. Groceries",
            "  2. Work",
            "",
            "Groceries",
            "1 task remaining",
            "  [ ] 1. Milk",
            "  [x] 2. Eggs",
            "3 tasks remaining",
        ];
        assert_eq!(text.lines().collect::<Vec<_>>(), expected);
    }
}
