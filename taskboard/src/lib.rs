//! Taskboard: named lists of checkable tasks.
//!
//! The application keeps a single document (lists, their tasks, and the
//! selected list) and drives every user gesture through one pipeline:
//! validate and mutate in the reducer, persist the whole document, then
//! redraw. It demonstrates:
//!
//! - Command validation and event application (`TaskboardReducer`)
//! - A persistence gateway over a string key-value medium
//! - A stateless render engine with full and count-only redraws
//! - Rollback when the medium rejects a write
//! - Testing with `ReducerTest` and in-memory fakes
//!
//! # Quick Start
//!
//! ```no_run
//! use taskboard::{
//!     FileStorage, FrameRenderer, MonotonicIdGenerator, PersistenceGateway, TaskboardAction,
//!     TaskboardEnvironment, TaskboardReducer, TaskboardShell,
//! };
//! use taskboard_core::environment::SystemClock;
//! use taskboard_runtime::Store;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = PersistenceGateway::new(FileStorage::open("taskboard.json")?);
//! let state = gateway.load()?;
//!
//! let env = TaskboardEnvironment::new(Arc::new(MonotonicIdGenerator::new(Arc::new(SystemClock))));
//! let shell = TaskboardShell::new(gateway, FrameRenderer::new());
//! let mut store = Store::new(state, TaskboardReducer::new(), env, shell);
//! store.render()?;
//!
//! store.send(TaskboardAction::CreateList {
//!     name: "Groceries".to_string(),
//! })?;
//!
//! let lists = store.state(|s| s.lists.len());
//! println!("Lists: {lists}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatch;
pub mod environment;
pub mod error;
pub mod persistence;
pub mod reducer;
pub mod render;
pub mod shell;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use dispatch::{parse_line, Command, Intent, ParseError};
pub use environment::MonotonicIdGenerator;
pub use error::TaskboardError;
pub use persistence::{PersistenceGateway, StorageKeys};
pub use reducer::{TaskboardEnvironment, TaskboardReducer};
pub use render::{FrameRenderer, Renderer, TextRenderer};
pub use shell::TaskboardShell;
pub use storage::FileStorage;
pub use types::{AppState, ListId, Task, TaskId, TaskList, TaskboardAction};

/// The store type used by the binary and integration tests
pub type TaskboardStore<K, R> = taskboard_runtime::Store<
    AppState,
    TaskboardAction,
    TaskboardEnvironment,
    TaskboardReducer,
    TaskboardShell<K, R>,
>;
