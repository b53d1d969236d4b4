//! Error types for the taskboard shell.

use crate::render::RenderError;
use taskboard_core::environment::StorageError;
use thiserror::Error;

/// Errors raised while persisting or drawing the taskboard
#[derive(Error, Debug)]
pub enum TaskboardError {
    /// The key-value medium failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The document could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The view could not be drawn
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}
