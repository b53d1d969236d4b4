//! The taskboard's imperative edge: persistence plus rendering.

use crate::error::TaskboardError;
use crate::persistence::PersistenceGateway;
use crate::render::{render_count_only, render_full, Renderer};
use crate::types::AppState;
use taskboard_core::{effect::Redraw, environment::KeyValueStorage, shell::Shell};

/// Executes `Persist` and `Render` effects for [`AppState`]
#[derive(Debug)]
pub struct TaskboardShell<K, R> {
    gateway: PersistenceGateway<K>,
    renderer: R,
}

impl<K, R> TaskboardShell<K, R>
where
    K: KeyValueStorage,
    R: Renderer,
{
    /// Combines a gateway and a renderer
    #[must_use]
    pub const fn new(gateway: PersistenceGateway<K>, renderer: R) -> Self {
        Self { gateway, renderer }
    }

    /// The persistence gateway
    #[must_use]
    pub const fn gateway(&self) -> &PersistenceGateway<K> {
        &self.gateway
    }

    /// The renderer
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }
}

impl<K, R> Shell<AppState> for TaskboardShell<K, R>
where
    K: KeyValueStorage,
    R: Renderer,
{
    type Error = TaskboardError;

    fn persist(&mut self, state: &AppState) -> Result<(), Self::Error> {
        self.gateway.save(state)
    }

    fn render(&mut self, state: &AppState, redraw: Redraw) -> Result<(), Self::Error> {
        match redraw {
            Redraw::Full => render_full(state, &mut self.renderer)?,
            Redraw::TaskCount => render_count_only(state, &mut self.renderer)?,
        }
        Ok(())
    }
}
