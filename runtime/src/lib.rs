//! # Taskboard Runtime
//!
//! Runtime implementation for the taskboard mutate-persist-render loop.
//!
//! This crate provides the [`Store`](store::Store) that coordinates reducer
//! execution and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: Owns the canonical state and runs one action at a time
//! - **Effect execution**: `Persist` and `Render` effects are handed to the
//!   [`Shell`], in the order the reducer returned them
//! - **Rollback**: A failed persist restores the pre-action state, so memory
//!   never runs ahead of the durable medium
//!
//! ## Example
//!
//! ```ignore
//! use taskboard_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment, shell);
//!
//! // Draw the loaded state once
//! store.render()?;
//!
//! // Send an action: mutate, persist, redraw
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use taskboard_core::{
    effect::{Effect, Redraw},
    reducer::Reducer,
    shell::Shell,
};

/// Metric names and descriptions for observability
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    type BoxError = Box<dyn std::error::Error + Send + Sync>;

    /// Errors that can occur during Store operations
    ///
    /// Every variant means the action did not complete. The in-memory state
    /// is left equal to what was last persisted.
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// The reducer rejected the action because a caller contract was broken
        ///
        /// State was not modified and nothing was persisted or rendered.
        #[error("Contract violation: {0}")]
        ContractViolation(String),

        /// Writing the state to the durable medium failed
        ///
        /// The in-memory state was rolled back to its value before the action.
        #[error("Persisting state failed: {0}")]
        Persist(#[source] BoxError),

        /// Drawing the view failed
        ///
        /// State is already persisted; the view may be stale until the next
        /// successful render.
        #[error("Rendering failed: {0}")]
        Render(#[source] BoxError),
    }
}

pub use error::StoreError;

/// Store module - The runtime for reducers
///
/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{Effect, Redraw, Reducer, Shell, StoreError};
    use crate::metrics::{
        ACTIONS_TOTAL, CONTRACT_VIOLATIONS, EFFECTS_EXECUTED, PERSIST_ROLLBACKS, REDUCER_DURATION,
    };
    use std::fmt::Debug;
    use std::time::Instant;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (the single source of truth)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Shell (persistence and rendering)
    ///
    /// Actions are processed strictly one at a time: [`Store::send`] takes
    /// `&mut self` and runs the whole mutate → persist → render sequence
    /// before returning.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    /// - `H`: Shell implementation
    pub struct Store<S, A, E, R, H>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        H: Shell<S>,
    {
        state: S,
        reducer: R,
        environment: E,
        shell: H,
    }

    impl<S, A, E, R, H> Store<S, A, E, R, H>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        H: Shell<S>,
        S: Clone,
        A: Debug,
    {
        /// Create a new store with initial state, reducer, environment and shell
        ///
        /// Nothing is rendered yet; call [`Store::render`] for the first draw.
        #[must_use]
        pub const fn new(initial_state: S, reducer: R, environment: E, shell: H) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                shell,
            }
        }

        /// Send an action through the store
        ///
        /// Runs the reducer, then executes the returned effects in order.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ContractViolation`] if the reducer produced a fault
        /// - [`StoreError::Persist`] if the shell could not persist; state is
        ///   rolled back to its value before this action
        /// - [`StoreError::Render`] if the shell could not draw
        #[tracing::instrument(skip_all, name = "store_send", fields(action = ?action))]
        pub fn send(&mut self, action: A) -> Result<(), StoreError> {
            metrics::counter!(ACTIONS_TOTAL).increment(1);

            let snapshot = self.state.clone();

            let start = Instant::now();
            let effects = self.reducer.reduce(&mut self.state, action, &self.environment);
            metrics::histogram!(REDUCER_DURATION)
                .record(start.elapsed().as_secs_f64());

            tracing::trace!("Reducer completed, returned {} effects", effects.len());

            for effect in effects {
                self.execute(effect, &snapshot)?;
            }

            tracing::debug!("Action processing completed");
            Ok(())
        }

        /// Draw the complete view from the current state
        ///
        /// Used once at startup, after the state has been loaded.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::Render`] if the shell could not draw.
        pub fn render(&mut self) -> Result<(), StoreError> {
            self.shell
                .render(&self.state, Redraw::Full)
                .map_err(|e| StoreError::Render(Box::new(e)))
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let list_count = store.state(|s| s.lists.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Borrow the shell (e.g. to inspect what was rendered)
        #[must_use]
        pub const fn shell(&self) -> &H {
            &self.shell
        }

        /// Mutably borrow the shell
        pub const fn shell_mut(&mut self) -> &mut H {
            &mut self.shell
        }

        /// Consume the store, returning its final state and shell
        pub fn into_parts(self) -> (S, H) {
            (self.state, self.shell)
        }

        fn execute(&mut self, effect: Effect, snapshot: &S) -> Result<(), StoreError> {
            metrics::counter!(EFFECTS_EXECUTED, "type" => effect.kind()).increment(1);

            match effect {
                Effect::Persist => {
                    tracing::trace!("Executing Effect::Persist");
                    if let Err(e) = self.shell.persist(&self.state) {
                        tracing::error!(error = %e, "Persist failed, rolling back state");
                        metrics::counter!(PERSIST_ROLLBACKS).increment(1);
                        self.state = snapshot.clone();
                        return Err(StoreError::Persist(Box::new(e)));
                    }
                    Ok(())
                }
                Effect::Render(redraw) => {
                    tracing::trace!(redraw = redraw.as_str(), "Executing Effect::Render");
                    self.shell
                        .render(&self.state, redraw)
                        .map_err(|e| StoreError::Render(Box::new(e)))
                }
                Effect::Fault(reason) => {
                    tracing::warn!(%reason, "Action rejected");
                    metrics::counter!(CONTRACT_VIOLATIONS).increment(1);
                    self.state = snapshot.clone();
                    Err(StoreError::ContractViolation(reason))
                }
            }
        }
    }
}

pub use store::Store;
