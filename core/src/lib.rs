//! # Taskboard Core
//!
//! Core traits and types for the taskboard mutate-persist-render loop.
//!
//! Every user intent runs through the same pipeline:
//!
//! 1. a [`Reducer`](reducer::Reducer) mutates the in-memory state,
//! 2. the state is persisted to a durable key-value medium,
//! 3. the view is redrawn from the state.
//!
//! Steps 2 and 3 are not performed by the reducer. It returns
//! [`Effect`](effect::Effect) descriptions and the runtime executes them
//! through a [`Shell`](shell::Shell).
//!
//! ## Core Concepts
//!
//! - **State**: The canonical in-memory document (single source of truth)
//! - **Action**: All possible inputs to a reducer (commands and events)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (persist, redraw, fault)
//! - **Environment**: Injected dependencies via traits (clock, id generation)
//! - **Shell**: The imperative edge that persists and renders
//!
//! ## Example
//!
//! ```
//! use taskboard_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect; 4]> {
//!         match action {
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 Effect::persist_and_redraw()
//!             }
//!         }
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! let effects = CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! assert_eq!(effects.len(), 2);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable
/// without a live UI or storage medium.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed, in order
        ///
        /// A reducer that rejects an action must leave `state` untouched.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are values, not execution. They are returned from reducers and
/// executed in order by the store runtime.
pub mod effect {
    use smallvec::{smallvec, SmallVec};

    /// How much of the view a render effect redraws
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Redraw {
        /// Rebuild the complete view from state
        Full,

        /// Recompute only the remaining-task count of the selected list
        TaskCount,
    }

    impl Redraw {
        /// Label used for tracing fields and metric tags
        #[must_use]
        pub const fn as_str(self) -> &'static str {
            match self {
                Self::Full => "full",
                Self::TaskCount => "task_count",
            }
        }
    }

    /// Effect type - describes a side effect to be executed
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Effect {
        /// Mirror the current state to the durable medium
        Persist,

        /// Redraw the view from the current state
        Render(Redraw),

        /// The action broke a caller contract (e.g. no list selected).
        ///
        /// The reducer has left state untouched; the runtime aborts the step
        /// and reports the reason.
        Fault(String),
    }

    impl Effect {
        /// The standard tail of a mutation: persist, then redraw everything
        #[must_use]
        pub fn persist_and_redraw() -> SmallVec<[Self; 4]> {
            smallvec![Self::Persist, Self::Render(Redraw::Full)]
        }

        /// Persist, then redraw only the task count
        #[must_use]
        pub fn persist_and_recount() -> SmallVec<[Self; 4]> {
            smallvec![Self::Persist, Self::Render(Redraw::TaskCount)]
        }

        /// A single contract-violation effect
        #[must_use]
        pub fn fault(reason: impl Into<String>) -> SmallVec<[Self; 4]> {
            smallvec![Self::Fault(reason.into())]
        }

        /// Short name of the effect kind, used as a metric tag
        #[must_use]
        pub const fn kind(&self) -> &'static str {
            match self {
                Self::Persist => "persist",
                Self::Render(_) => "render",
                Self::Fault(_) => "fault",
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter or the shell.
pub mod environment {
    use chrono::{DateTime, Utc};
    use thiserror::Error;

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall clock backed by [`Utc::now`]
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Produces a fresh identifier for every new list or task
    ///
    /// Implementations must never hand out the same id twice within a
    /// process, including for calls made within the same clock tick.
    pub trait IdGenerator: Send + Sync {
        /// Return the next unused identifier
        fn next_id(&self) -> String;
    }

    /// Errors raised by a [`KeyValueStorage`] backend
    #[derive(Error, Debug)]
    pub enum StorageError {
        /// The medium could not be read or written
        #[error("storage I/O failed: {0}")]
        Io(#[from] std::io::Error),

        /// The medium is unusable for any other reason
        #[error("storage unavailable: {0}")]
        Unavailable(String),
    }

    /// Opaque string key-value medium (browser local storage, a file, memory)
    ///
    /// Writes overwrite prior values. No transactions are offered: each
    /// entry is a single call.
    pub trait KeyValueStorage {
        /// Read the value stored under `key`, if any
        ///
        /// # Errors
        ///
        /// Returns [`StorageError`] if the medium cannot be read.
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

        /// Store `value` under `key`, replacing any previous value
        ///
        /// # Errors
        ///
        /// Returns [`StorageError`] if the medium cannot be written.
        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    }

    impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            (**self).get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            (**self).set_item(key, value)
        }
    }
}

/// Shell module - The imperative edge of the pipeline
///
/// The store runtime calls the shell to execute `Persist` and `Render`
/// effects against the current state.
pub mod shell {
    use super::effect::Redraw;

    /// Executes persistence and rendering for a state type
    pub trait Shell<S> {
        /// Error produced by either side of the shell
        type Error: std::error::Error + Send + Sync + 'static;

        /// Write `state` to the durable medium
        ///
        /// # Errors
        ///
        /// Returns an error if the medium rejects the write.
        fn persist(&mut self, state: &S) -> Result<(), Self::Error>;

        /// Redraw the view from `state`
        ///
        /// # Errors
        ///
        /// Returns an error if the output cannot be drawn.
        fn render(&mut self, state: &S, redraw: Redraw) -> Result<(), Self::Error>;
    }
}

#[cfg(test)]
mod tests {
    use super::effect::{Effect, Redraw};
    use super::environment::{Clock, SystemClock};

    #[test]
    fn persist_precedes_render() {
        let effects = Effect::persist_and_redraw();
        assert_eq!(
            effects.as_slice(),
            &[Effect::Persist, Effect::Render(Redraw::Full)]
        );

        let effects = Effect::persist_and_recount();
        assert_eq!(
            effects.as_slice(),
            &[Effect::Persist, Effect::Render(Redraw::TaskCount)]
        );
    }

    #[test]
    fn effect_kinds() {
        assert_eq!(Effect::Persist.kind(), "persist");
        assert_eq!(Effect::Render(Redraw::Full).kind(), "render");
        assert_eq!(Effect::Fault("x".into()).kind(), "fault");
        assert_eq!(Redraw::TaskCount.as_str(), "task_count");
    }

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
