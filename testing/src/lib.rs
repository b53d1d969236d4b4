//! # Taskboard Testing
//!
//! Testing utilities and helpers for taskboard reducers and stores.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - An in-memory key-value medium
//! - A Given-When-Then builder for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use taskboard_testing::{ReducerTest, SequentialIdGenerator, assertions};
//!
//! ReducerTest::new(TaskboardReducer::new())
//!     .with_env(TaskboardEnvironment::new(Arc::new(SequentialIdGenerator::new())))
//!     .given_state(AppState::default())
//!     .when_action(TaskboardAction::CreateList { name: "Groceries".into() })
//!     .then_state(|state| assert_eq!(state.lists.len(), 1))
//!     .then_effects(assertions::assert_persists_and_redraws)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use taskboard_core::environment::{Clock, IdGenerator, KeyValueStorage, StorageError};


/// Mock implementations of Environment traits
///
/// - `FixedClock`: Deterministic time
/// - `SequentialIdGenerator`: Predictable IDs
/// - `MemoryStorage`: In-memory key-value medium
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, KeyValueStorage, StorageError, Utc};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use taskboard_testing::mocks::FixedClock;
    /// use taskboard_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Hands out `"1"`, `"2"`, `"3"`, ...
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Start counting at `"1"`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(0),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> String {
            (self.next.fetch_add(1, Ordering::Relaxed) + 1).to_string()
        }
    }

    /// In-memory key-value medium
    ///
    /// Clones share the same entries, so a test can keep one handle while
    /// the store owns another. Writes can be made to fail on demand to
    /// exercise the unavailable-medium path.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStorage {
        entries: Arc<Mutex<HashMap<String, String>>>,
        fail_writes: Arc<AtomicBool>,
    }

    impl MemoryStorage {
        /// Create an empty medium
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a medium pre-populated with `entries`
        #[must_use]
        pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
        where
            K: Into<String>,
            V: Into<String>,
        {
            let storage = Self::new();
            {
                let mut map = storage.lock();
                for (key, value) in entries {
                    map.insert(key.into(), value.into());
                }
            }
            storage
        }

        /// Read an entry without going through the trait
        #[must_use]
        pub fn get(&self, key: &str) -> Option<String> {
            self.lock().get(key).cloned()
        }

        /// Number of stored entries
        #[must_use]
        pub fn len(&self) -> usize {
            self.lock().len()
        }

        /// Whether nothing has been stored
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.lock().is_empty()
        }

        /// Make every subsequent `set_item` fail (or succeed again)
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        #[allow(clippy::expect_used)] // Test double: a poisoned lock means a test already panicked
        fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
            self.entries.lock().expect("memory storage lock poisoned")
        }
    }

    impl KeyValueStorage for MemoryStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.get(key))
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable(format!(
                    "write to {key} rejected"
                )));
            }
            self.lock().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock, MemoryStorage, SequentialIdGenerator};
pub use reducer_test::{assertions, ReducerTest};
