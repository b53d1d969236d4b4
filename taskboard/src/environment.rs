//! Production implementations of the environment traits.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use taskboard_core::environment::{Clock, IdGenerator};

/// Time-derived, strictly increasing identifiers
///
/// Ids are decimal milliseconds since the Unix epoch, read from the
/// injected clock. When two ids are requested within the same millisecond
/// (or the clock steps backwards) the generator hands out `last + 1`
/// instead, so ids never repeat.
pub struct MonotonicIdGenerator {
    clock: Arc<dyn Clock>,
    last: AtomicI64,
}

impl MonotonicIdGenerator {
    /// Creates a generator reading time from `clock`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicI64::new(0),
        }
    }

    /// Never hand out `id` or anything below it
    ///
    /// Call with every id loaded from storage so a session started after a
    /// clock rollback cannot reuse an old id. Non-numeric ids are ignored.
    pub fn observe(&self, id: &str) {
        if let Ok(value) = id.parse::<i64>() {
            self.last.fetch_max(value, Ordering::AcqRel);
        }
    }
}

impl std::fmt::Debug for MonotonicIdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonotonicIdGenerator")
            .field("last", &self.last.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl IdGenerator for MonotonicIdGenerator {
    fn next_id(&self) -> String {
        let now = self.clock.now().timestamp_millis();
        let mut last = self.last.load(Ordering::Acquire);
        loop {
            let candidate = now.max(last.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return candidate.to_string(),
                Err(actual) => last = actual,
            }
        }
    }
}
