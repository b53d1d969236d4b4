//! Metric descriptions for observability and monitoring.
//!
//! The [`Store`](crate::Store) records through the `metrics` facade. Nothing
//! is exported unless the host installs a recorder; call
//! [`register_metrics`] once after installing one so that every metric
//! carries its unit and description.
//!
//! | Metric | Kind | Meaning |
//! |---|---|---|
//! | `store.actions.total` | counter | actions sent to the store |
//! | `store.effects.executed` | counter | effects executed, tagged by `type` |
//! | `store.reducer.duration_seconds` | histogram | time spent in the reducer |
//! | `store.persist.rollbacks` | counter | failed persists that restored state |
//! | `store.contract_violations` | counter | actions rejected with a fault |

use metrics::{describe_counter, describe_histogram, Unit};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Counter of actions sent to the store
pub const ACTIONS_TOTAL: &str = "store.actions.total";

/// Counter of executed effects, tagged by `type`
pub const EFFECTS_EXECUTED: &str = "store.effects.executed";

/// Histogram of reducer execution time
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Counter of persist failures that rolled state back
pub const PERSIST_ROLLBACKS: &str = "store.persist.rollbacks";

/// Counter of actions rejected with a contract violation
pub const CONTRACT_VIOLATIONS: &str = "store.contract_violations";

/// Register descriptions for every store metric with the installed recorder
pub fn register_metrics() {
    describe_counter!(ACTIONS_TOTAL, Unit::Count, "Actions sent to the store");
    describe_counter!(
        EFFECTS_EXECUTED,
        Unit::Count,
        "Effects executed by the store, by effect type"
    );
    describe_histogram!(
        REDUCER_DURATION,
        Unit::Seconds,
        "Time spent running the reducer for one action"
    );
    describe_counter!(
        PERSIST_ROLLBACKS,
        Unit::Count,
        "Persist failures that restored the pre-action state"
    );
    describe_counter!(
        CONTRACT_VIOLATIONS,
        Unit::Count,
        "Actions rejected because a caller contract was broken"
    );
}
