//! Metric names recorded by the store.
//!
//! The store records through the `metrics` facade only. Without an installed
//! recorder every call is a no-op, so binaries that want numbers install an
//! exporter of their choice and call [`register_metrics`] once at startup.

use metrics::{describe_counter, describe_histogram};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Actions accepted by `Store::send`
pub const ACTIONS_TOTAL: &str = "store.actions.total";

/// Actions fed back into the reducer by `Effect::Dispatch`
pub const DISPATCHED_TOTAL: &str = "store.dispatch.total";

/// Actions rejected because the store was shut down
pub const REJECTED_TOTAL: &str = "store.shutdown.rejected_actions";

/// Wall time spent inside `Reducer::reduce`
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Describe every metric the store records.
pub fn register_metrics() {
    describe_counter!(ACTIONS_TOTAL, "Total number of actions sent to the store");
    describe_counter!(
        DISPATCHED_TOTAL,
        "Total number of actions fed back into the reducer by effects"
    );
    describe_counter!(
        REJECTED_TOTAL,
        "Total number of actions rejected after shutdown"
    );
    describe_histogram!(
        REDUCER_DURATION,
        metrics::Unit::Seconds,
        "Time spent executing the reducer for a single action"
    );
}
