//! Metric descriptions for observability.
//!
//! The runtime and the seat map record through the `metrics` facade. No
//! exporter is installed here; a host that wants Prometheus or statsd output
//! installs its own recorder and calls [`describe_metrics`] once at startup.
//!
//! # Example
//!
//! ```rust,no_run
//! seatmap_runtime::metrics::describe_metrics();
//! ```

use metrics::{describe_counter, describe_histogram};

// Re-export metrics macros for use in other crates
pub use metrics::{counter, gauge, histogram};

/// Register all metric descriptions.
pub fn describe_metrics() {
    // Store Metrics
    describe_counter!(
        "store.commands.total",
        "Total number of actions processed by the store"
    );
    describe_histogram!(
        "store.reducer.duration_seconds",
        "Time taken to execute the reducer"
    );
    describe_counter!(
        "store.effects.executed",
        "Total number of effects executed, labelled by type"
    );
    describe_counter!(
        "store.effects.cancelled",
        "Total number of in-flight effect tasks aborted by Effect::Cancel"
    );
    describe_counter!(
        "store.shutdown.initiated",
        "Number of graceful shutdowns started"
    );
    describe_counter!(
        "store.shutdown.timeout",
        "Number of shutdowns that timed out with effects still running"
    );
    describe_counter!(
        "store.shutdown.rejected_actions",
        "Actions rejected because the store was shutting down"
    );

    // Seat Map Metrics
    describe_counter!(
        "seatmap.activations.total",
        "Seat activations, labelled by outcome"
    );
    describe_counter!(
        "seatmap.bookings.total",
        "Number of bookings finalized"
    );
    describe_counter!(
        "seatmap.seats.booked.total",
        "Number of seats converted to booked"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describing_without_recorder_is_harmless() {
        describe_metrics();
        describe_metrics();
    }
}
