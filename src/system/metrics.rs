//! Metrics collection for the graph actor
//!
//! Everything is registered once with the default Prometheus registry and exposed
//! as text on `/metrics`.

use crate::core::error::Result;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, register_int_gauge, Histogram,
    IntCounterVec, IntGauge,
};
use std::time::Instant;

/// Counters and gauges describing queue traffic
pub struct Metrics {
    /// Operations submitted, labelled by operation kind
    pub operations_submitted: IntCounterVec,
    /// Operations completed by the actor, labelled by reply status
    pub operations_completed: IntCounterVec,
    /// Entries currently waiting in the queue
    pub queue_depth: IntGauge,
    /// Time spent running one operation on the actor thread
    pub operation_duration: Histogram,
}

impl Metrics {
    /// Register all metrics with the default registry
    pub fn new() -> Result<Self> {
        Ok(Self {
            operations_submitted: register_int_counter_vec!(
                "ga_operations_submitted_total",
                "Total number of operations submitted to the actor queue",
                &["kind"]
            )?,
            operations_completed: register_int_counter_vec!(
                "ga_operations_completed_total",
                "Total number of operations completed by the actor",
                &["status"]
            )?,
            queue_depth: register_int_gauge!(
                "ga_queue_depth",
                "Number of operations waiting in the actor queue"
            )?,
            operation_duration: register_histogram!(
                "ga_operation_duration_seconds",
                "Duration of actor operations in seconds",
                vec![0.00001, 0.0001, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
            )?,
        })
    }

    /// Get the global metrics instance
    pub fn global() -> &'static Metrics {
        static INSTANCE: Lazy<Metrics> =
            Lazy::new(|| Metrics::new().expect("Failed to initialize metrics"));
        &INSTANCE
    }
}

/// Records elapsed time into a histogram when finished
pub struct Timer {
    start: Instant,
    histogram: Histogram,
}

impl Timer {
    /// Start a new timer
    pub fn start(histogram: Histogram) -> Self {
        Self {
            start: Instant::now(),
            histogram,
        }
    }

    /// Record the elapsed time and consume the timer
    pub fn finish(self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

/// Make sure every metric is registered before the first scrape
pub fn init_registry() {
    let _ = Metrics::global();
}

/// Collect all registered metrics in the Prometheus text format
pub fn collect_metrics() -> String {
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode_to_string(&metric_families).unwrap_or_default()
}
