// src/utils/prometheus_metrics.rs

use once_cell::sync::Lazy;
use prometheus::{
    register_counter, register_counter_vec, register_histogram, Counter, CounterVec, Encoder,
    Histogram, TextEncoder,
};

use crate::error::{PipelineError, Result};

pub static REQUESTS_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "scrubber_requests_total",
        "Total number of cleaning requests received."
    )
    .expect("Failed to register REQUESTS_TOTAL counter")
});

pub static REQUESTS_FAILED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "scrubber_requests_failed_total",
        "Total number of cleaning requests that ended in an error."
    )
    .expect("Failed to register REQUESTS_FAILED_TOTAL counter")
});

pub static OPERATIONS_APPLIED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "scrubber_operations_applied_total",
        "Number of times each cleaning operation was applied.",
        &["operation"]
    )
    .expect("Failed to register OPERATIONS_APPLIED_TOTAL counter vec")
});

pub static ROWS_PROCESSED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "scrubber_rows_processed_total",
        "Total number of input rows passed through the pipeline."
    )
    .expect("Failed to register ROWS_PROCESSED_TOTAL counter")
});

pub static CLEANING_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "scrubber_cleaning_duration_seconds",
        "Histogram of end-to-end cleaning durations (parse, pipeline, serialize)."
    )
    .expect("Failed to register CLEANING_DURATION_SECONDS histogram")
});

/// Renders the default registry in the Prometheus text format.
pub fn gather_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = vec![];
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| PipelineError::Unexpected(format!("Could not encode prometheus metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| PipelineError::Unexpected(format!("Prometheus metrics UTF-8 error: {}", e)))
}
