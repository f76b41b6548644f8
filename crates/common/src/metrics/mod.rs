//! Metrics and observability utilities
//!
//! Prometheus metric descriptions with standardized naming conventions.

use metrics::{describe_counter, describe_histogram, Unit};

/// Metrics prefix for all Lectern metrics
pub const METRICS_PREFIX: &str = "lectern";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001, // 1ms
    0.005, // 5ms
    0.010, // 10ms
    0.025, // 25ms
    0.050, // 50ms
    0.100, // 100ms
    0.250, // 250ms
    0.500, // 500ms
    1.000, // 1s
    2.500, // 2.5s
    5.000, // 5s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Blob store metrics
    describe_counter!(
        format!("{}_blob_objects_stored_total", METRICS_PREFIX),
        Unit::Count,
        "Total blob objects stored"
    );

    describe_counter!(
        format!("{}_blob_objects_deleted_total", METRICS_PREFIX),
        Unit::Count,
        "Total blob objects deleted"
    );

    describe_counter!(
        format!("{}_blob_bytes_stored_total", METRICS_PREFIX),
        Unit::Bytes,
        "Total bytes written to the blob store"
    );

    describe_counter!(
        format!("{}_blob_bytes_read_total", METRICS_PREFIX),
        Unit::Bytes,
        "Total bytes read from the blob store"
    );
}
