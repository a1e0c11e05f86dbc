//! Prometheus metrics for the ingest pipeline.
//!
//! The server registers these alongside its own HTTP metrics via
//! [`all_metrics`].

use once_cell::sync::Lazy;
use prometheus::core::Collector;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

/// Ingest runs by source and outcome.
pub static INGEST_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("roster_ingest_total", "Total roster ingest runs"),
        &["source", "result"], // source: "archive", "csv", "upload"; result: "success", "failed"
    )
    .unwrap()
});

/// Ingest duration in seconds.
pub static INGEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "roster_ingest_duration_seconds",
            "Duration of a roster ingest run",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0]),
        &["source"],
    )
    .unwrap()
});

/// Rows decoded across all ingest runs.
pub static ROWS_DECODED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("roster_rows_decoded_total", "Total roster rows decoded").unwrap()
});

/// Distinct members per returned roster.
pub static MEMBERS_RETURNED: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "roster_members_returned",
            "Number of distinct members in a returned roster",
        )
        .buckets(vec![0.0, 1.0, 10.0, 100.0, 1_000.0, 10_000.0, 100_000.0]),
    )
    .unwrap()
});

/// All core metrics, for registration in the server registry.
pub fn all_metrics() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(INGEST_TOTAL.clone()),
        Box::new(INGEST_DURATION.clone()),
        Box::new(ROWS_DECODED.clone()),
        Box::new(MEMBERS_RETURNED.clone()),
    ]
}
