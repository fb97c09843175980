//! Prometheus metrics for the quote service
//!
//! Features:
//! - Operation counters by kind and outcome
//! - Operation latency histogram
//! - Stored quote gauge

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::time::Duration;
use tracing::{error, info};

lazy_static::lazy_static! {
    /// Global metrics registry
    pub static ref METRICS_REGISTRY: Registry = Registry::new();

    pub static ref OPERATIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("quotebook_operations_total", "Total storage operations"),
        &["op", "status"]
    ).unwrap();

    pub static ref OPERATION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "quotebook_operation_duration_seconds",
            "Storage operation duration in seconds"
        ).buckets(vec![0.00001, 0.0001, 0.001, 0.01, 0.1, 1.0]),
        &["op"]
    ).unwrap();

    pub static ref QUOTES_STORED: IntGauge = IntGauge::new(
        "quotebook_quotes",
        "Number of stored quotes"
    ).unwrap();
}

/// Outcome label for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpStatus {
    Ok,
    NotFound,
}

impl OpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpStatus::Ok => "ok",
            OpStatus::NotFound => "not_found",
        }
    }

    pub fn found(found: bool) -> Self {
        if found {
            OpStatus::Ok
        } else {
            OpStatus::NotFound
        }
    }
}

/// Register all metrics with the global registry
///
/// Safe to call more than once; repeated registrations are ignored.
pub fn init_metrics() {
    METRICS_REGISTRY.register(Box::new(OPERATIONS_TOTAL.clone())).ok();
    METRICS_REGISTRY.register(Box::new(OPERATION_DURATION.clone())).ok();
    METRICS_REGISTRY.register(Box::new(QUOTES_STORED.clone())).ok();

    info!("Metrics initialized");
}

/// Count one operation and its latency
pub fn record_operation(op: &str, status: OpStatus, elapsed: Duration) {
    OPERATIONS_TOTAL.with_label_values(&[op, status.as_str()]).inc();
    OPERATION_DURATION
        .with_label_values(&[op])
        .observe(elapsed.as_secs_f64());
}

pub fn set_quote_count(count: usize) {
    QUOTES_STORED.set(count as i64);
}

/// Export all metrics in Prometheus text format
pub fn export_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %e, "Failed to encode metrics");
        return String::from("# Error encoding metrics\n");
    }

    String::from_utf8(buffer).unwrap_or_else(|_| String::from("# Error converting metrics\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_metrics_twice() {
        init_metrics();
        init_metrics();
    }

    #[test]
    fn test_record_operation() {
        init_metrics();
        let before = OPERATIONS_TOTAL.with_label_values(&["get", "ok"]).get();
        record_operation("get", OpStatus::Ok, Duration::from_micros(5));

        assert!(OPERATIONS_TOTAL.with_label_values(&["get", "ok"]).get() > before);
        assert!(export_metrics().contains("quotebook_operations_total"));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(OpStatus::found(true).as_str(), "ok");
        assert_eq!(OpStatus::found(false).as_str(), "not_found");
    }
}
