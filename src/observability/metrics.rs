//! Metrics collection and exposition.
//!
//! # Metrics
//! - `svc_api_requests_total` (counter): handled calls by operation, status
//! - `svc_api_request_duration_seconds` (histogram): call latency by operation
//!
//! Recording is a no-op until a recorder is installed, so handlers and tests
//! can record unconditionally.

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished call.
pub fn record_call(operation: &'static str, status: u16, elapsed: Duration) {
    metrics::counter!(
        "svc_api_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("svc_api_request_duration_seconds", "operation" => operation)
        .record(elapsed.as_secs_f64());
}
