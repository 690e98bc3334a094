//! Metrics collection and exposition.
//!
//! # Metrics
//! - `companion_requests_total` (counter): requests by method, route, status
//! - `companion_request_duration_seconds` (histogram): latency distribution
//! - `companion_redirects_rejected_total` (counter): refused post-login redirects
//! - `companion_pricing_rejections_total` (counter): refused prices by field
//!
//! # Design Decisions
//! - Without an installed recorder every call is a no-op
//! - Prometheus exporter only when enabled in config

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("companion_requests_total", &labels).increment(1);
    histogram!("companion_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_rejected_redirect(role: &str) {
    counter!("companion_redirects_rejected_total", "role" => role.to_string()).increment(1);
}

pub fn record_pricing_rejection(field: &str) {
    counter!("companion_pricing_rejections_total", "field" => field.to_string()).increment(1);
}
