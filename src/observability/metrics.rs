//! Metrics collection and exposition.
//!
//! # Metrics
//! - `loader_attempts_total` (counter): attempts by resource, outcome
//! - `loader_loads_total` (counter): finished loads by resource, status
//! - `loader_load_duration_seconds` (histogram): time from first attempt to outcome
//! - `loader_cache_hits_total` (counter): loads served from cache
//! - `loader_coalesced_total` (counter): loads that joined an in-flight load
//! - `loader_cache_entries` (gauge): current cache size
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

pub fn record_attempt(resource: &'static str, outcome: &'static str) {
    ::metrics::counter!("loader_attempts_total", "resource" => resource, "outcome" => outcome)
        .increment(1);
}

pub fn record_load(resource: &'static str, success: bool, start: Instant) {
    let status = if success { "success" } else { "failure" };
    ::metrics::counter!("loader_loads_total", "resource" => resource, "status" => status)
        .increment(1);
    ::metrics::histogram!("loader_load_duration_seconds", "resource" => resource)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_cache_hit(resource: &'static str) {
    ::metrics::counter!("loader_cache_hits_total", "resource" => resource).increment(1);
}

pub fn record_coalesced(resource: &'static str) {
    ::metrics::counter!("loader_coalesced_total", "resource" => resource).increment(1);
}

pub fn record_cache_size(size: usize) {
    ::metrics::gauge!("loader_cache_entries").set(size as f64);
}
