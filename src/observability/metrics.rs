//! Metrics collection and exposition.
//!
//! # Metrics
//! - `flash_routes_registered_total` (counter): routes bound, by service and verb
//! - `flash_routes_skipped_total` (counter): endpoint fields whose handler failed validation
//! - `flash_requests_total` (counter): dispatched requests by method, route, status
//! - `flash_request_duration_seconds` (histogram): handler latency
//!
//! # Design Decisions
//! - Without an installed recorder every call is a no-op
//! - Route label is the registered path, never the raw request path

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::Verb;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

pub fn record_route_registered(service: &str, verb: Verb) {
    counter!(
        "flash_routes_registered_total",
        "service" => service.to_string(),
        "verb" => verb.as_str()
    )
    .increment(1);
}

pub fn record_route_skipped(service: &str) {
    counter!("flash_routes_skipped_total", "service" => service.to_string()).increment(1);
}

pub fn record_request(method: &'static str, route: &str, status: u16, start: Instant) {
    let route = route.to_string();
    let status = status.to_string();

    counter!(
        "flash_requests_total",
        "method" => method,
        "route" => route.clone(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "flash_request_duration_seconds",
        "method" => method,
        "route" => route,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}
