//! Prometheus metrics for upstream lookups and served responses.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Upstream request latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "upstream_request_latency_ms";
/// Upstream requests counter metric name.
pub const METRIC_UPSTREAM_REQUESTS: &str = "upstream_requests_total";
/// Status requests counter metric name.
pub const METRIC_STATUS_REQUESTS: &str = "status_requests_total";
/// Degraded responses counter metric name.
pub const METRIC_DEGRADED_RESPONSES: &str = "degraded_responses_total";

/// Route label for the plain status endpoint.
pub const ROUTE_STATUS: &str = "status";
/// Route label for the badge endpoint.
pub const ROUTE_BADGE: &str = "badge";

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "Render API request latency in milliseconds"
    );
    describe_counter!(
        METRIC_UPSTREAM_REQUESTS,
        "Total Render API requests by operation and outcome"
    );
    describe_counter!(
        METRIC_STATUS_REQUESTS,
        "Total status and badge requests served"
    );
    describe_counter!(
        METRIC_DEGRADED_RESPONSES,
        "Total responses served with a fallback status after a failed lookup"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus recorder and return its render handle.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Record one upstream call with its latency and outcome.
pub fn record_upstream(operation: &'static str, start: Instant, ok: bool) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_UPSTREAM_LATENCY, "operation" => operation).record(latency_ms);

    let outcome = if ok { "ok" } else { "error" };
    counter!(METRIC_UPSTREAM_REQUESTS, "operation" => operation, "outcome" => outcome).increment(1);
}

/// Increment the served requests counter for a route.
pub fn inc_status_requests(route: &'static str) {
    counter!(METRIC_STATUS_REQUESTS, "route" => route).increment(1);
}

/// Increment the degraded responses counter for a route.
pub fn inc_degraded_responses(route: &'static str) {
    counter!(METRIC_DEGRADED_RESPONSES, "route" => route).increment(1);
}
