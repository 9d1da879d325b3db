//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics::{inc_degraded_responses, inc_status_requests, ROUTE_BADGE, ROUTE_STATUS};
use crate::render::DeployApi;
use crate::status::{BadgeResponse, DisplayStatus};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Deploy lookups, shared read-only across requests.
    pub client: Arc<dyn DeployApi>,
    /// Prometheus handle when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around a deploy client.
    pub fn new(client: Arc<dyn DeployApi>) -> Self {
        Self {
            client,
            metrics: None,
        }
    }

    /// Serve metrics from the given Prometheus handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Plain status response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Display status of the latest deploy.
    pub status: DisplayStatus,
}

impl Default for StatusResponse {
    fn default() -> Self {
        Self {
            status: DisplayStatus::normalize(None),
        }
    }
}

/// Resolve the plain status for an optional service id.
///
/// Lookup failures degrade to `unknown`.
pub async fn resolve_status(client: &dyn DeployApi, service_id: Option<&str>) -> StatusResponse {
    let Some(service_id) = service_id else {
        debug!("No service ID in url");
        return StatusResponse::default();
    };

    debug!("Getting deploys for Render service: {}", service_id);

    match client.latest_deploy_status(service_id).await {
        Ok(raw) => StatusResponse {
            status: DisplayStatus::normalize(raw.as_deref()),
        },
        Err(e) => {
            debug!(service_id = %service_id, error = %e, "Deploy lookup failed");
            inc_degraded_responses(ROUTE_STATUS);
            StatusResponse::default()
        }
    }
}

/// Resolve the shields.io badge for an optional service id.
///
/// A failed service lookup returns the default badge without looking up
/// deploys; a failed deploy lookup keeps the resolved label.
pub async fn resolve_badge(client: &dyn DeployApi, service_id: Option<&str>) -> BadgeResponse {
    let badge = BadgeResponse::default();

    let Some(service_id) = service_id else {
        debug!("No service ID in url");
        return badge;
    };

    let badge = match client.service_name(service_id).await {
        Ok(name) => {
            debug!("Getting deploys for Render service: {}({})", name, service_id);
            badge.with_service_name(&name)
        }
        Err(e) => {
            debug!(service_id = %service_id, error = %e, "Service lookup failed");
            inc_degraded_responses(ROUTE_BADGE);
            return badge;
        }
    };

    match client.latest_deploy_status(service_id).await {
        Ok(raw) => badge.with_deploy_status(raw.as_deref()),
        Err(e) => {
            debug!(service_id = %service_id, error = %e, "Deploy lookup failed");
            inc_degraded_responses(ROUTE_BADGE);
            badge.with_failed_status()
        }
    }
}

fn path_service_id(id: Option<Path<String>>) -> Option<String> {
    id.map(|Path(id)| id).filter(|id| !id.is_empty())
}

/// Status handler - always returns 200 with `{"status": ...}`.
pub async fn status(
    State(state): State<AppState>,
    id: Option<Path<String>>,
) -> Json<StatusResponse> {
    inc_status_requests(ROUTE_STATUS);
    let service_id = path_service_id(id);
    Json(resolve_status(state.client.as_ref(), service_id.as_deref()).await)
}

/// Badge handler - always returns 200 with a shields.io endpoint payload.
pub async fn badge(
    State(state): State<AppState>,
    id: Option<Path<String>>,
) -> Json<BadgeResponse> {
    inc_status_requests(ROUTE_BADGE);
    let service_id = path_service_id(id);
    Json(resolve_badge(state.client.as_ref(), service_id.as_deref()).await)
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus exposition handler - 404 when metrics are disabled.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
