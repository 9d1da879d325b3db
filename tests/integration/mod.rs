//! Integration tests for the Render status relay.
//!
//! These tests run the real `RenderClient` against a local stub of the
//! Render API bound to an ephemeral port, so no network access is needed.
//! Run with: cargo test --test integration

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use render_status::api::{create_router, resolve_badge, resolve_status, AppState};
use render_status::config::Config;
use render_status::render::{DeployApi, RenderClient};
use render_status::status::DisplayStatus;
use render_status::ApiError;

const API_KEY: &str = "rnd_integration";

/// A request seen by the stub.
#[derive(Debug, Clone)]
struct Recorded {
    path: String,
    query: Option<String>,
    authorization: Option<String>,
}

/// Stub of the Render API.
#[derive(Clone, Default)]
struct StubRender {
    services: Arc<HashMap<String, (Value, Value)>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubRender {
    fn new() -> Self {
        let mut services = HashMap::new();
        services.insert(
            "srv-live".to_string(),
            (
                json!({ "id": "srv-live", "name": "my-service", "type": "web_service" }),
                json!([
                    { "deploy": { "id": "dep-2", "status": "live" }, "cursor": "c2" },
                    { "deploy": { "id": "dep-1", "status": "build_failed" }, "cursor": "c1" }
                ]),
            ),
        );
        services.insert(
            "srv-fresh".to_string(),
            (json!({ "id": "srv-fresh", "name": "freshApp" }), json!([])),
        );
        services.insert(
            "srv-odd".to_string(),
            (
                json!({ "id": "srv-odd", "name": "odd" }),
                json!([{ "deploy": { "id": "dep-9", "status": 42 } }]),
            ),
        );
        services.insert(
            "srv-building".to_string(),
            (
                json!({ "id": "srv-building", "name": "worker_queue" }),
                json!([{ "deploy": { "id": "dep-3", "status": "pre_deploy_in_progress" } }]),
            ),
        );
        services.insert(
            "srv-a/b".to_string(),
            (
                json!({ "id": "srv-a/b", "name": "slashed" }),
                json!([{ "deploy": { "status": "canceled" } }]),
            ),
        );

        Self {
            services: Arc::new(services),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn record(&self, path: String, query: Option<String>, headers: &HeaderMap) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            path,
            query,
            authorization,
        });
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {}", API_KEY))
    }
}

async fn stub_service(
    State(stub): State<StubRender>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    stub.record(format!("/services/{}", id), None, &headers);

    if !StubRender::authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id == "srv-garbled" {
        return "<html>maintenance</html>".into_response();
    }

    match stub.services.get(&id) {
        Some((service, _)) => Json(service.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))).into_response(),
    }
}

async fn stub_deploys(
    State(stub): State<StubRender>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    stub.record(format!("/services/{}/deploys", id), query, &headers);

    if !StubRender::authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id == "srv-slow" {
        tokio::time::sleep(Duration::from_millis(500)).await;
        return Json(json!([])).into_response();
    }

    match stub.services.get(&id) {
        Some((_, deploys)) => Json(deploys.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))).into_response(),
    }
}

/// Serve a router on an ephemeral local port.
async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn spawn_stub() -> (StubRender, SocketAddr) {
    let stub = StubRender::new();
    let router = Router::new()
        .route("/v1/services/:id", get(stub_service))
        .route("/v1/services/:id/deploys", get(stub_deploys))
        .with_state(stub.clone());
    (stub, spawn(router).await)
}

fn config_for(addr: SocketAddr) -> Config {
    Config {
        api_key: API_KEY.to_string(),
        render_api_url: format!("http://{}/v1", addr),
        ..Config::default()
    }
}

#[tokio::test]
async fn latest_status_reads_first_deploy_with_auth_and_limit() {
    let (stub, addr) = spawn_stub().await;
    let client = RenderClient::new(&config_for(addr)).unwrap();

    let status = client.latest_deploy_status("srv-live").await.unwrap();

    assert_eq!(status.as_deref(), Some("live"));
    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/services/srv-live/deploys");
    assert_eq!(requests[0].query.as_deref(), Some("limit=1"));
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer rnd_integration")
    );
}

#[tokio::test]
async fn empty_deploy_list_is_none() {
    let (_stub, addr) = spawn_stub().await;
    let client = RenderClient::new(&config_for(addr)).unwrap();

    assert_eq!(client.latest_deploy_status("srv-fresh").await.unwrap(), None);
}

#[tokio::test]
async fn non_string_status_is_none() {
    let (_stub, addr) = spawn_stub().await;
    let client = RenderClient::new(&config_for(addr)).unwrap();

    assert_eq!(client.latest_deploy_status("srv-odd").await.unwrap(), None);
}

#[tokio::test]
async fn service_name_is_title_cased() {
    let (_stub, addr) = spawn_stub().await;
    let client = RenderClient::new(&config_for(addr)).unwrap();

    assert_eq!(client.service_name("srv-live").await.unwrap(), "My Service");
    assert_eq!(client.service_name("srv-fresh").await.unwrap(), "Fresh App");
}

#[tokio::test]
async fn service_id_with_slash_stays_one_segment() {
    let (stub, addr) = spawn_stub().await;
    let client = RenderClient::new(&config_for(addr)).unwrap();

    assert_eq!(client.service_name("srv-a/b").await.unwrap(), "Slashed");
    assert_eq!(stub.requests()[0].path, "/services/srv-a/b");
}

#[tokio::test]
async fn upstream_errors_surface_as_api_errors() {
    let (_stub, addr) = spawn_stub().await;
    let client = RenderClient::new(&config_for(addr)).unwrap();

    let missing = client.service_name("srv-missing").await;
    assert!(
        matches!(&missing, Err(ApiError::Status { status, .. }) if *status == StatusCode::NOT_FOUND),
        "{missing:?}"
    );

    let garbled = client.service_name("srv-garbled").await;
    assert!(matches!(garbled, Err(ApiError::Decode { .. })), "{garbled:?}");
}

#[tokio::test]
async fn wrong_api_key_is_unauthorized() {
    let (_stub, addr) = spawn_stub().await;
    let config = Config {
        api_key: "rnd_wrong".to_string(),
        ..config_for(addr)
    };
    let client = RenderClient::new(&config).unwrap();

    let result = client.latest_deploy_status("srv-live").await;
    assert!(
        matches!(&result, Err(ApiError::Status { status, .. }) if *status == StatusCode::UNAUTHORIZED),
        "{result:?}"
    );
}

#[tokio::test]
async fn configured_timeout_fails_slow_lookups() {
    let (_stub, addr) = spawn_stub().await;
    let config = Config {
        http_timeout_ms: Some(50),
        ..config_for(addr)
    };
    let client = RenderClient::new(&config).unwrap();

    let result = client.latest_deploy_status("srv-slow").await;
    assert!(matches!(result, Err(ApiError::Request(_))), "{result:?}");
}

#[tokio::test]
async fn unreachable_api_degrades_to_defaults() {
    // Bind then drop to get a local port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RenderClient::new(&config_for(addr)).unwrap();

    let status = resolve_status(&client, Some("srv-live")).await;
    assert_eq!(status.status, DisplayStatus::Unknown);

    let badge = resolve_badge(&client, Some("srv-live")).await;
    assert_eq!(badge.label, "Render Unknown Service");
    assert!(badge.is_error);
}

#[tokio::test]
async fn relay_serves_status_and_badges_end_to_end() {
    let (stub, stub_addr) = spawn_stub().await;
    let client = RenderClient::new(&config_for(stub_addr)).unwrap();
    let relay_addr = spawn(create_router(AppState::new(Arc::new(client)))).await;

    let http = reqwest::Client::new();
    let get = |path: &str| {
        let http = http.clone();
        let url = format!("http://{}{}", relay_addr, path);
        async move {
            let response = http.get(url).send().await.unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::OK);
            response.json::<Value>().await.unwrap()
        }
    };

    assert_eq!(get("/").await, json!({ "status": "unknown" }));
    assert_eq!(get("/srv-live").await, json!({ "status": "success" }));
    assert_eq!(get("/srv-building").await, json!({ "status": "in progress" }));
    assert_eq!(get("/srv-missing").await, json!({ "status": "unknown" }));

    assert_eq!(
        get("/endpoint/srv-building").await,
        json!({
            "schemaVersion": 1,
            "label": "Render Worker Queue",
            "message": "in progress",
            "color": "important",
            "namedLogo": "render",
            "isError": false,
        })
    );
    assert_eq!(
        get("/endpoint/srv-missing").await,
        json!({
            "schemaVersion": 1,
            "label": "Render Unknown Service",
            "message": "unknown",
            "color": "inactive",
            "namedLogo": "render",
            "isError": true,
        })
    );

    // Service lookup failed, so no deploy lookup for srv-missing on the badge route
    let missing_deploy_lookups = stub
        .requests()
        .iter()
        .filter(|r| r.path == "/services/srv-missing/deploys")
        .count();
    assert_eq!(missing_deploy_lookups, 1);
}
