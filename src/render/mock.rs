//! Mock Render client for unit testing.
//!
//! This module provides an in-memory [`DeployApi`] that can be used in
//! tests without making real network requests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::ApiError;
use crate::utils::title_case;

use super::client::DeployApi;

/// Mock service data.
#[derive(Debug, Clone, Default)]
pub struct MockService {
    /// Raw service name, title-cased on lookup like the real client.
    pub name: String,
    /// Raw status of the latest deploy; `None` means no deploys.
    pub latest_status: Option<String>,
}

/// Configuration for mock client behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Whether to fail service lookups.
    pub fail_service: bool,
    /// Whether to fail deploy lookups.
    pub fail_deploys: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// Mock Render client for testing.
#[derive(Debug, Clone, Default)]
pub struct MockRenderClient {
    config: MockConfig,
    services: Arc<Mutex<HashMap<String, MockService>>>,
    service_calls: Arc<AtomicUsize>,
    deploy_calls: Arc<AtomicUsize>,
}

impl MockRenderClient {
    /// Create a new mock client with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock client with custom configuration.
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Register a service.
    pub fn add_service(
        &self,
        service_id: impl Into<String>,
        name: impl Into<String>,
        latest_status: Option<&str>,
    ) {
        let mut services = self.services.lock().unwrap();
        services.insert(
            service_id.into(),
            MockService {
                name: name.into(),
                latest_status: latest_status.map(str::to_string),
            },
        );
    }

    /// Number of service lookups made.
    pub fn service_calls(&self) -> usize {
        self.service_calls.load(Ordering::SeqCst)
    }

    /// Number of deploy lookups made.
    pub fn deploy_calls(&self) -> usize {
        self.deploy_calls.load(Ordering::SeqCst)
    }

    /// Total upstream lookups made.
    pub fn total_calls(&self) -> usize {
        self.service_calls() + self.deploy_calls()
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }

    fn lookup(&self, service_id: &str) -> Result<MockService, ApiError> {
        let services = self.services.lock().unwrap();
        services.get(service_id).cloned().ok_or_else(|| ApiError::Status {
            status: StatusCode::NOT_FOUND,
            path: format!("/services/{}", service_id),
        })
    }
}

#[async_trait]
impl DeployApi for MockRenderClient {
    async fn latest_deploy_status(&self, service_id: &str) -> Result<Option<String>, ApiError> {
        self.deploy_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.config.fail_deploys {
            return Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                path: format!("/services/{}/deploys", service_id),
            });
        }

        Ok(self.lookup(service_id)?.latest_status)
    }

    async fn service_name(&self, service_id: &str) -> Result<String, ApiError> {
        self.service_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.config.fail_service {
            return Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                path: format!("/services/{}", service_id),
            });
        }

        Ok(title_case(&self.lookup(service_id)?.name))
    }
}
