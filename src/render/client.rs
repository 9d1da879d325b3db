//! Render REST API client.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::Config;
use crate::error::{ApiError, RelayError};
use crate::metrics;
use crate::utils::title_case;

use super::types::{latest_status, DeployListItem, Service};

/// Operation label for deploy list lookups.
pub const OP_LATEST_DEPLOY: &str = "latest_deploy";
/// Operation label for service lookups.
pub const OP_SERVICE: &str = "service";

/// Read-only deploy lookups the HTTP handlers depend on.
#[async_trait]
pub trait DeployApi: Send + Sync {
    /// Raw status of the most recent deploy of a service.
    ///
    /// `Ok(None)` means the service has no deploys or the status field
    /// was missing or not a string.
    async fn latest_deploy_status(&self, service_id: &str) -> Result<Option<String>, ApiError>;

    /// Title-cased display name of a service.
    async fn service_name(&self, service_id: &str) -> Result<String, ApiError>;
}

/// Render API client.
#[derive(Clone)]
pub struct RenderClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// API base URL, e.g. `https://api.render.com/v1`.
    base_url: Url,
    /// Bearer token.
    api_key: String,
}

impl RenderClient {
    /// Create a new client from config.
    pub fn new(config: &Config) -> Result<Self, RelayError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("render-status/", env!("CARGO_PKG_VERSION")))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90));

        // Without an explicit timeout reqwest never times out a request.
        if let Some(timeout) = config.http_timeout() {
            builder = builder.timeout(timeout);
        }

        let base_url = Url::parse(config.render_api_url.trim_end_matches('/')).map_err(|e| {
            RelayError::InvalidConfig(format!("RENDER_API_URL {:?}: {}", config.render_api_url, e))
        })?;

        Ok(Self {
            http: builder.build()?,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Get the API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/services/{id}/{tail...}` with the id as one encoded segment.
    fn service_url(&self, service_id: &str, tail: &[&str]) -> Result<Url, ApiError> {
        if service_id.is_empty() || service_id == "." || service_id == ".." {
            return Err(ApiError::InvalidServiceId(service_id.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidServiceId(service_id.to_string()))?
            .pop_if_empty()
            .push("services")
            .push(service_id)
            .extend(tail);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let path = url.path().to_string();
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status, path });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
            path,
            reason: e.to_string(),
        })
    }
}

impl fmt::Debug for RenderClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DeployApi for RenderClient {
    #[instrument(skip(self), fields(service_id = %service_id))]
    async fn latest_deploy_status(&self, service_id: &str) -> Result<Option<String>, ApiError> {
        let start = Instant::now();

        let result = async {
            let mut url = self.service_url(service_id, &["deploys"])?;
            url.query_pairs_mut().append_pair("limit", "1");
            let items: Vec<DeployListItem> = self.get_json(url).await?;
            Ok::<_, ApiError>(latest_status(&items))
        }
        .await;

        metrics::record_upstream(OP_LATEST_DEPLOY, start, result.is_ok());
        if let Ok(status) = &result {
            debug!(status = ?status, "Retrieved latest deploy status");
        }
        result
    }

    #[instrument(skip(self), fields(service_id = %service_id))]
    async fn service_name(&self, service_id: &str) -> Result<String, ApiError> {
        let start = Instant::now();

        let result = async {
            let url = self.service_url(service_id, &[])?;
            let service: Service = self.get_json(url).await?;
            Ok::<_, ApiError>(title_case(&service.name))
        }
        .await;

        metrics::record_upstream(OP_SERVICE, start, result.is_ok());
        if let Ok(name) = &result {
            debug!(name = %name, "Retrieved service name");
        }
        result
    }
}
