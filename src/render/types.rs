//! Render API response shapes.
//!
//! Only the fields the relay reads are modelled; everything else in the
//! payloads is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the deploy list endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeployListItem {
    /// Deploy details.
    #[serde(default)]
    pub deploy: Option<Deploy>,
    /// Pagination cursor.
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Deploy details.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Deploy {
    /// Deploy id.
    #[serde(default)]
    pub id: Option<String>,
    /// Raw status; kept untyped because unexpected shapes must not fail the lookup.
    #[serde(default)]
    pub status: Option<Value>,
}

impl DeployListItem {
    /// Status string of this deploy, if present and a string.
    pub fn status(&self) -> Option<&str> {
        self.deploy.as_ref()?.status.as_ref()?.as_str()
    }
}

/// Service metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Service {
    /// Service id.
    #[serde(default)]
    pub id: Option<String>,
    /// Service name as shown in the dashboard.
    pub name: String,
}

/// Status of the most recent deploy in a deploy list page.
pub fn latest_status(items: &[DeployListItem]) -> Option<String> {
    items.first()?.status().map(str::to_string)
}
