//! shields.io endpoint badge payload.

use serde::{Deserialize, Serialize};

use super::types::{DisplayColor, DisplayStatus};

/// Label used until the service name is resolved.
pub const DEFAULT_LABEL: &str = "Render Unknown Service";

/// Logo name understood by shields.io.
pub const NAMED_LOGO: &str = "render";

/// Endpoint schema version expected by shields.io.
pub const SCHEMA_VERSION: u8 = 1;

/// Badge response in the shields.io endpoint format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeResponse {
    pub schema_version: u8,
    pub label: String,
    pub message: DisplayStatus,
    pub color: DisplayColor,
    pub named_logo: String,
    /// True unless both the service and the deploy lookups succeeded.
    pub is_error: bool,
}

impl BadgeResponse {
    /// Label for a resolved service name.
    pub fn label_for(service_name: &str) -> String {
        format!("Render {}", service_name)
    }

    /// Set the label from a resolved service name.
    pub fn with_service_name(mut self, service_name: &str) -> Self {
        self.label = Self::label_for(service_name);
        self
    }

    /// Record a successful deploy lookup.
    pub fn with_deploy_status(mut self, raw: Option<&str>) -> Self {
        self.message = DisplayStatus::normalize(raw);
        self.color = self.message.color();
        self.is_error = false;
        self
    }

    /// Record a failed deploy lookup; the label is kept.
    pub fn with_failed_status(mut self) -> Self {
        self.message = DisplayStatus::normalize(None);
        self.color = self.message.color();
        self.is_error = true;
        self
    }
}

impl Default for BadgeResponse {
    fn default() -> Self {
        let message = DisplayStatus::normalize(None);
        Self {
            schema_version: SCHEMA_VERSION,
            label: DEFAULT_LABEL.to_string(),
            message,
            color: message.color(),
            named_logo: NAMED_LOGO.to_string(),
            is_error: true,
        }
    }
}
