//! Deploy status vocabulary and its display mapping.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Deploy status as reported by the Render API.
///
/// Covers every value currently documented for the deploys endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeployStatus {
    /// Deploy was created and is queued.
    Created,
    /// Build is running.
    BuildInProgress,
    /// Service update is running.
    UpdateInProgress,
    /// Deploy is serving traffic.
    Live,
    /// Deploy was replaced or switched off.
    Deactivated,
    /// Build step failed.
    BuildFailed,
    /// Service update failed.
    UpdateFailed,
    /// Deploy was canceled.
    Canceled,
    /// Pre-deploy command is running.
    PreDeployInProgress,
    /// Pre-deploy command failed.
    PreDeployFailed,
}

impl DeployStatus {
    /// Display category for this deploy status.
    pub fn display(&self) -> DisplayStatus {
        match self {
            DeployStatus::Created
            | DeployStatus::BuildInProgress
            | DeployStatus::UpdateInProgress
            | DeployStatus::PreDeployInProgress => DisplayStatus::InProgress,
            DeployStatus::Live => DisplayStatus::Success,
            DeployStatus::Deactivated
            | DeployStatus::BuildFailed
            | DeployStatus::UpdateFailed
            | DeployStatus::Canceled
            | DeployStatus::PreDeployFailed => DisplayStatus::Failed,
        }
    }
}

/// Status string shown to badge consumers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr, Default,
)]
pub enum DisplayStatus {
    /// No status could be determined.
    #[default]
    #[serde(rename = "unknown")]
    #[strum(serialize = "unknown")]
    Unknown,
    /// A build, update or pre-deploy step is running.
    #[serde(rename = "in progress")]
    #[strum(serialize = "in progress")]
    InProgress,
    /// The latest deploy is live.
    #[serde(rename = "success")]
    #[strum(serialize = "success")]
    Success,
    /// The latest deploy failed, was canceled or deactivated.
    #[serde(rename = "failed")]
    #[strum(serialize = "failed")]
    Failed,
}

impl DisplayStatus {
    /// Map a raw deploy status to its display category.
    ///
    /// Absent input and anything outside the known vocabulary map to
    /// [`DisplayStatus::Unknown`].
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(|s| DeployStatus::from_str(s).ok())
            .map(|status| status.display())
            .unwrap_or_default()
    }

    /// Badge color for this status.
    pub fn color(&self) -> DisplayColor {
        match self {
            DisplayStatus::InProgress => DisplayColor::Important,
            DisplayStatus::Success => DisplayColor::Success,
            DisplayStatus::Failed => DisplayColor::Critical,
            DisplayStatus::Unknown => DisplayColor::Inactive,
        }
    }

    /// Display string, as serialized.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Named shields.io color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DisplayColor {
    /// Used while a deploy is in progress.
    Important,
    /// Used for live deploys.
    Success,
    /// Used for failed deploys.
    Critical,
    /// Used when the status is unknown.
    #[default]
    Inactive,
}

/// Map a raw deploy status to its display category.
pub fn normalize(raw: Option<&str>) -> DisplayStatus {
    DisplayStatus::normalize(raw)
}

/// Badge color for a display status.
pub fn color_for(status: DisplayStatus) -> DisplayColor {
    status.color()
}

/// Badge color for a display string; anything unrecognized is inactive.
pub fn color_for_label(label: &str) -> DisplayColor {
    DisplayStatus::from_str(label)
        .map(|status| status.color())
        .unwrap_or_default()
}
