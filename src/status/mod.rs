//! Deploy status normalization and badge rendering.
//!
//! This module handles:
//! - Mapping raw Render deploy statuses to display statuses
//! - Mapping display statuses to badge colors
//! - The shields.io endpoint badge payload

pub mod badge;
pub mod types;

pub use badge::BadgeResponse;
pub use types::{color_for, color_for_label, normalize, DeployStatus, DisplayColor, DisplayStatus};
