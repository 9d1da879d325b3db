//! Render platform API access.
//!
//! This module handles:
//! - The `DeployApi` seam the HTTP handlers depend on
//! - The reqwest-backed Render REST client
//! - Response payload shapes
//! - Mock client for testing

pub mod client;
pub mod mock;
pub mod types;

pub use client::{DeployApi, RenderClient};
pub use mock::{MockConfig, MockRenderClient, MockService};
pub use types::{Deploy, DeployListItem, Service};
