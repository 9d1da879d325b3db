//! Render deploy status relay.
//!
//! Exposes the status of a Render service's latest deploy as a small JSON
//! payload and as a [shields.io endpoint](https://shields.io/badges/endpoint-badge)
//! badge, so build status can be embedded in docs and dashboards.
//!
//! # Display mapping
//!
//! ```text
//! created, *_in_progress            -> "in progress" (important)
//! live                              -> "success"     (success)
//! deactivated, *_failed, canceled   -> "failed"      (critical)
//! anything else                     -> "unknown"     (inactive)
//! ```
//!
//! Every request is answered with `200 OK`; failed upstream lookups degrade
//! to the `unknown` status instead of an HTTP error.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`status`]: Status normalization, colors and the badge payload
//! - [`render`]: Render API client and mock
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod render;
pub mod status;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, RelayError, Result};
