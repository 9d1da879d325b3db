//! HTTP API module for status, badge, health and metrics endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::{resolve_badge, resolve_status, AppState, StatusResponse};
pub use routes::create_router;
