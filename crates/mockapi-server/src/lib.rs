// ABOUTME: HTTP server for mockapi: a local stand-in for the libraries, organizations and access API.
// ABOUTME: Uses Axum with a shared in-memory store; handlers are grouped by route family under `api`.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod guards;
pub mod routes;
pub mod upload;

pub use app_state::{AppState, SharedState};
pub use config::{ConfigError, MockConfig};
pub use routes::{ROUTE_TABLE, create_router};
