// ABOUTME: Route definitions for the mockapi HTTP API.
// ABOUTME: Assembles every handler into one Axum Router with CORS, request tracing and shared state.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, Method, header};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;
use crate::guards::ORG_HEADER;
use crate::upload::MAX_BODY_BYTES;

/// Every route served, as (method, path), for the startup banner.
pub const ROUTE_TABLE: &[(&str, &str)] = &[
    ("GET", "/health"),
    ("GET", "/libraries"),
    ("GET", "/library/:id"),
    ("GET", "/library/:libraryId/context/:contextId"),
    ("POST", "/library/:id/contexts"),
    ("GET", "/organizations"),
    ("POST", "/organizations"),
    ("POST", "/organizations/:organization_id/users"),
    ("GET", "/organizations/:organization_id/users"),
    ("DELETE", "/organizations/:organization_id/users"),
    ("POST", "/check-access"),
    ("GET", "/users/me"),
];

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(api::identity::health))
        .route("/libraries", get(api::catalog::list_libraries))
        .route("/library/{id}", get(api::catalog::get_library))
        .route(
            "/library/{library_id}/context/{context_id}",
            get(api::contexts::get_context),
        )
        .route(
            "/library/{id}/contexts",
            post(api::contexts::create_context).layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .route(
            "/organizations",
            get(api::organizations::list_organizations).post(api::organizations::create_organization),
        )
        .route(
            "/organizations/{organization_id}/users",
            get(api::organizations::list_members)
                .post(api::organizations::add_member)
                .delete(api::organizations::remove_member),
        )
        .route("/check-access", post(api::access::check_access))
        .route("/users/me", get(api::identity::current_user))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Wide-open CORS. Preflight requests are answered by the layer itself.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(ORG_HEADER),
        ])
}
