// ABOUTME: Identity and health handlers: a freshly fabricated "current user" on every call,
// ABOUTME: and a health check that always answers ok with the current time.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use mockapi_core::User;
use mockapi_core::model::iso_millis;

use crate::app_state::SharedState;
use crate::guards::BearerPresence;

/// GET /users/me - A brand-new fake user on every call. The token is not inspected,
/// so there is no notion of a session across calls.
pub async fn current_user(_auth: BearerPresence, State(state): State<SharedState>) -> Json<User> {
    let mut store = state.store.write().await;
    let user = store.fabricate_user(&mut rand::thread_rng());
    tracing::debug!(user_id = %user.user_id, known_users = store.user_count(), "fabricated current user");
    Json(user)
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": iso_millis::format(&Utc::now()),
    }))
}
