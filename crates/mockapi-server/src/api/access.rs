// ABOUTME: Access check handler: answers whether a user may perform an action on a resource.
// ABOUTME: Only organization resources are modelled; anything unknown is simply denied.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use super::{body_or_default, loose_string, present};
use crate::app_state::SharedState;
use crate::error::DetailError;

#[derive(Debug, Default, Deserialize)]
pub struct AccessRequest {
    #[serde(default, deserialize_with = "loose_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub resource_type: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub resource_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccessDecision {
    pub allowed: bool,
}

/// POST /check-access
pub async fn check_access(
    State(state): State<SharedState>,
    body: Result<Json<AccessRequest>, JsonRejection>,
) -> Result<Json<AccessDecision>, DetailError> {
    let req = body_or_default(body);
    let (Some(user_id), Some(action), Some(resource_type), Some(resource_id)) = (
        present(&req.user_id),
        present(&req.action),
        present(&req.resource_type),
        present(&req.resource_id),
    ) else {
        return Err(DetailError::bad_request(
            "user_id, action, resource_type, and resource_id are required",
        ));
    };

    let store = state.store.read().await;
    let allowed = store.check_access(user_id, action, resource_type, resource_id);
    tracing::debug!(user_id, action, resource_type, resource_id, allowed, "access check");

    Ok(Json(AccessDecision { allowed }))
}
