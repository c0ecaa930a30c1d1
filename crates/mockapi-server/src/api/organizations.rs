// ABOUTME: Organization and membership handlers: create/list organizations, and add, list (cursor
// ABOUTME: paginated) and remove members. Errors use the `{detail}` envelope.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use mockapi_core::pagination::DEFAULT_CURSOR_SIZE;
use mockapi_core::{Organization, Role, cursor_page, parse_lenient};
use serde::{Deserialize, Serialize};

use super::{body_or_default, loose_string, present};
use crate::app_state::SharedState;
use crate::error::DetailError;
use crate::guards::BearerPresence;

/// Request body for creating an organization.
#[derive(Debug, Default, Deserialize)]
pub struct CreateOrganizationRequest {
    #[serde(default, deserialize_with = "loose_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub owner_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub description: Option<String>,
}

/// Request body for adding a member.
#[derive(Debug, Default, Deserialize)]
pub struct AddMemberRequest {
    #[serde(default, deserialize_with = "loose_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub role: Option<String>,
}

/// Request body for removing a member.
#[derive(Debug, Default, Deserialize)]
pub struct RemoveMemberRequest {
    #[serde(default, deserialize_with = "loose_string")]
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MembersQuery {
    pub size: Option<String>,
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrganizationList {
    pub organizations: Vec<Organization>,
}

/// A membership row as exposed by the listing: only the user and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub user_id: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct MemberPage {
    pub users: Vec<MemberSummary>,
    pub next_cursor: Option<String>,
}

/// GET /organizations - All organizations. Needs a bearer token.
pub async fn list_organizations(
    _auth: BearerPresence,
    State(state): State<SharedState>,
) -> Json<OrganizationList> {
    let store = state.store.read().await;
    Json(OrganizationList {
        organizations: store.organizations().to_vec(),
    })
}

/// POST /organizations - Create an organization; the owner becomes its first admin.
pub async fn create_organization(
    State(state): State<SharedState>,
    body: Result<Json<CreateOrganizationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Organization>), DetailError> {
    let req = body_or_default(body);
    let (Some(name), Some(owner_id)) = (present(&req.name), present(&req.owner_id)) else {
        return Err(DetailError::bad_request("name and owner_id are required"));
    };
    let description = req.description.as_deref().unwrap_or("");

    let mut store = state.store.write().await;
    let organization = store.create_organization(name, description, owner_id, &mut rand::thread_rng());
    drop(store);

    tracing::info!(organization_id = %organization.id, owner_id, "created organization");
    Ok((StatusCode::CREATED, Json(organization)))
}

/// POST /organizations/{organization_id}/users - Add a member (role defaults to member).
pub async fn add_member(
    State(state): State<SharedState>,
    Path(organization_id): Path<String>,
    body: Result<Json<AddMemberRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), DetailError> {
    let req = body_or_default(body);
    let mut store = state.store.write().await;

    if store.organization(&organization_id).is_none() {
        return Err(DetailError::organization_not_found());
    }
    let user_id = present(&req.user_id).ok_or_else(|| DetailError::bad_request("user_id is required"))?;
    let role = Role::from_requested(req.role.as_deref());

    store.add_member(&organization_id, user_id, role)?;
    tracing::info!(organization_id = %organization_id, user_id, ?role, "added member");

    Ok((StatusCode::CREATED, Json(serde_json::json!({}))))
}

/// GET /organizations/{organization_id}/users - Cursor-paginated member list.
pub async fn list_members(
    State(state): State<SharedState>,
    Path(organization_id): Path<String>,
    Query(query): Query<MembersQuery>,
) -> Result<Json<MemberPage>, DetailError> {
    let size = parse_lenient(query.size.as_deref()).unwrap_or(DEFAULT_CURSOR_SIZE);

    let store = state.store.read().await;
    let rows = store.members(&organization_id)?;
    let page = cursor_page(rows, query.cursor.as_deref(), size, |row| row.user_id.as_str());

    Ok(Json(MemberPage {
        users: page
            .items
            .into_iter()
            .map(|row| MemberSummary {
                user_id: row.user_id,
                role: row.role,
            })
            .collect(),
        next_cursor: page.next_cursor,
    }))
}

/// DELETE /organizations/{organization_id}/users - Remove a member.
pub async fn remove_member(
    State(state): State<SharedState>,
    Path(organization_id): Path<String>,
    body: Result<Json<RemoveMemberRequest>, JsonRejection>,
) -> Result<StatusCode, DetailError> {
    let req = body_or_default(body);
    let mut store = state.store.write().await;

    if store.organization(&organization_id).is_none() {
        return Err(DetailError::organization_not_found());
    }
    let user_id = present(&req.user_id).ok_or_else(|| DetailError::bad_request("user_id is required"))?;

    store.remove_member(&organization_id, user_id)?;
    tracing::info!(organization_id = %organization_id, user_id, "removed member");

    Ok(StatusCode::NO_CONTENT)
}
