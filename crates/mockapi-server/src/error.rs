// ABOUTME: The two error envelopes of the API: `{success:false,message}` for catalog routes
// ABOUTME: and `{detail}` for organization/access routes, plus their mapping from store errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mockapi_core::StoreError;

/// Error returned by library and context routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogError {
    pub status: StatusCode,
    pub message: String,
}

impl CatalogError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::LibraryNotFound(_) => Self::new(StatusCode::NOT_FOUND, "Library not found"),
            StoreError::LibraryNotInOrganization { .. } => {
                Self::new(StatusCode::FORBIDDEN, "Library not found in this organization")
            }
            StoreError::ContextNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "Context not found in this library")
            }
            StoreError::AlreadyMember { .. } => Self::bad_request(err.to_string()),
            StoreError::OrganizationNotFound(_) | StoreError::MembershipNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, err.to_string())
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "success": false, "message": self.message })),
        )
            .into_response()
    }
}

/// Error returned by organization, membership, identity and access routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailError {
    pub status: StatusCode,
    pub detail: String,
}

impl DetailError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn organization_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Organization not found")
    }
}

impl From<StoreError> for DetailError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::OrganizationNotFound(_) => Self::organization_not_found(),
            StoreError::AlreadyMember { .. } => Self::bad_request("User already in organization"),
            StoreError::MembershipNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "User not found in organization")
            }
            StoreError::LibraryNotInOrganization { .. } => {
                Self::new(StatusCode::FORBIDDEN, err.to_string())
            }
            StoreError::LibraryNotFound(_) | StoreError::ContextNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, err.to_string())
            }
        }
    }
}

impl IntoResponse for DetailError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}
