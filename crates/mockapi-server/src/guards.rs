// ABOUTME: Request guards: the `org-id` catalog header and the bearer-token presence check.
// ABOUTME: Tokens are never validated; only the `Bearer ` prefix on the Authorization header is required.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use mockapi_core::CatalogOrg;

use crate::error::{CatalogError, DetailError};

/// Header carrying the catalog organization id.
pub const ORG_HEADER: &str = "org-id";

const MISSING_ORG: &str = "Invalid or missing org-id header. Must be org-001 or org-002";
const INVALID_ORG: &str = "Invalid org-id header. Must be org-001 or org-002";

/// Raw `org-id` value, with an empty header treated as absent.
fn org_header(headers: &HeaderMap) -> Option<Result<&str, ()>> {
    let value = headers.get(ORG_HEADER)?;
    match value.to_str() {
        Ok("") => None,
        Ok(raw) => Some(Ok(raw)),
        Err(_) => Some(Err(())),
    }
}

/// The catalog organization for routes that require the header.
pub fn required_catalog_org(headers: &HeaderMap) -> Result<CatalogOrg, CatalogError> {
    org_header(headers)
        .and_then(Result::ok)
        .and_then(CatalogOrg::parse)
        .ok_or_else(|| CatalogError::bad_request(MISSING_ORG))
}

/// The catalog organization for routes where the header is optional. A present
/// but unknown value is still rejected.
pub fn optional_catalog_org(headers: &HeaderMap) -> Result<Option<CatalogOrg>, CatalogError> {
    match org_header(headers) {
        None => Ok(None),
        Some(raw) => raw
            .ok()
            .and_then(CatalogOrg::parse)
            .map(Some)
            .ok_or_else(|| CatalogError::bad_request(INVALID_ORG)),
    }
}

/// Extractor that only lets requests through when they carry
/// `Authorization: Bearer <anything>`. The token itself is ignored.
#[derive(Debug, Clone, Copy)]
pub struct BearerPresence;

impl<S> FromRequestParts<S> for BearerPresence
where
    S: Send + Sync,
{
    type Rejection = DetailError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let present = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("Bearer "));

        if present {
            Ok(BearerPresence)
        } else {
            tracing::debug!(path = %parts.uri.path(), "rejecting request without bearer token");
            Err(DetailError::unauthorized())
        }
    }
}
