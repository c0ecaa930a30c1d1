// ABOUTME: API module containing all HTTP handler functions for the mockapi routes.
// ABOUTME: Organized by route family: catalog, contexts, organizations, access, identity.

pub mod access;
pub mod catalog;
pub mod contexts;
pub mod identity;
pub mod organizations;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Unreadable or missing JSON bodies behave like `{}` so each handler can report
/// its own missing-field error. Body fields use [`loose_string`], so a mistyped
/// field never discards the rest of the body.
pub(crate) fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable JSON body, treating as empty");
            T::default()
        }
    }
}

/// A required string field counts as present only when non-empty.
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}

/// Field deserializer for string-ish body fields. `null`, `false` and `0` count as
/// absent; other non-strings keep their JSON text so they are present but match nothing.
pub(crate) fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    })
}
