// ABOUTME: Context handlers: multipart creation of a new context in a library (with optional PDFs)
// ABOUTME: and lookup of a previously created context by id.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use mockapi_core::{Library, LibraryElement};
use serde::Serialize;

use crate::app_state::SharedState;
use crate::error::CatalogError;
use crate::guards::{optional_catalog_org, required_catalog_org};
use crate::upload::{self, ContextForm, UploadedFile};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContextResponse {
    pub success: bool,
    pub element: LibraryElement,
    pub files_uploaded: usize,
    pub files: Vec<UploadedFile>,
    pub new_context_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextResponse {
    pub success: bool,
    pub library_id: String,
    pub library: Library,
    pub context: LibraryElement,
}

/// POST /library/{id}/contexts - Create a context from a multipart form.
///
/// The upload is drained first, so a rejected file fails the request before any
/// header or ownership check. Non-multipart bodies count as an empty form.
pub async fn create_context(
    State(state): State<SharedState>,
    Path(library_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CreateContextResponse>), CatalogError> {
    let form = match multipart {
        Ok(multipart) => upload::read_context_form(multipart).await.map_err(|e| {
            tracing::warn!(library_id = %library_id, error = %e, "rejected context upload");
            CatalogError::from(e)
        })?,
        Err(rejection) => {
            tracing::debug!(%rejection, "context request is not multipart, treating as empty form");
            ContextForm::default()
        }
    };

    let org = required_catalog_org(&headers)?;

    let description = form
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| CatalogError::bad_request("description is required"))?;

    let mut store = state.store.write().await;
    let created = store.add_context(org, &library_id, description, &mut rand::thread_rng());
    drop(store);
    let created = created?;

    tracing::info!(
        %org,
        library_id = %library_id,
        context_id = %created.element.id,
        files = form.files.len(),
        context_count = created.context_count,
        "created context"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateContextResponse {
            success: true,
            element: created.element,
            files_uploaded: form.files.len(),
            files: form.files,
            new_context_count: created.context_count,
        }),
    ))
}

/// GET /library/{library_id}/context/{context_id} - A stored context. Synthesized
/// elements have no stable id and are never found here.
pub async fn get_context(
    State(state): State<SharedState>,
    Path((library_id, context_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<ContextResponse>, CatalogError> {
    let org = optional_catalog_org(&headers)?;

    let store = state.store.read().await;
    let (library, context) = store.context(org, &library_id, &context_id)?;

    Ok(Json(ContextResponse {
        success: true,
        library_id: library_id.clone(),
        library: library.clone(),
        context: context.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::app_state::{AppState, SharedState};
    use crate::routes::create_router;
    use crate::upload::{DESCRIPTION_FIELD, FILES_FIELD, PDF_MIME};
    use axum::body::Body;
    use axum::http::StatusCode;
    use http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "ctx-boundary";

    fn test_state() -> SharedState {
        Arc::new(AppState::seeded())
    }

    fn form(description: Option<&str>, pdfs: &[(&str, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(text) = description {
            body.extend(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{DESCRIPTION_FIELD}\"\r\n\r\n{text}\r\n"
                )
                .into_bytes(),
            );
        }
        for (name, data) in pdfs {
            body.extend(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{FILES_FIELD}\"; filename=\"{name}\"\r\nContent-Type: {PDF_MIME}\r\n\r\n"
                )
                .into_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend(format!("--{BOUNDARY}--\r\n").into_bytes());
        body
    }

    async fn send(state: &SharedState, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = create_router(Arc::clone(state)).oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_form(library_id: &str, org: Option<&str>, body: Vec<u8>) -> Request<Body> {
        let mut req = Request::post(format!("/library/{library_id}/contexts")).header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(org) = org {
            req = req.header("org-id", org);
        }
        req.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn create_context_returns_201_and_bumps_count() {
        let state = test_state();
        let body = form(Some("Guía de incidentes"), &[("runbook.pdf", b"%PDF-1.7 data")]);
        let (status, json) = send(&state, post_form("lib-org001-009", Some("org-001"), body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["element"]["title"], "Guía de incidentes");
        assert_eq!(json["element"]["description"], "Guía de incidentes");
        assert_eq!(json["filesUploaded"], 1);
        assert_eq!(json["files"][0]["name"], "runbook.pdf");
        assert_eq!(json["files"][0]["size"], 13);
        assert_eq!(json["files"][0]["type"], "application/pdf");
        assert_eq!(json["newContextCount"], 9);

        let store = state.store.read().await;
        assert_eq!(store.library("lib-org001-009").unwrap().context_count, 9);
    }

    #[tokio::test]
    async fn created_context_is_retrievable() {
        let state = test_state();
        let (_, created) = send(
            &state,
            post_form("lib-org002-003", Some("org-002"), form(Some("Versionado"), &[])),
        )
        .await;
        let context_id = created["element"]["id"].as_str().unwrap();

        let uri = format!("/library/lib-org002-003/context/{context_id}");
        let (status, json) = send(
            &state,
            Request::get(&uri).header("org-id", "org-002").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["libraryId"], "lib-org002-003");
        assert_eq!(json["library"]["contextCount"], 11);
        assert_eq!(json["context"]["id"], context_id);
        assert_eq!(json["context"]["title"], "Versionado");

        // org header is optional on this route
        let (status, _) = send(&state, Request::get(&uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = send(
            &state,
            Request::get(&uri).header("org-id", "org-001").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn context_lookup_rejects_bad_header_and_unknown_ids() {
        let state = test_state();
        let (status, json) = send(
            &state,
            Request::get("/library/lib-org001-001/context/x")
                .header("org-id", "nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid org-id header. Must be org-001 or org-002");

        let (status, json) = send(
            &state,
            Request::get("/library/lib-nope/context/x").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Library not found");

        let (status, json) = send(
            &state,
            Request::get("/library/lib-org001-001/context/x").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Context not found in this library");
    }

    #[tokio::test]
    async fn create_context_requires_description() {
        let state = test_state();
        for description in [None, Some("   ")] {
            let (status, json) = send(
                &state,
                post_form("lib-org001-001", Some("org-001"), form(description, &[])),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["message"], "description is required");
        }
        let store = state.store.read().await;
        assert_eq!(store.library("lib-org001-001").unwrap().context_count, 6);
    }

    #[tokio::test]
    async fn create_context_checks_org_then_library() {
        let state = test_state();
        let (status, _) = send(&state, post_form("lib-org001-001", None, form(Some("x"), &[]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &state,
            post_form("lib-unknown", Some("org-001"), form(Some("x"), &[])),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, json) = send(
            &state,
            post_form("lib-org002-001", Some("org-001"), form(Some("x"), &[])),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Library not found in this organization");
    }

    #[tokio::test]
    async fn non_multipart_body_counts_as_empty_form() {
        let state = test_state();
        let req = Request::post("/library/lib-org001-001/contexts")
            .header("org-id", "org-001")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"description":"x"}"#))
            .unwrap();
        let (status, json) = send(&state, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "description is required");
    }

    #[tokio::test]
    async fn rejected_upload_leaves_count_untouched() {
        let state = test_state();
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{FILES_FIELD}\"; filename=\"a.png\"\r\nContent-Type: image/png\r\n\r\nPNG\r\n"
        )
        .into_bytes();
        body.extend(format!("--{BOUNDARY}--\r\n").into_bytes());
        let (status, json) = send(&state, post_form("lib-org001-001", Some("org-001"), body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        let store = state.store.read().await;
        assert_eq!(store.library("lib-org001-001").unwrap().context_count, 6);
    }
}
