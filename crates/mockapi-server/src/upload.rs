// ABOUTME: Multipart parsing for context creation: up to 10 PDF parts of at most 5 MiB under `files`,
// ABOUTME: plus a `description` text field. File bytes are measured and discarded, never stored.

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::error::CatalogError;

pub const FILES_FIELD: &str = "files";
pub const DESCRIPTION_FIELD: &str = "description";
pub const MAX_FILES: usize = 10;
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;
pub const PDF_MIME: &str = "application/pdf";

/// Request body cap for the upload route: every file at its limit plus room for
/// the text fields and multipart framing.
pub const MAX_BODY_BYTES: usize = MAX_FILES * MAX_FILE_BYTES + 1024 * 1024;

/// Metadata echoed back for each accepted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: usize,
    #[serde(rename = "type")]
    pub mime: String,
}

/// The parsed form. `description` is whatever the client sent, untrimmed.
#[derive(Debug, Clone, Default)]
pub struct ContextForm {
    pub description: Option<String>,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only PDF files are allowed ({name} is {mime})")]
    NotPdf { name: String, mime: String },

    #[error("File too large: {name} exceeds {} bytes", MAX_FILE_BYTES)]
    FileTooLarge { name: String },

    #[error("Too many files: at most {} are allowed", MAX_FILES)]
    TooManyFiles,

    #[error("Unexpected field: {0}")]
    UnexpectedField(String),

    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
}

impl From<UploadError> for CatalogError {
    fn from(err: UploadError) -> Self {
        let status = match &err {
            UploadError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            UploadError::Multipart(inner) => inner.status(),
            UploadError::NotPdf { .. } | UploadError::TooManyFiles | UploadError::UnexpectedField(_) => {
                StatusCode::BAD_REQUEST
            }
        };
        CatalogError::new(status, err.to_string())
    }
}

/// Drain the multipart stream into a [`ContextForm`]. Any rejected file aborts the
/// whole request. Unknown text fields are ignored.
pub async fn read_context_form(mut multipart: Multipart) -> Result<ContextForm, UploadError> {
    let mut form = ContextForm::default();

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        let Some(file_name) = field.file_name().map(str::to_string) else {
            if name == DESCRIPTION_FIELD {
                form.description = Some(field.text().await?);
            }
            continue;
        };

        if name != FILES_FIELD {
            return Err(UploadError::UnexpectedField(name));
        }
        if form.files.len() == MAX_FILES {
            return Err(UploadError::TooManyFiles);
        }

        let mime = field.content_type().unwrap_or("").to_string();
        if mime != PDF_MIME {
            return Err(UploadError::NotPdf {
                name: file_name,
                mime,
            });
        }

        let mut size = 0usize;
        while let Some(chunk) = field.chunk().await? {
            size += chunk.len();
            if size > MAX_FILE_BYTES {
                return Err(UploadError::FileTooLarge { name: file_name });
            }
        }

        form.files.push(UploadedFile {
            name: file_name,
            size,
            mime,
        });
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::extract::DefaultBodyLimit;
    use axum::response::IntoResponse;
    use axum::routing::post;
    use http::Request;
    use tower::ServiceExt;

    const BOUNDARY: &str = "mockapi-test-boundary";

    fn part(field: &str, file: Option<(&str, &str)>, data: &[u8]) -> Vec<u8> {
        let mut out = format!("--{BOUNDARY}\r\n").into_bytes();
        match file {
            Some((file_name, mime)) => out.extend(
                format!(
                    "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
                )
                .into_bytes(),
            ),
            None => out.extend(
                format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").into_bytes(),
            ),
        }
        out.extend_from_slice(data);
        out.extend_from_slice(b"\r\n");
        out
    }

    fn finish(mut body: Vec<u8>) -> Vec<u8> {
        body.extend(format!("--{BOUNDARY}--\r\n").into_bytes());
        body
    }

    async fn parse(body: Vec<u8>) -> (StatusCode, serde_json::Value) {
        async fn handler(multipart: Multipart) -> axum::response::Response {
            match read_context_form(multipart).await {
                Ok(form) => axum::Json(serde_json::json!({
                    "description": form.description,
                    "files": form.files,
                }))
                .into_response(),
                Err(e) => CatalogError::from(e).into_response(),
            }
        }

        let app = Router::new()
            .route("/upload", post(handler))
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));
        let resp = app
            .oneshot(
                Request::post("/upload")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn accepts_description_and_pdfs() {
        let mut body = part(DESCRIPTION_FIELD, None, b"Manual de despliegue");
        body.extend(part(FILES_FIELD, Some(("a.pdf", PDF_MIME)), b"%PDF-1.4 aaa"));
        body.extend(part(FILES_FIELD, Some(("b.pdf", PDF_MIME)), b"%PDF-1.4"));
        let (status, json) = parse(finish(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["description"], "Manual de despliegue");
        assert_eq!(json["files"][0]["name"], "a.pdf");
        assert_eq!(json["files"][0]["size"], 12);
        assert_eq!(json["files"][0]["type"], PDF_MIME);
        assert_eq!(json["files"][1]["size"], 8);
    }

    #[tokio::test]
    async fn rejects_non_pdf() {
        let mut body = part(DESCRIPTION_FIELD, None, b"x");
        body.extend(part(FILES_FIELD, Some(("notes.txt", "text/plain")), b"hello"));
        let (status, json) = parse(finish(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("Only PDF"));
    }

    #[tokio::test]
    async fn rejects_oversized_file() {
        let big = vec![b'a'; MAX_FILE_BYTES + 1];
        let body = part(FILES_FIELD, Some(("big.pdf", PDF_MIME)), &big);
        let (status, json) = parse(finish(body)).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(json["message"].as_str().unwrap().contains("big.pdf"));
    }

    #[tokio::test]
    async fn rejects_eleventh_file() {
        let mut body = Vec::new();
        for i in 0..=MAX_FILES {
            let name = format!("f{i}.pdf");
            body.extend(part(FILES_FIELD, Some((&name, PDF_MIME)), b"%PDF"));
        }
        let (status, json) = parse(finish(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("Too many files"));
    }

    #[tokio::test]
    async fn rejects_file_under_other_field() {
        let body = part("attachment", Some(("a.pdf", PDF_MIME)), b"%PDF");
        let (status, json) = parse(finish(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Unexpected field: attachment");
    }
}
