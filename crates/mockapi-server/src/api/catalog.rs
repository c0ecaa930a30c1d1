// ABOUTME: Library catalog handlers: paginated/searchable library listing per organization
// ABOUTME: and library detail with its stored plus synthesized elements.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use mockapi_core::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE};
use mockapi_core::{CatalogOrg, Library, LibraryElement, paginate, parse_lenient};
use serde::{Deserialize, Serialize};

use crate::app_state::SharedState;
use crate::error::CatalogError;
use crate::guards::required_catalog_org;

/// Query string shared by the listing and detail routes. Values are kept raw and
/// parsed leniently.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

impl CatalogQuery {
    pub fn page(&self) -> usize {
        parse_lenient(self.page.as_deref()).unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> usize {
        parse_lenient(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT)
    }

    /// Trimmed, lower-cased search text; empty means no filter.
    pub fn needle(&self) -> String {
        self.search
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_lowercase()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryListResponse {
    pub success: bool,
    pub org_id: CatalogOrg,
    pub libraries: Vec<Library>,
    pub count: usize,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryDetailResponse {
    pub success: bool,
    #[serde(flatten)]
    pub library: Library,
    pub name: String,
    pub elements: Vec<LibraryElement>,
    pub elements_count: usize,
    pub total_elements: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub has_more: bool,
}

/// GET /libraries - List the requesting organization's libraries.
pub async fn list_libraries(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<LibraryListResponse>, CatalogError> {
    let org = required_catalog_org(&headers)?;
    let needle = query.needle();

    let store = state.store.read().await;
    let matching = store.search_catalog(org, &needle, &mut rand::thread_rng());
    drop(store);
    let page = paginate(matching, query.page(), query.limit());

    tracing::debug!(%org, search = %needle, total = page.total, page = page.page, "listed libraries");

    Ok(Json(LibraryListResponse {
        success: true,
        org_id: org,
        count: page.items.len(),
        libraries: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
        has_more: page.has_more,
    }))
}

/// GET /library/{id} - One library with its paginated, searchable elements.
pub async fn get_library(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<LibraryDetailResponse>, CatalogError> {
    let org = required_catalog_org(&headers)?;
    let needle = query.needle();

    let store = state.store.read().await;
    let found = store.library_elements(org, &id, &needle, &mut rand::thread_rng());
    drop(store);
    let (library, elements) = found?;
    let page = paginate(elements, query.page(), query.limit());

    tracing::debug!(%org, library_id = %id, total = page.total, page = page.page, "read library");

    Ok(Json(LibraryDetailResponse {
        success: true,
        name: library.title.clone(),
        library,
        elements_count: page.items.len(),
        elements: page.items,
        total_elements: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
        has_more: page.has_more,
    }))
}
