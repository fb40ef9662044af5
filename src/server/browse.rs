//! Catalog listing and browse routes.
//!
//! The listing endpoints return the full item set per kind; the browse
//! endpoint applies a filter spec server-side and returns the growing
//! visible prefix the listing pages render, together with the
//! load-more (`has_more`) state.

use crate::catalog::{Item, ItemKind};
use crate::filter::{self, FilterSpec};
use crate::view::{EXPLORE_PAGE_SIZE, LIBRARY_PAGE_SIZE};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::state::{ServerState, SharedCatalog};

#[derive(Deserialize, Debug)]
struct BrowseBody {
    #[serde(default)]
    spec: FilterSpec,

    /// 1-based page; the visible window is always the prefix
    /// `filtered[0..page * page_size]`.
    #[serde(default = "default_page")]
    page: usize,

    /// Defaults per kind: 12 for regions, 8 for everything else.
    page_size: Option<usize>,
}

fn default_page() -> usize {
    1
}

#[derive(Serialize)]
struct BrowsePage<'a> {
    items: Vec<&'a Item>,
    total: usize,
    page: usize,
    page_size: usize,
    has_more: bool,
}

fn default_page_size(kind: ItemKind) -> usize {
    match kind {
        ItemKind::Region => EXPLORE_PAGE_SIZE,
        _ => LIBRARY_PAGE_SIZE,
    }
}

async fn list_items(State(catalog): State<SharedCatalog>, Path(kind): Path<String>) -> Response {
    match ItemKind::from_route(&kind) {
        Some(kind) => Json(catalog.store(kind).get_all()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_item(
    State(catalog): State<SharedCatalog>,
    Path((kind, id)): Path<(String, String)>,
) -> Response {
    let kind = match ItemKind::from_route(&kind) {
        Some(kind) => kind,
        None => return StatusCode::NOT_FOUND.into_response(),
    };
    match catalog.store(kind).get(&id) {
        Some(item) => Json(item).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_facets(State(catalog): State<SharedCatalog>, Path(kind): Path<String>) -> Response {
    match ItemKind::from_route(&kind) {
        Some(kind) => Json(catalog.store(kind).facets()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn browse_items(
    State(catalog): State<SharedCatalog>,
    Path(kind): Path<String>,
    Json(body): Json<BrowseBody>,
) -> Response {
    let kind = match ItemKind::from_route(&kind) {
        Some(kind) => kind,
        None => return StatusCode::NOT_FOUND.into_response(),
    };
    let page_size = body.page_size.unwrap_or_else(|| default_page_size(kind));

    let filtered = filter::apply(catalog.store(kind).get_all(), &body.spec);
    let total = filtered.len();
    let has_more = filter::has_more(&filtered, body.page, page_size);
    let items = filter::visible_slice(&filtered, body.page, page_size).to_vec();

    Json(BrowsePage {
        items,
        total,
        page: body.page,
        page_size,
        has_more,
    })
    .into_response()
}

pub fn make_catalog_routes(state: ServerState) -> Router {
    Router::new()
        .route("/{kind}", get(list_items))
        .route("/{kind}/facets", get(get_facets))
        .route("/{kind}/browse", post(browse_items))
        .route("/{kind}/{id}", get(get_item))
        .with_state(state)
}
