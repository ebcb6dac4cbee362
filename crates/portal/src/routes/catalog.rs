//! Catalog route handlers: parks and products.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use trailpass_core::ProductKind;

use crate::db::CatalogRepository;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    /// Optional kind filter; an unrecognized value is rejected rather than
    /// silently returning everything.
    pub kind: Option<String>,
}

/// GET /api/catalog/parks
pub async fn parks(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let repo = CatalogRepository::new(state.pool());
    let parks = repo.list_parks().await?;

    Ok(Json(json!({ "success": true, "parks": parks })))
}

/// GET /api/catalog/products?kind=TICKET|MERCH
pub async fn products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<impl IntoResponse, AppError> {
    let kind = filter
        .kind
        .as_deref()
        .map(str::parse::<ProductKind>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let repo = CatalogRepository::new(state.pool());
    let products = repo.list_products(kind).await?;

    Ok(Json(json!({ "success": true, "products": products })))
}
