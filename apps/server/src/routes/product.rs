//! Product handlers.

use axum::extract::{Path, State};
use axum::Json;
use storefront_core::{Product, ProductDraft};

use crate::error::ServiceError;
use crate::service;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ServiceError> {
    Ok(Json(service::product::list(&state.db).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>, ServiceError> {
    Ok(Json(service::product::create(&state.db, draft).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>, ServiceError> {
    Ok(Json(service::product::update(&state.db, id, draft).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<String, ServiceError> {
    service::product::delete(&state.db, id).await?;
    Ok(format!("Product with ID {id} deleted successfully"))
}
