//! Sale handlers. The list endpoint carries the joined product
//! snapshot; mutations work on the bare sale record.

use axum::extract::{Path, State};
use axum::Json;
use storefront_core::{Sale, SaleDraft, SaleWithProduct};

use crate::error::ServiceError;
use crate::service;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<SaleWithProduct>>, ServiceError> {
    Ok(Json(service::sale::list(&state.db).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<SaleDraft>,
) -> Result<Json<Sale>, ServiceError> {
    Ok(Json(service::sale::create(&state.db, draft).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<SaleDraft>,
) -> Result<Json<Sale>, ServiceError> {
    Ok(Json(service::sale::update(&state.db, id, draft).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<String, ServiceError> {
    service::sale::delete(&state.db, id).await?;
    Ok(format!("Sale with ID {id} deleted successfully"))
}
