//! Category handlers. The one resource with a single-get endpoint,
//! a 201 on create and a bodiless 204 on update.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use storefront_core::{Category, CategoryDraft};

use crate::error::ServiceError;
use crate::service;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ServiceError> {
    Ok(Json(service::category::list(&state.db).await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, ServiceError> {
    Ok(Json(service::category::get(&state.db, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<CategoryDraft>,
) -> Result<(StatusCode, Json<Category>), ServiceError> {
    let created = service::category::create(&state.db, draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<CategoryDraft>,
) -> Result<StatusCode, ServiceError> {
    service::category::update(&state.db, id, draft).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<String, ServiceError> {
    service::category::delete(&state.db, id).await?;
    Ok(format!("Category with ID {id} deleted successfully"))
}
