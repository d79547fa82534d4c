//! Customer handlers.

use axum::extract::{Path, State};
use axum::Json;
use storefront_core::{Customer, CustomerDraft};

use crate::error::ServiceError;
use crate::service;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ServiceError> {
    Ok(Json(service::customer::list(&state.db).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<CustomerDraft>,
) -> Result<Json<Customer>, ServiceError> {
    Ok(Json(service::customer::create(&state.db, draft).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<CustomerDraft>,
) -> Result<Json<Customer>, ServiceError> {
    Ok(Json(service::customer::update(&state.db, id, draft).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<String, ServiceError> {
    service::customer::delete(&state.db, id).await?;
    Ok(format!("Customer with ID {id} deleted successfully"))
}
