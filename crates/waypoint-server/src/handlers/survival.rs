//! Consumption item ("survival" list) handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::{current_owner, ApiJson, AppError, AppState, SuccessResponse};
use waypoint_core::consumption;
use waypoint_core::models::{ConsumptionItem, ConsumptionItemInput};

/// GET /api/survival
pub async fn list_survival_items(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<ConsumptionItem>>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(consumption::list_items(&state.db, owner)?))
}

/// POST /api/survival
pub async fn create_survival_item(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(input): ApiJson<ConsumptionItemInput>,
) -> Result<Json<ConsumptionItem>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(consumption::add_item(&state.db, owner, &input)?))
}

/// PUT /api/survival/:id
pub async fn update_survival_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    ApiJson(input): ApiJson<ConsumptionItemInput>,
) -> Result<Json<ConsumptionItem>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(consumption::update_item(&state.db, owner, id, &input)?))
}

/// DELETE /api/survival/:id
pub async fn delete_survival_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let owner = current_owner(&state, &headers)?;
    consumption::delete_item(&state.db, owner, id)?;
    Ok(SuccessResponse::ok())
}
