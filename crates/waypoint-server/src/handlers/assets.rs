//! Asset handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use crate::{current_owner, ApiJson, AppError, AppState, SuccessResponse};
use waypoint_core::assets;
use waypoint_core::models::{Asset, NewAsset};

/// GET /api/assets
pub async fn list_assets(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Asset>>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(assets::list_assets(&state.db, owner)?))
}

/// POST /api/assets
pub async fn create_asset(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(asset): ApiJson<NewAsset>,
) -> Result<Json<Asset>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(assets::add_asset(&state.db, owner, &asset)?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateAssetRequest {
    pub value: f64,
}

/// PUT /api/assets/:id - Record a new value
pub async fn update_asset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<UpdateAssetRequest>,
) -> Result<Json<Asset>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(assets::update_asset_value(
        &state.db, owner, id, req.value,
    )?))
}

/// DELETE /api/assets/:id
pub async fn delete_asset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let owner = current_owner(&state, &headers)?;
    assets::delete_asset(&state.db, owner, id)?;
    Ok(SuccessResponse::ok())
}
