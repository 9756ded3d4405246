//! Debt handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::{current_owner, ApiJson, AppError, AppState, SuccessResponse};
use waypoint_core::debts;
use waypoint_core::models::{Debt, NewDebt};

/// GET /api/debts
pub async fn list_debts(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Debt>>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(debts::list_debts(&state.db, owner)?))
}

/// POST /api/debts
pub async fn create_debt(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(debt): ApiJson<NewDebt>,
) -> Result<Json<Debt>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(debts::add_debt(&state.db, owner, &debt)?))
}

/// PATCH /api/debts/:id/status - Flip between active and paid off
pub async fn toggle_debt_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Debt>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(debts::toggle_debt_status(&state.db, owner, id)?))
}

/// DELETE /api/debts/:id
pub async fn delete_debt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let owner = current_owner(&state, &headers)?;
    debts::delete_debt(&state.db, owner, id)?;
    Ok(SuccessResponse::ok())
}
