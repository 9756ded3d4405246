//! Recurring bill handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::{current_owner, ApiJson, AppError, AppState, SuccessResponse};
use waypoint_core::bills;
use waypoint_core::models::{Bill, NewBill};

/// GET /api/bills - Ordered by due day
pub async fn list_bills(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Bill>>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(bills::list_bills(&state.db, owner)?))
}

/// POST /api/bills
pub async fn create_bill(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(bill): ApiJson<NewBill>,
) -> Result<Json<Bill>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(bills::add_bill(&state.db, owner, &bill)?))
}

/// DELETE /api/bills/:id
pub async fn delete_bill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let owner = current_owner(&state, &headers)?;
    bills::delete_bill(&state.db, owner, id)?;
    Ok(SuccessResponse::ok())
}
