//! Savings goal handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use crate::{current_owner, ApiJson, AppError, AppState, SuccessResponse};
use waypoint_core::goals;
use waypoint_core::models::{Goal, GoalStatus, NewGoal};

/// GET /api/goals
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Goal>>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(goals::list_goals(&state.db, owner)?))
}

/// POST /api/goals
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(goal): ApiJson<NewGoal>,
) -> Result<Json<Goal>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(goals::add_goal(&state.db, owner, &goal)?))
}

#[derive(Debug, Deserialize)]
pub struct AddFundsRequest {
    pub amount: f64,
}

/// PUT /api/goals/:id/add
pub async fn add_goal_funds(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<AddFundsRequest>,
) -> Result<Json<Goal>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(goals::add_funds(&state.db, owner, id, req.amount)?))
}

#[derive(Debug, Deserialize)]
pub struct GoalStatusRequest {
    pub status: GoalStatus,
}

/// PUT /api/goals/:id/status
pub async fn set_goal_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<GoalStatusRequest>,
) -> Result<Json<Goal>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(goals::set_goal_status(
        &state.db, owner, id, req.status,
    )?))
}

/// DELETE /api/goals/:id
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let owner = current_owner(&state, &headers)?;
    goals::delete_goal(&state.db, owner, id)?;
    Ok(SuccessResponse::ok())
}
