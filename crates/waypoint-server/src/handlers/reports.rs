//! Report handlers - one per aggregator

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;

use crate::{current_owner, ApiQuery, AppError, AppState};
use waypoint_core::{
    advisor::investment_advice, dashboard::dashboard, debt_strategy::debt_strategy,
    fire::fire_status, net_worth::net_worth, Advice, Dashboard, DebtStrategyReport, FireReport,
    NetWorthReport,
};

/// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Dashboard>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(dashboard(&state.db, owner)?))
}

/// GET /api/networth
pub async fn get_net_worth(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<NetWorthReport>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(net_worth(&state.db, owner)?))
}

/// GET /api/fire
pub async fn get_fire(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<FireReport>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(fire_status(&state.db, owner)?))
}

/// GET /api/advisor
pub async fn get_advice(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Advice>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(investment_advice(
        &state.db,
        owner,
        &state.config.advisor,
    )?))
}

#[derive(Debug, Deserialize)]
pub struct StrategyQuery {
    pub extra: Option<f64>,
}

/// GET /api/debts/strategy?extra=N
pub async fn get_debt_strategy(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<StrategyQuery>,
) -> Result<Json<DebtStrategyReport>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(debt_strategy(&state.db, owner, query.extra)?))
}
