//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{current_owner, ApiJson, ApiQuery, AppError, AppState, SuccessResponse};
use waypoint_core::models::{NewTransaction, Transaction};
use waypoint_core::transactions::{self, CategoryTotal};
use waypoint_core::bills;

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    pub limit: Option<usize>,
}

/// GET /api/transactions - Newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<ListTransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(transactions::list_transactions(
        &state.db,
        owner,
        query.limit,
    )?))
}

/// POST /api/transactions
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(tx): ApiJson<NewTransaction>,
) -> Result<Json<Transaction>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(transactions::add_transaction(&state.db, owner, &tx)?))
}

/// DELETE /api/transactions/:id
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let owner = current_owner(&state, &headers)?;
    transactions::delete_transaction(&state.db, owner, id)?;
    Ok(SuccessResponse::ok())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializeBillsRequest {
    pub bill_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct MaterializeBillsResponse {
    pub created: usize,
}

/// POST /api/transactions/bulk - Turn selected bills into today's expenses
pub async fn materialize_bills(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<MaterializeBillsRequest>,
) -> Result<Json<MaterializeBillsResponse>, AppError> {
    let owner = current_owner(&state, &headers)?;
    let created = bills::materialize_bills(&state.db, owner, &req.bill_ids)?;
    Ok(Json(MaterializeBillsResponse { created }))
}

/// GET /api/analytics - Current-month spending by category
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<CategoryTotal>>, AppError> {
    let owner = current_owner(&state, &headers)?;
    Ok(Json(transactions::monthly_breakdown(&state.db, owner)?))
}
