//! Account-wide handlers

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use tracing::warn;

use crate::{current_owner, get_user_email, AppError, AppState};
use waypoint_core::account::{self, ResetReport};

/// DELETE /api/reset - Wipe transactions, debts and assets
///
/// Goals, bills and consumption items are left in place.
pub async fn reset_account(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ResetReport>, AppError> {
    let owner = current_owner(&state, &headers)?;
    warn!(user = %get_user_email(&headers), "Account reset requested");
    Ok(Json(account::reset_account(&state.db, owner)?))
}
