//! CSV upload handler

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use tracing::info;

use crate::{current_owner, get_user_email, AppError, AppState};
use waypoint_core::import::{import_csv, ImportReport};

/// POST /api/upload - Import transactions from a CSV request body
pub async fn upload_csv(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ImportReport>, AppError> {
    if body.is_empty() {
        return Err(AppError::bad_request("No file uploaded"));
    }
    let owner = current_owner(&state, &headers)?;

    info!(
        user = %get_user_email(&headers),
        bytes = body.len(),
        "CSV upload received"
    );
    let report = import_csv(&state.db, owner, body.as_ref())?;
    Ok(Json(report))
}
