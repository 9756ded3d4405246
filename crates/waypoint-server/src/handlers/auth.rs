//! Authentication-related handlers

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;

use crate::{current_owner, get_user_email, AppError, AppState};

/// Response for the /api/me endpoint
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    /// The authenticated user's email or identifier
    pub user: String,
    /// How the user was authenticated
    pub auth_method: String,
    pub owner_id: i64,
}

/// GET /api/me - The caller's resolved identity
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, AppError> {
    let user = get_user_email(&headers);
    let auth_method = match user.as_str() {
        "api-key" => "api_key",
        "local-dev" => "none",
        _ => "proxy_header",
    };
    let owner_id = current_owner(&state, &headers)?;

    Ok(Json(MeResponse {
        user,
        auth_method: auth_method.to_string(),
        owner_id,
    }))
}
