//! Waypoint Web Server
//!
//! Axum-based REST API over the Waypoint finance engine.
//!
//! Security features:
//! - Reverse-proxy identity header or bearer API keys (secure by default, use --no-auth for local dev)
//! - Restrictive CORS policy
//! - Every record scoped to the caller's owner id
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, FromRequest, FromRequestParts, Request, State,
    },
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{debug, error, info, warn};

use waypoint_core::models::OwnerId;
use waypoint_core::{AdvisorConfig, Database};

mod handlers;

/// Maximum CSV upload size (5 MB)
pub const MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

/// Header carrying the identity established by the fronting proxy
pub const USER_HEADER: &str = "x-authenticated-user-email";

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Comma-separated bearer keys
pub const API_KEYS_ENV: &str = "WAYPOINT_API_KEYS";
/// Comma-separated CORS origins
pub const ALLOWED_ORIGINS_ENV: &str = "WAYPOINT_ALLOWED_ORIGINS";

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Keys accepted as `Authorization: Bearer <key>`
    pub api_keys: Vec<String>,
    pub advisor: AdvisorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
            advisor: AdvisorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read keys, origins and the advisor reference from the environment
    pub fn from_env(require_auth: bool) -> Self {
        let list = |name: &str| {
            std::env::var(name)
                .map(|v| parse_list(&v))
                .unwrap_or_default()
        };

        Self {
            require_auth,
            allowed_origins: list(ALLOWED_ORIGINS_ENV),
            api_keys: list(API_KEYS_ENV),
            advisor: AdvisorConfig::from_env(),
        }
    }
}

/// Split a comma-separated setting, dropping blanks
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

/// Authentication middleware - accepts the proxy identity header or a bearer API key
///
/// The identity header is only safe when the server sits behind a proxy that
/// strips it from client requests. API keys are compared in constant time.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        return next.run(request).await;
    }

    if let Some(email) = header_user(request.headers()) {
        debug!(user = %email, path = %request.uri().path(), "Authenticated via identity header");
        return next.run(request).await;
    }

    let api_key_valid = bearer_token(request.headers())
        .map(|key| validate_api_key(key, &state.config.api_keys))
        .unwrap_or(false);

    if api_key_valid {
        debug!(user = "api-key", path = %request.uri().path(), "Authenticated via API key");
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized request - no valid auth");
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Validate an API key against the configured keys in constant time
fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();
    valid_keys.iter().any(|key| {
        let key_bytes = key.as_bytes();
        provided_bytes.len() == key_bytes.len() && bool::from(provided_bytes.ct_eq(key_bytes))
    })
}

fn header_user(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
}

/// Identity of the caller: the proxy header, "api-key", or "local-dev" when unauthenticated
pub fn get_user_email(headers: &HeaderMap) -> String {
    if let Some(email) = header_user(headers) {
        return email.to_string();
    }
    if bearer_token(headers).is_some() {
        return "api-key".to_string();
    }
    "local-dev".to_string()
}

/// Resolve the caller to the owner id that scopes every store call
pub(crate) fn current_owner(state: &AppState, headers: &HeaderMap) -> Result<OwnerId, AppError> {
    Ok(state.db.resolve_owner(&get_user_email(headers))?)
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// JSON body extractor whose rejections use the API error shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections use the API error shape
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Create the application router
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
    });

    let api_routes = Router::new()
        // Auth
        .route("/me", get(handlers::get_me))
        // Transactions
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/transactions/:id",
            axum::routing::delete(handlers::delete_transaction),
        )
        .route("/transactions/bulk", post(handlers::materialize_bills))
        .route(
            "/upload",
            post(handlers::upload_csv).layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE)),
        )
        .route("/analytics", get(handlers::get_analytics))
        // Reports
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/networth", get(handlers::get_net_worth))
        .route("/fire", get(handlers::get_fire))
        .route("/advisor", get(handlers::get_advice))
        // Debts
        .route("/debts", get(handlers::list_debts).post(handlers::create_debt))
        .route("/debts/strategy", get(handlers::get_debt_strategy))
        .route("/debts/:id", axum::routing::delete(handlers::delete_debt))
        .route("/debts/:id/status", patch(handlers::toggle_debt_status))
        // Assets
        .route(
            "/assets",
            get(handlers::list_assets).post(handlers::create_asset),
        )
        .route(
            "/assets/:id",
            put(handlers::update_asset).delete(handlers::delete_asset),
        )
        // Goals
        .route("/goals", get(handlers::list_goals).post(handlers::create_goal))
        .route("/goals/:id", axum::routing::delete(handlers::delete_goal))
        .route("/goals/:id/add", put(handlers::add_goal_funds))
        .route("/goals/:id/status", put(handlers::set_goal_status))
        // Bills
        .route("/bills", get(handlers::list_bills).post(handlers::create_bill))
        .route("/bills/:id", axum::routing::delete(handlers::delete_bill))
        // Consumption items
        .route(
            "/survival",
            get(handlers::list_survival_items).post(handlers::create_survival_item),
        )
        .route(
            "/survival/:id",
            put(handlers::update_survival_item).delete(handlers::delete_survival_item),
        )
        // Account
        .route("/reset", axum::routing::delete(handlers::reset_account));

    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ))
}

/// Start the server
pub async fn serve(db: Database, host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("Authentication disabled - do not expose to network!");
    } else if config.api_keys.is_empty() {
        info!(
            "No API keys configured; only requests carrying {} will be accepted",
            USER_HEADER
        );
    }

    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        if let Some(core) = err.downcast_ref::<waypoint_core::Error>() {
            match core {
                waypoint_core::Error::Validation(msg) => return Self::bad_request(msg),
                waypoint_core::Error::NotFound(what) => {
                    return Self::not_found(&format!("{} not found", what))
                }
                _ => {}
            }
        }
        if let Some(rejection) = err.downcast_ref::<JsonRejection>() {
            return Self::bad_request(&rejection.body_text());
        }
        if let Some(rejection) = err.downcast_ref::<QueryRejection>() {
            return Self::bad_request(&rejection.body_text());
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
