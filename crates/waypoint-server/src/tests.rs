//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const ALICE: &str = "alice@example.com";
const BOB: &str = "bob@example.com";

fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: false,
        ..Default::default()
    };
    create_router(db, config)
}

fn setup_secured_app() -> Router {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: true,
        api_keys: vec!["s3cret-key".to_string()],
        ..Default::default()
    };
    create_router(db, config)
}

async fn get_body_json(response: axum::response::Response) -> Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Send a request as `user`, returning the status and JSON body
async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    user: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(USER_HEADER, user);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, get_body_json(response).await)
}

// ========== Auth Tests ==========

#[tokio::test]
async fn test_auth_required_by_default() {
    let app = setup_secured_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/dashboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Authentication required");

    let (status, _) = call(&app, "GET", "/api/dashboard", ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_api_key_auth() {
    let app = setup_secured_app();

    let request = |key: &str| {
        Request::builder()
            .uri("/api/me")
            .header("authorization", format!("Bearer {}", key))
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(request("wrong-key!")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.clone().oneshot(request("s3cret-key")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["user"], "api-key");
    assert_eq!(json["authMethod"], "api_key");
}

#[tokio::test]
async fn test_me_reports_identity() {
    let app = setup_test_app();

    let (status, me) = call(&app, "GET", "/api/me", ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["user"], ALICE);
    assert_eq!(me["authMethod"], "proxy_header");

    let (_, again) = call(&app, "GET", "/api/me", ALICE, None).await;
    assert_eq!(me["ownerId"], again["ownerId"]);

    let (_, bob) = call(&app, "GET", "/api/me", BOB, None).await;
    assert_ne!(me["ownerId"], bob["ownerId"]);
}

#[test]
fn test_validate_api_key() {
    let keys = vec!["alpha".to_string(), "beta-key".to_string()];
    assert!(validate_api_key("alpha", &keys));
    assert!(validate_api_key("beta-key", &keys));
    assert!(!validate_api_key("alph", &keys));
    assert!(!validate_api_key("", &keys));
    assert!(!validate_api_key("alpha", &[]));
}

#[test]
fn test_parse_list() {
    assert_eq!(
        parse_list(" https://a.example, ,https://b.example "),
        vec!["https://a.example", "https://b.example"]
    );
    assert!(parse_list("").is_empty());
}

// ========== Transaction API Tests ==========

#[tokio::test]
async fn test_create_and_list_transactions() {
    let app = setup_test_app();

    let (status, rent) = call(
        &app,
        "POST",
        "/api/transactions",
        ALICE,
        Some(json!({
            "type": "EXPENSE",
            "category": "Rent",
            "amount": 1200.0,
            "isLocked": true,
            "date": "2026-02-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rent["isLocked"], true);
    assert_eq!(rent["recurrence"], "NONE");
    assert_eq!(rent["date"], "2026-02-01");

    call(
        &app,
        "POST",
        "/api/transactions",
        ALICE,
        Some(json!({"type": "INCOME", "category": "Salary", "amount": 5000.0, "date": "2026-02-03"})),
    )
    .await;

    let (status, list) = call(&app, "GET", "/api/transactions?limit=1", ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["category"], "Salary");
}

#[tokio::test]
async fn test_locked_income_is_rejected() {
    let app = setup_test_app();

    let (status, json) = call(
        &app,
        "POST",
        "/api/transactions",
        ALICE,
        Some(json!({"type": "INCOME", "category": "Salary", "amount": 10.0, "isLocked": true})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Only expenses can be locked.");
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/transactions")
                .header("content-type", "application/json")
                .header(USER_HEADER, ALICE)
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_delete_is_owner_scoped() {
    let app = setup_test_app();

    let (_, tx) = call(
        &app,
        "POST",
        "/api/transactions",
        ALICE,
        Some(json!({"type": "EXPENSE", "category": "Food", "amount": 12.5})),
    )
    .await;
    let uri = format!("/api/transactions/{}", tx["id"]);

    let (status, json) = call(&app, "DELETE", &uri, BOB, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("not found"));

    let (status, json) = call(&app, "DELETE", &uri, ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn test_upload_csv() {
    let app = setup_test_app();
    let csv = "type,category,amount,date\nINCOME,Salary,3000,2026-01-01\nEXPENSE,Food,,2026-01-02\n";

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/upload")
                .header("content-type", "text/csv")
                .header(USER_HEADER, ALICE)
                .body(Body::from(csv))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = get_body_json(response).await;
    assert_eq!(report["successCount"], 1);
    assert_eq!(report["errorCount"], 1);
    assert_eq!(report["errors"][0]["msg"], "Missing amount or type");
    assert_eq!(report["errors"][0]["row"]["category"], "Food");

    let (_, list) = call(&app, "GET", "/api/transactions", ALICE, None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

// ========== Report API Tests ==========

#[tokio::test]
async fn test_dashboard_shape() {
    let app = setup_test_app();
    call(
        &app,
        "POST",
        "/api/transactions",
        ALICE,
        Some(json!({"type": "INCOME", "category": "Salary", "amount": 1000.0})),
    )
    .await;
    call(
        &app,
        "POST",
        "/api/transactions",
        ALICE,
        Some(json!({"type": "EXPENSE", "category": "Shopping", "amount": 900.0})),
    )
    .await;

    let (status, dash) = call(&app, "GET", "/api/dashboard", ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dash["summary"]["income"], 1000.0);
    assert_eq!(dash["summary"]["variableExpenses"], 900.0);
    assert_eq!(dash["summary"]["balance"], 100.0);
    assert_eq!(dash["benchmarks"]["idealNeeds"], 500.0);
    assert_eq!(dash["recentTransactions"].as_array().unwrap().len(), 2);
    assert_eq!(dash["insights"][0]["type"], "WARNING");
}

#[tokio::test]
async fn test_debt_strategy_extra_payment() {
    let app = setup_test_app();
    let (status, debt) = call(
        &app,
        "POST",
        "/api/debts",
        ALICE,
        Some(json!({
            "name": "Card",
            "totalAmount": 10000.0,
            "interestRate": 36.0,
            "minimumPayment": 200.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(debt["currentAmount"], 10000.0);
    assert_eq!(debt["status"], "ACTIVE");

    // 10000 * 3% monthly interest exceeds the 200 minimum
    let (status, plan) = call(&app, "GET", "/api/debts/strategy", ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["strategyReport"][0]["monthsToFree"], "NEVER");
    assert_eq!(plan["strategyReport"][0]["priorityLevel"], "CRITICAL");

    let (_, plan) = call(&app, "GET", "/api/debts/strategy?extra=800", ALICE, None).await;
    assert!(plan["strategyReport"][0]["monthsToFree"].is_u64());
    assert_eq!(plan["extraMonthlyPayment"], 800.0);

    let (status, _) = call(&app, "GET", "/api/debts/strategy?extra=-5", ALICE, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = call(&app, "GET", "/api/debts/strategy?extra=lots", ALICE, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_debt_toggle_and_net_worth() {
    let app = setup_test_app();
    let (_, debt) = call(
        &app,
        "POST",
        "/api/debts",
        ALICE,
        Some(json!({"name": "Loan", "totalAmount": 4000.0, "interestRate": 9.0, "minimumPayment": 100.0})),
    )
    .await;
    call(
        &app,
        "POST",
        "/api/assets",
        ALICE,
        Some(json!({"name": "Savings", "type": "CASH", "value": 10000.0, "isLiquid": true})),
    )
    .await;

    let (_, worth) = call(&app, "GET", "/api/networth", ALICE, None).await;
    assert_eq!(worth["netWorth"], 6000.0);
    assert_eq!(worth["liquidAssets"], 10000.0);

    let uri = format!("/api/debts/{}/status", debt["id"]);
    let (status, paid) = call(&app, "PATCH", &uri, ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "PAID_OFF");

    let (_, worth) = call(&app, "GET", "/api/networth", ALICE, None).await;
    assert_eq!(worth["totalDebt"], 0.0);
    assert_eq!(worth["breakdown"]["debts"].as_array().unwrap().len(), 1);

    let (status, _) = call(&app, "PATCH", &uri, BOB, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_advisor_uses_configured_reference() {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: false,
        advisor: AdvisorConfig {
            monthly_expenses: 1000.0,
        },
        ..Default::default()
    };
    let app = create_router(db, config);

    call(
        &app,
        "POST",
        "/api/assets",
        ALICE,
        Some(json!({"name": "Savings", "type": "CASH", "value": 6000.0, "isLiquid": true})),
    )
    .await;

    let (status, advice) = call(&app, "GET", "/api/advisor", ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(advice["status"], "HEALTHY");
    assert_eq!(advice["suggestedPortfolio"].as_array().unwrap().len(), 4);
    assert!(advice.get("deficit").is_none());
}

#[tokio::test]
async fn test_fire_progress() {
    let app = setup_test_app();
    call(
        &app,
        "POST",
        "/api/goals",
        ALICE,
        Some(json!({"title": "Retire", "targetAmount": 1000000.0, "savedAmount": 5000.0})),
    )
    .await;

    let (status, fire) = call(&app, "GET", "/api/fire", ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fire["metrics"]["fireTarget"], 0.0);
    assert_eq!(fire["metrics"]["progress"], 0.0);
    assert_eq!(fire["metrics"]["currentNetWorth"], 5000.0);
    assert_eq!(fire["goals"].as_array().unwrap().len(), 1);
}

// ========== Goal, Bill, and Survival API Tests ==========

#[tokio::test]
async fn test_goal_funding_and_completion() {
    let app = setup_test_app();
    let (_, goal) = call(
        &app,
        "POST",
        "/api/goals",
        ALICE,
        Some(json!({"title": "Laptop", "targetAmount": 2000.0})),
    )
    .await;
    assert_eq!(goal["priority"], "MEDIUM");
    assert_eq!(goal["status"], "ACTIVE");

    let funds_uri = format!("/api/goals/{}/add", goal["id"]);
    let (_, funded) = call(&app, "PUT", &funds_uri, ALICE, Some(json!({"amount": 750.0}))).await;
    assert_eq!(funded["savedAmount"], 750.0);

    let (status, _) = call(&app, "PUT", &funds_uri, ALICE, Some(json!({"amount": 0.0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status_uri = format!("/api/goals/{}/status", goal["id"]);
    let (_, done) = call(
        &app,
        "PUT",
        &status_uri,
        ALICE,
        Some(json!({"status": "COMPLETED"})),
    )
    .await;
    assert!(done["completedDate"].is_string());

    let (_, reopened) = call(&app, "PUT", &status_uri, ALICE, Some(json!({"status": "ACTIVE"}))).await;
    assert!(reopened["completedDate"].is_null());

    // Funding a goal never creates a transaction
    let (_, list) = call(&app, "GET", "/api/transactions", ALICE, None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_bills_materialize() {
    let app = setup_test_app();
    let (_, rent) = call(
        &app,
        "POST",
        "/api/bills",
        ALICE,
        Some(json!({"name": "Rent", "amount": 900.0, "dueDay": 1})),
    )
    .await;
    assert_eq!(rent["category"], "Bills");

    let (status, _) = call(
        &app,
        "POST",
        "/api/transactions/bulk",
        ALICE,
        Some(json!({"billIds": [rent["id"], 99999]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &app,
        "POST",
        "/api/transactions/bulk",
        ALICE,
        Some(json!({"billIds": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = call(
        &app,
        "POST",
        "/api/transactions/bulk",
        ALICE,
        Some(json!({"billIds": [rent["id"]]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["created"], 1);

    let (_, list) = call(&app, "GET", "/api/transactions", ALICE, None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["isLocked"], true);
    assert_eq!(list[0]["recurrence"], "MONTHLY");
    assert_eq!(list[0]["description"], "Rent");
}

#[tokio::test]
async fn test_survival_items() {
    let app = setup_test_app();
    let (status, item) = call(
        &app,
        "POST",
        "/api/survival",
        ALICE,
        Some(json!({"name": "Toothpaste", "cost": 120.0, "months": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["monthlyCost"], 60.0);

    let uri = format!("/api/survival/{}", item["id"]);
    let (_, updated) = call(
        &app,
        "PUT",
        &uri,
        ALICE,
        Some(json!({"name": "Toothpaste", "cost": 120.0, "months": 3})),
    )
    .await;
    assert_eq!(updated["monthlyCost"], 40.0);

    let (status, _) = call(
        &app,
        "PUT",
        &uri,
        ALICE,
        Some(json!({"name": "Toothpaste", "cost": 120.0, "months": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, "DELETE", &uri, BOB, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reset_keeps_goals() {
    let app = setup_test_app();
    call(
        &app,
        "POST",
        "/api/transactions",
        ALICE,
        Some(json!({"type": "EXPENSE", "category": "Food", "amount": 10.0})),
    )
    .await;
    call(
        &app,
        "POST",
        "/api/goals",
        ALICE,
        Some(json!({"title": "Trip", "targetAmount": 500.0})),
    )
    .await;

    let (status, report) = call(&app, "DELETE", "/api/reset", ALICE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["transactions"], 1);

    let (_, goals) = call(&app, "GET", "/api/goals", ALICE, None).await;
    assert_eq!(goals.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_security_headers() {
    let app = setup_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("content-security-policy"));
}
