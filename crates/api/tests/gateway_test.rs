//! End-to-end tests for the public gateway surface.
//!
//! Exercises the full router over in-memory stores, the same wiring the
//! layered server uses, via `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

use tally_api::{AppState, create_router};
use tally_core::{Coordinator, InMemoryDirectory, InMemoryLedger};

fn app() -> Router {
    let coordinator = Coordinator::new(
        Arc::new(InMemoryDirectory::new()),
        Arc::new(InMemoryLedger::new()),
    );
    create_router(AppState {
        coordinator: Arc::new(coordinator),
        service: "tally-test",
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_account(app: &Router, name: &str, email: &str, balance: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/accounts",
        Some(json!({ "name": name, "email": email, "initial_balance": balance })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_check_identifies_service() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "tally-test");
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn create_and_fetch_account() {
    let app = app();
    let id = create_account(&app, "Alice", "alice@example.com", "100.50").await;

    let (status, body) = send(&app, "GET", &format!("/api/v1/accounts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["balance"], "100.50");
    assert!(body["created_at"].as_str().is_some());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = app();
    create_account(&app, "Alice", "x@example.com", "0").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/accounts",
        Some(json!({ "name": "Bob", "email": "x@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn negative_initial_balance_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/accounts",
        Some(json!({ "name": "Alice", "email": "a@example.com", "initial_balance": "-5" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_INITIAL_BALANCE");
}

#[tokio::test]
async fn get_unknown_account_is_404() {
    let app = app();
    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/accounts/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn list_accounts_in_creation_order() {
    let app = app();
    create_account(&app, "Alice", "alice@example.com", "0").await;
    create_account(&app, "Bob", "bob@example.com", "0").await;

    let (status, body) = send(&app, "GET", "/api/v1/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["accounts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Alice", "Bob"]);
}

#[tokio::test]
async fn deposit_updates_balance() {
    let app = app();
    let id = create_account(&app, "Alice", "alice@example.com", "100").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/transactions/deposit",
        Some(json!({ "account_id": id, "amount": "25.25" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["new_balance"], "125.25");
    assert!(body["transaction_id"].as_str().is_some());
}

#[rstest]
#[case("0", "INVALID_AMOUNT")]
#[case("-5", "INVALID_AMOUNT")]
#[case("10000.01", "AMOUNT_ABOVE_LIMIT")]
#[tokio::test]
async fn out_of_policy_deposit_amounts_rejected(#[case] amount: &str, #[case] code: &str) {
    let app = app();
    let id = create_account(&app, "Alice", "alice@example.com", "100").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/transactions/deposit",
        Some(json!({ "account_id": id, "amount": amount })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], code);

    // Nothing was recorded.
    let (_, body) = send(&app, "GET", &format!("/api/v1/accounts/{id}"), None).await;
    assert_eq!(body["balance"], "100");
}

#[tokio::test]
async fn withdraw_insufficient_funds_is_conflict() {
    let app = app();
    let id = create_account(&app, "Alice", "alice@example.com", "10").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/transactions/withdraw",
        Some(json!({ "account_id": id, "amount": "50" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "INSUFFICIENT_FUNDS");

    // Balance unchanged.
    let (_, body) = send(&app, "GET", &format!("/api/v1/accounts/{id}"), None).await;
    assert_eq!(body["balance"], "10");
}

#[tokio::test]
async fn transfer_moves_money_and_records_both_legs() {
    let app = app();
    let a = create_account(&app, "Alice", "alice@example.com", "1000").await;
    let b = create_account(&app, "Bob", "bob@example.com", "0").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/transactions/transfer",
        Some(json!({ "from_account_id": a, "to_account_id": b, "amount": "100" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["from_balance"], "900");
    assert_eq!(body["to_balance"], "100");
    assert_ne!(body["debit_transaction_id"], body["credit_transaction_id"]);

    let (_, a_body) = send(&app, "GET", &format!("/api/v1/accounts/{a}"), None).await;
    let (_, b_body) = send(&app, "GET", &format!("/api/v1/accounts/{b}"), None).await;
    assert_eq!(a_body["balance"], "900");
    assert_eq!(b_body["balance"], "100");

    let (_, history) = send(
        &app,
        "GET",
        &format!("/api/v1/accounts/{a}/transactions"),
        None,
    )
    .await;
    let records = history["transactions"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["kind"], "debit");
    assert_eq!(records[0]["amount"], "100");
}

#[tokio::test]
async fn same_account_transfer_rejected() {
    let app = app();
    let a = create_account(&app, "Alice", "alice@example.com", "100").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/transactions/transfer",
        Some(json!({ "from_account_id": a, "to_account_id": a, "amount": "10" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "SAME_ACCOUNT");
}

#[tokio::test]
async fn transaction_history_in_insertion_order() {
    let app = app();
    let id = create_account(&app, "Alice", "alice@example.com", "100").await;

    for (uri, amount) in [
        ("/api/v1/transactions/deposit", "5"),
        ("/api/v1/transactions/withdraw", "3"),
        ("/api/v1/transactions/deposit", "7"),
    ] {
        let (status, _) = send(
            &app,
            "POST",
            uri,
            Some(json!({ "account_id": id, "amount": amount })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/accounts/{id}/transactions"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let kinds: Vec<&str> = body["transactions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, ["credit", "debit", "credit"]);
}

#[tokio::test]
async fn history_of_unknown_account_is_404() {
    let app = app();
    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/accounts/00000000-0000-0000-0000-000000000000/transactions",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}
