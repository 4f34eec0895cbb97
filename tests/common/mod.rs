#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use salestrack::application::session::SessionRegistry;
use salestrack::config::SecurityConfig;
use salestrack::domain::{Role, UserRecord, UserStore};
use salestrack::infrastructure::crypto::hash_password;
use salestrack::infrastructure::store::{CsvSalesStore, CsvUserStore};
use salestrack::{create_api_router, ReportingService, UserService};
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const ADMIN_PASSWORD: &str = "changeme";
pub const SALES_PASSWORD: &str = "sales-pw";

// Low bcrypt cost keeps the suite fast.
const TEST_COST: u32 = 4;

const SAMPLE_SALES: &str = "\
Date & Time,Customer Name,Product,Units Bought,Revenue ($),Customer Email
2025-03-01 09:00:00,Acme Corp,Widget,2,100.0,a@acme.test
2025-03-01 14:30:00,Globex,Widget,1,50.0,g@globex.test
2025-03-02 11:00:00,Acme Corp,Gadget,4,200.0,a@acme.test
";

pub struct TestContext {
    pub temp_dir: TempDir,
    pub app: axum::Router,
}

/// Build a router over a seeded temp-dir store pair: one admin, one
/// salesperson, and a small sales dataset.
pub async fn build_test_context() -> TestContext {
    let temp_dir = tempfile::tempdir().expect("test context should build");

    let user_store = Arc::new(CsvUserStore::new(temp_dir.path().join("users.csv")));
    user_store
        .save(&[
            UserRecord {
                username: "admin".to_string(),
                password_hash: hash_password(ADMIN_PASSWORD, TEST_COST).unwrap(),
                role: Role::Admin,
            },
            UserRecord {
                username: "sally".to_string(),
                password_hash: hash_password(SALES_PASSWORD, TEST_COST).unwrap(),
                role: Role::Salesperson,
            },
        ])
        .await
        .expect("user store should seed");

    let sales_path = temp_dir.path().join("sales_data.csv");
    std::fs::write(&sales_path, SAMPLE_SALES).expect("sales store should seed");
    let sales_store = Arc::new(CsvSalesStore::new(&sales_path));

    let sessions = SessionRegistry::shared();
    let security = SecurityConfig {
        min_password_length: 5,
        bcrypt_cost: TEST_COST,
    };
    let user_service = Arc::new(UserService::new(
        user_store.clone(),
        sessions.clone(),
        security,
    ));
    let reporting = Arc::new(ReportingService::new(sales_store));

    let app = create_api_router(user_service, reporting, user_store, sessions);

    TestContext { temp_dir, app }
}

pub async fn request_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder = builder.header("Content-Type", "application/json");

    let req_body = body.unwrap_or(Value::Null).to_string();
    let req = builder
        .body(Body::from(req_body))
        .expect("request should build");

    send(app, req).await
}

pub async fn request_no_body(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let req = builder.body(Body::empty()).expect("request should build");

    send(app, req).await
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("request should complete");

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let body: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, body)
}

pub async fn login_and_get_token(app: &axum::Router, username: &str, password: &str) -> String {
    let payload = serde_json::json!({
        "username": username,
        "password": password,
    });
    let (status, body) = request_json(app, "POST", "/api/v1/auth/login", None, Some(payload)).await;
    assert_eq!(status, StatusCode::OK, "login should succeed: {body}");
    body["data"]["token"]
        .as_str()
        .expect("login response should carry a token")
        .to_string()
}
