mod common;

use axum::http::StatusCode;
use common::{
    build_test_context, login_and_get_token, request_json, request_no_body, ADMIN_PASSWORD,
    SALES_PASSWORD,
};

#[tokio::test]
async fn salesperson_is_denied_user_management() {
    let ctx = build_test_context().await;
    let token = login_and_get_token(&ctx.app, "sally", SALES_PASSWORD).await;

    let (status, _) = request_no_body(&ctx.app, "GET", "/api/v1/users", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn listing_never_exposes_password_hashes() {
    let ctx = build_test_context().await;
    let token = login_and_get_token(&ctx.app, "admin", ADMIN_PASSWORD).await;

    let (status, body) = request_no_body(&ctx.app, "GET", "/api/v1/users", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
    let users = body["data"]["users"].as_array().unwrap();
    // Sorted by role, then username: the admin comes first.
    assert_eq!(users[0]["username"], "admin");
    assert_eq!(users[1]["username"], "sally");
    for user in users {
        assert!(user.get("password").is_none());
        assert!(user.get("password_hash").is_none());
    }
}

#[tokio::test]
async fn added_user_can_immediately_log_in() {
    let ctx = build_test_context().await;
    let token = login_and_get_token(&ctx.app, "admin", ADMIN_PASSWORD).await;

    let payload = serde_json::json!({
        "username": "carol",
        "password": "abcdef",
        "role": "Salesperson",
    });
    let (status, body) =
        request_json(&ctx.app, "POST", "/api/v1/users", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["username"], "carol");

    let carol_token = login_and_get_token(&ctx.app, "carol", "abcdef").await;
    let (status, body) =
        request_no_body(&ctx.app, "GET", "/api/v1/auth/me", Some(&carol_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "Salesperson");
}

#[tokio::test]
async fn add_user_validation_and_conflict_statuses() {
    let ctx = build_test_context().await;
    let token = login_and_get_token(&ctx.app, "admin", ADMIN_PASSWORD).await;

    // Short password
    let short = serde_json::json!({"username": "bob", "password": "ab", "role": "Salesperson"});
    let (status, _) =
        request_json(&ctx.app, "POST", "/api/v1/users", Some(&token), Some(short)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Empty username
    let empty = serde_json::json!({"username": "", "password": "abcdef", "role": "Salesperson"});
    let (status, _) =
        request_json(&ctx.app, "POST", "/api/v1/users", Some(&token), Some(empty)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Duplicate of the seeded admin
    let duplicate =
        serde_json::json!({"username": "admin", "password": "other9", "role": "Salesperson"});
    let (status, body) =
        request_json(&ctx.app, "POST", "/api/v1/users", Some(&token), Some(duplicate)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    // Store unchanged throughout.
    let (_, body) = request_no_body(&ctx.app, "GET", "/api/v1/users", Some(&token)).await;
    assert_eq!(body["data"]["total"], 2);
}

#[tokio::test]
async fn deleted_user_disappears_and_can_no_longer_log_in() {
    let ctx = build_test_context().await;
    let token = login_and_get_token(&ctx.app, "admin", ADMIN_PASSWORD).await;

    let (status, _) =
        request_no_body(&ctx.app, "DELETE", "/api/v1/users/sally", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = request_no_body(&ctx.app, "GET", "/api/v1/users", Some(&token)).await;
    assert_eq!(body["data"]["total"], 1);

    let payload = serde_json::json!({"username": "sally", "password": SALES_PASSWORD});
    let (status, _) =
        request_json(&ctx.app, "POST", "/api/v1/auth/login", None, Some(payload)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Deleting again is still a success: the record is absent either way.
    let (status, _) =
        request_no_body(&ctx.app, "DELETE", "/api/v1/users/sally", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}
