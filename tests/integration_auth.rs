mod common;

use axum::http::StatusCode;
use common::{register_user, send_json, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = setup_test_app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "password123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["name"], "Ada Lovelace");
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert!(body["user"].get("id").is_some());
}

#[tokio::test]
async fn test_register_never_returns_password_material() {
    let app = setup_test_app();

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "password123"
        })),
    )
    .await;

    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = setup_test_app();

    register_user(&app, "Ada", "ada@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Imposter",
            "email": "ada@example.com",
            "password": "password456"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_login_success() {
    let app = setup_test_app();
    register_user(&app, "Ada", "ada@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "email": "ada@example.com",
            "password": "password123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = setup_test_app();
    register_user(&app, "Ada", "ada@example.com").await;

    // Wrong password for a known account.
    let (status_known, body_known) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "email": "ada@example.com",
            "password": "wrongpassword"
        })),
    )
    .await;

    // An account that does not exist at all.
    let (status_unknown, body_unknown) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "email": "nobody@example.com",
            "password": "password123"
        })),
    )
    .await;

    assert_eq!(status_known, StatusCode::UNAUTHORIZED);
    assert_eq!(status_unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(body_known["error"], body_unknown["error"]);
}

#[tokio::test]
async fn test_token_grants_access_to_protected_route() {
    let app = setup_test_app();
    let (token, _) = register_user(&app, "Ada", "ada@example.com").await;

    let (status, _) = send_json(&app, "GET", "/api/posts", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let app = setup_test_app();

    let (status, body) = send_json(&app, "GET", "/api/posts", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = setup_test_app();

    let (status, _) = send_json(
        &app,
        "GET",
        "/api/posts",
        Some("not.a.real.token"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tampered_token_is_unauthorized() {
    let app = setup_test_app();
    let (token, _) = register_user(&app, "Ada", "ada@example.com").await;

    let (rest, signature) = token.rsplit_once('.').unwrap();
    let replacement = if signature.starts_with('A') { "B" } else { "A" };
    let tampered = format!("{}.{}{}", rest, replacement, &signature[1..]);

    let (status, _) = send_json(&app, "GET", "/api/posts", Some(&tampered), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    use inkpost::config::jwt::JwtConfig;
    use inkpost::utils::jwt::create_access_token;
    use uuid::Uuid;

    let app = setup_test_app();

    // Signed with the right secret but already past its expiry.
    let expired_config = JwtConfig {
        secret: common::test_jwt_config().secret,
        access_token_expiry: -3600,
    };
    let token = create_access_token(Uuid::new_v4(), "ada@example.com", &expired_config).unwrap();

    let (status, _) = send_json(&app, "GET", "/api/posts", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
