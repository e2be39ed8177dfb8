#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use inkpost::config::cors::CorsConfig;
use inkpost::config::hashing::HashingConfig;
use inkpost::config::jwt::JwtConfig;
use inkpost::config::rate_limit::RateLimitConfig;
use inkpost::router::init_router;
use inkpost::state::{AppState, RateLimiters};
use inkpost::testing::{InMemoryPostRepository, InMemoryUserRepository};
use serde_json::{Value, json};
use tower::ServiceExt;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

/// Ceilings high enough that ordinary tests never trip a limiter.
pub fn relaxed_rate_limit_config() -> RateLimitConfig {
    RateLimitConfig {
        general_max_requests: 10_000,
        general_window_secs: 60,
        auth_max_requests: 10_000,
        auth_window_secs: 60,
    }
}

pub fn test_state(rate_limit_config: RateLimitConfig) -> AppState {
    AppState {
        users: Arc::new(InMemoryUserRepository::new()),
        posts: Arc::new(InMemoryPostRepository::new()),
        jwt_config: test_jwt_config(),
        // Low bcrypt cost keeps the suite fast.
        hashing_config: HashingConfig { bcrypt_cost: 4 },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        rate_limits: RateLimiters::from_config(&rate_limit_config),
    }
}

pub fn setup_test_app() -> Router {
    init_router(test_state(relaxed_rate_limit_config()))
}

pub fn setup_test_app_with_rate_limit(rate_limit_config: RateLimitConfig) -> Router {
    init_router(test_state(rate_limit_config))
}

/// Fires one request at the app and returns status plus parsed JSON body
/// (Null for empty bodies such as 204 responses).
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

/// Registers a user and returns their token and the user object.
pub async fn register_user(app: &Router, name: &str, email: &str) -> (String, Value) {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": "password123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"].clone(),
    )
}

/// Creates a post as the given user and returns its JSON representation.
pub async fn create_post(app: &Router, token: &str, title: &str) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/posts",
        Some(token),
        Some(json!({ "title": title })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    body
}
