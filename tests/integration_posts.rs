mod common;

use axum::http::StatusCode;
use common::{create_post, register_user, send_json, setup_test_app};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_post_defaults() {
    let app = setup_test_app();
    let (token, user) = register_user(&app, "Ada", "ada@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/posts",
        Some(&token),
        Some(json!({ "title": "First post" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "First post");
    assert_eq!(body["content"], serde_json::Value::Null);
    assert_eq!(body["published"], false);
    assert_eq!(body["author_id"], user["id"]);
    assert_eq!(body["author"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_create_post_with_all_fields() {
    let app = setup_test_app();
    let (token, _) = register_user(&app, "Ada", "ada@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/posts",
        Some(&token),
        Some(json!({
            "title": "Full post",
            "content": "Some content",
            "published": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["content"], "Some content");
    assert_eq!(body["published"], true);
}

#[tokio::test]
async fn test_create_post_requires_auth() {
    let app = setup_test_app();

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/posts",
        None,
        Some(json!({ "title": "Anonymous post" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_contains_created_posts() {
    let app = setup_test_app();
    let (token, _) = register_user(&app, "Ada", "ada@example.com").await;

    create_post(&app, &token, "one").await;
    create_post(&app, &token, "two").await;

    let (status, body) = send_json(&app, "GET", "/api/posts", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"one"));
    assert!(titles.contains(&"two"));
}

#[tokio::test]
async fn test_get_post_by_id() {
    let app = setup_test_app();
    let (token, _) = register_user(&app, "Ada", "ada@example.com").await;
    let post = create_post(&app, &token, "findable").await;

    let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());
    let (status, body) = send_json(&app, "GET", &uri, Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "findable");
}

#[tokio::test]
async fn test_get_missing_post_is_not_found() {
    let app = setup_test_app();
    let (token, _) = register_user(&app, "Ada", "ada@example.com").await;

    let uri = format!("/api/posts/{}", Uuid::new_v4());
    let (status, _) = send_json(&app, "GET", &uri, Some(&token), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_can_update_own_post() {
    let app = setup_test_app();
    let (token, _) = register_user(&app, "Ada", "ada@example.com").await;
    let post = create_post(&app, &token, "original title").await;

    let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());
    let (status, body) = send_json(
        &app,
        "PATCH",
        &uri,
        Some(&token),
        Some(json!({ "title": "updated title" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "updated title");
    // Untouched fields keep their values.
    assert_eq!(body["published"], false);
}

#[tokio::test]
async fn test_non_owner_update_is_forbidden() {
    let app = setup_test_app();
    let (owner_token, _) = register_user(&app, "Ada", "ada@example.com").await;
    let (other_token, _) = register_user(&app, "Grace", "grace@example.com").await;
    let post = create_post(&app, &owner_token, "ada's post").await;

    let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());
    let (status, _) = send_json(
        &app,
        "PATCH",
        &uri,
        Some(&other_token),
        Some(json!({ "title": "hijacked" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_post_is_not_found_before_ownership() {
    let app = setup_test_app();
    let (token, _) = register_user(&app, "Grace", "grace@example.com").await;

    // A non-owner hitting a non-existent id gets 404, never 403.
    let uri = format!("/api/posts/{}", Uuid::new_v4());
    let (status, _) = send_json(
        &app,
        "PATCH",
        &uri,
        Some(&token),
        Some(json!({ "title": "ghost" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_can_delete_own_post() {
    let app = setup_test_app();
    let (token, _) = register_user(&app, "Ada", "ada@example.com").await;
    let post = create_post(&app, &token, "short-lived").await;

    let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());
    let (status, _) = send_json(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_json(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_owner_delete_is_forbidden() {
    let app = setup_test_app();
    let (owner_token, _) = register_user(&app, "Ada", "ada@example.com").await;
    let (other_token, _) = register_user(&app, "Grace", "grace@example.com").await;
    let post = create_post(&app, &owner_token, "ada's post").await;

    let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());
    let (status, _) = send_json(&app, "DELETE", &uri, Some(&other_token), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);

    // Still there for the owner.
    let (status, _) = send_json(&app, "GET", &uri, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
}

/// The full journey: register two users, create, update, reject a
/// non-owner, delete, and observe the post gone.
#[tokio::test]
async fn test_end_to_end_ownership_flow() {
    let app = setup_test_app();

    let (u1_token, _) = register_user(&app, "Ada", "ada@example.com").await;
    let (u2_token, _) = register_user(&app, "Grace", "grace@example.com").await;

    let post = create_post(&app, &u1_token, "lifecycle").await;
    let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());

    let (status, _) = send_json(
        &app,
        "PATCH",
        &uri,
        Some(&u1_token),
        Some(json!({ "published": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        &app,
        "PATCH",
        &uri,
        Some(&u2_token),
        Some(json!({ "title": "not yours" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send_json(&app, "DELETE", &uri, Some(&u1_token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_json(&app, "GET", &uri, Some(&u1_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
