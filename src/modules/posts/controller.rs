use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use super::model::{CreatePostDto, PostResponse, UpdatePostDto};
use super::service::PostService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all posts
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "List of posts", body = Vec<PostResponse>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn list_posts(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = PostService::list_posts(&state).await?;
    Ok(Json(posts))
}

/// Get a post by id
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post found", body = PostResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn get_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PostResponse>, AppError> {
    let post = PostService::get_post(&state, id).await?;
    Ok(Json(post))
}

/// Create a post owned by the caller
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreatePostDto>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let author_id = auth.user_id()?;
    let post = PostService::create_post(&state, author_id, dto).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Update an own post
#[utoipa::path(
    patch,
    path = "/api/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePostDto>,
) -> Result<Json<PostResponse>, AppError> {
    let user_id = auth.user_id()?;
    let post = PostService::update_post(&state, id, user_id, dto).await?;
    Ok(Json(post))
}

/// Delete an own post
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let user_id = auth.user_id()?;
    PostService::delete_post(&state, id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
