use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::json;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::rate_limit::{auth_rate_limit, general_rate_limit};
use crate::modules::auth::router::init_auth_router;
use crate::modules::posts::router::init_posts_router;
use crate::state::AppState;

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

pub fn init_router(state: AppState) -> Router {
    // Auth routes sit behind both limiters; the stricter auth layer is
    // attached here, the general layer below covers all of /api.
    let auth_routes = init_auth_router()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_rate_limit));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", auth_routes)
                .nest("/posts", init_posts_router())
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    general_rate_limit,
                )),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
