use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{AuthResponse, LoginRequest, RegisterRequestDto};
use crate::modules::posts::model::{
    CreatePostDto, Post, PostAuthor, PostResponse, UpdatePostDto,
};
use crate::modules::users::model::User;
use crate::utils::errors::FieldError;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::posts::controller::list_posts,
        crate::modules::posts::controller::get_post,
        crate::modules::posts::controller::create_post,
        crate::modules::posts::controller::update_post,
        crate::modules::posts::controller::delete_post,
    ),
    components(
        schemas(
            User,
            Post,
            PostAuthor,
            PostResponse,
            CreatePostDto,
            UpdatePostDto,
            RegisterRequestDto,
            LoginRequest,
            AuthResponse,
            ErrorResponse,
            FieldError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Posts", description = "Ownership-scoped post management")
    ),
    info(
        title = "Inkpost API",
        version = "0.1.0",
        description = "A REST API built with Rust and Axum featuring JWT authentication, per-client rate limiting and ownership-scoped posts.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
