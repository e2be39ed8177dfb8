use std::sync::Arc;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::hashing::HashingConfig;
use crate::config::jwt::JwtConfig;
use crate::config::rate_limit::RateLimitConfig;
use crate::middleware::rate_limit::FixedWindowLimiter;
use crate::modules::posts::repository::{PgPostRepository, PostRepository};
use crate::modules::users::repository::{PgUserRepository, UserRepository};

/// Shared application state. Repositories are held behind trait objects so
/// the storage engine stays swappable (Postgres in production, in-memory
/// in tests).
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub jwt_config: JwtConfig,
    pub hashing_config: HashingConfig,
    pub cors_config: CorsConfig,
    pub rate_limits: RateLimiters,
}

/// The two concurrently active limiter instances. The counter maps inside
/// are the only shared mutable state in the request pipeline.
#[derive(Clone, Debug)]
pub struct RateLimiters {
    pub general: Arc<FixedWindowLimiter>,
    pub auth: Arc<FixedWindowLimiter>,
}

impl RateLimiters {
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self {
            general: Arc::new(FixedWindowLimiter::new(config.general_policy())),
            auth: Arc::new(FixedWindowLimiter::new(config.auth_policy())),
        }
    }
}

pub async fn init_app_state() -> AppState {
    let pool = init_db_pool().await;

    AppState {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        posts: Arc::new(PgPostRepository::new(pool)),
        jwt_config: JwtConfig::from_env(),
        hashing_config: HashingConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limits: RateLimiters::from_config(&RateLimitConfig::from_env()),
    }
}
