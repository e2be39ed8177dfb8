use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::model::{User, UserWithPassword};
use crate::utils::errors::AppError;

/// Storage interface for user accounts. The service layer only sees this
/// trait; the concrete store is wired up in the application state.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`AppError::Conflict`] when the email is already taken.
    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
}

/// PostgreSQL-backed user store.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (name, email, password_hash)
               VALUES ($1, $2, $3)
               RETURNING id, name, email, created_at"#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict("Email already registered");
            }
            AppError::from(e)
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, AppError> {
        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
