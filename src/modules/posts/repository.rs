use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::model::Post;
use crate::utils::errors::AppError;

/// Fields for a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
}

/// Partial changes to an existing post. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

/// Storage interface for posts. Ownership decisions happen in the service
/// layer; the repository only moves rows.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest first.
    async fn list(&self) -> Result<Vec<Post>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, AppError>;

    async fn create(&self, author_id: Uuid, new: NewPost) -> Result<Post, AppError>;

    /// Fails with [`AppError::NotFound`] when the post vanished between
    /// the service's existence check and the update.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

/// PostgreSQL-backed post store.
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const POST_COLUMNS: &str = "id, title, content, published, author_id, created_at, updated_at";

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn list(&self) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn create(&self, author_id: Uuid, new: NewPost) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"INSERT INTO posts (title, content, published, author_id)
               VALUES ($1, $2, $3, $4)
               RETURNING {POST_COLUMNS}"#
        ))
        .bind(&new.title)
        .bind(&new.content)
        .bind(new.published)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"UPDATE posts
               SET title = COALESCE($2, title),
                   content = COALESCE($3, content),
                   published = COALESCE($4, published),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {POST_COLUMNS}"#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(changes.published)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Post not found"))?;

        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
