//! In-memory repository implementations for tests.
//!
//! Enabled by the `test-utils` feature so integration tests can exercise
//! the full router without a database. Behavior mirrors the PostgreSQL
//! repositories, including the Conflict on duplicate email.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::modules::posts::model::Post;
use crate::modules::posts::repository::{NewPost, PostChanges, PostRepository};
use crate::modules::users::model::{User, UserWithPassword};
use crate::modules::users::repository::UserRepository;
use crate::utils::errors::AppError;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<UserWithPassword>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == email) {
            return Err(AppError::conflict("Email already registered"));
        }

        let record = UserWithPassword {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.push(record.clone());

        Ok(record.into_user())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .map(UserWithPassword::into_user))
    }
}

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>, AppError> {
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, AppError> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, author_id: Uuid, new: NewPost) -> Result<Post, AppError> {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title: new.title,
            content: new.content,
            published: new.published,
            author_id,
            created_at: now,
            updated_at: now,
        };

        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, AppError> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = Some(content);
        }
        if let Some(published) = changes.published {
            post.published = published;
        }
        post.updated_at = Utc::now();

        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.posts.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}
