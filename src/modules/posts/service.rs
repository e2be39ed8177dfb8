use tracing::instrument;
use uuid::Uuid;

use super::model::{CreatePostDto, Post, PostResponse, UpdatePostDto};
use super::repository::{NewPost, PostChanges};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct PostService;

impl PostService {
    #[instrument(skip_all)]
    pub async fn list_posts(state: &AppState) -> Result<Vec<PostResponse>, AppError> {
        let posts = state.posts.list().await?;

        let mut responses = Vec::with_capacity(posts.len());
        for post in posts {
            responses.push(Self::with_author(state, post).await?);
        }

        Ok(responses)
    }

    #[instrument(skip_all, fields(post_id = %id))]
    pub async fn get_post(state: &AppState, id: Uuid) -> Result<PostResponse, AppError> {
        let post = state
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        Self::with_author(state, post).await
    }

    #[instrument(skip_all, fields(author_id = %author_id))]
    pub async fn create_post(
        state: &AppState,
        author_id: Uuid,
        dto: CreatePostDto,
    ) -> Result<PostResponse, AppError> {
        let post = state
            .posts
            .create(
                author_id,
                NewPost {
                    title: dto.title,
                    content: dto.content,
                    published: dto.published,
                },
            )
            .await?;

        Self::with_author(state, post).await
    }

    #[instrument(skip_all, fields(post_id = %id))]
    pub async fn update_post(
        state: &AppState,
        id: Uuid,
        user_id: Uuid,
        dto: UpdatePostDto,
    ) -> Result<PostResponse, AppError> {
        // Existence strictly before ownership: a missing post is 404 for
        // everyone, owner or not.
        let post = state
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        Self::authorize_owner(&post, user_id)?;

        let post = state
            .posts
            .update(
                id,
                PostChanges {
                    title: dto.title,
                    content: dto.content,
                    published: dto.published,
                },
            )
            .await?;

        Self::with_author(state, post).await
    }

    #[instrument(skip_all, fields(post_id = %id))]
    pub async fn delete_post(state: &AppState, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let post = state
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        Self::authorize_owner(&post, user_id)?;

        state.posts.delete(id).await
    }

    /// Mutations are allowed only to the post's author.
    fn authorize_owner(post: &Post, user_id: Uuid) -> Result<(), AppError> {
        if post.author_id != user_id {
            return Err(AppError::forbidden("You do not own this post"));
        }
        Ok(())
    }

    async fn with_author(state: &AppState, post: Post) -> Result<PostResponse, AppError> {
        let author = state
            .users
            .find_by_id(post.author_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(anyhow::anyhow!(
                    "post {} references missing author {}",
                    post.id,
                    post.author_id
                ))
            })?;

        Ok(PostResponse {
            author: author.into(),
            post,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post_owned_by(author_id: Uuid) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: "hello".to_string(),
            content: None,
            published: false,
            author_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_is_authorized() {
        let owner = Uuid::new_v4();
        let post = post_owned_by(owner);

        assert!(PostService::authorize_owner(&post, owner).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let post = post_owned_by(Uuid::new_v4());
        let stranger = Uuid::new_v4();

        let err = PostService::authorize_owner(&post, stranger).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
