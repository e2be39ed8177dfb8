use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::modules::users::model::User;

/// A post as stored. `author_id` is set at creation and never changes.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author fields embedded in post responses.
#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct PostAuthor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for PostAuthor {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// A post together with its author summary, as returned by the API.
#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct PostResponse {
    #[serde(flatten)]
    pub post: Post,
    pub author: PostAuthor,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreatePostDto {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub content: Option<String>,
    #[serde(default)]
    pub published: bool,
}

fn at_least_one_field(dto: &UpdatePostDto) -> Result<(), ValidationError> {
    if dto.title.is_none() && dto.content.is_none() && dto.published.is_none() {
        return Err(ValidationError::new("at_least_one_field")
            .with_message("at least one field must be provided".into()));
    }
    Ok(())
}

/// Partial update. Absent fields keep their stored value; the cross-field
/// rule rejects an empty body.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[validate(schema(function = at_least_one_field))]
pub struct UpdatePostDto {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}
