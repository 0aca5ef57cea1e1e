use chrono::{DateTime, Utc};
/// Blog model and blog-facing DTOs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    /// Owner reference, set at creation and immutable thereafter.
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Creation payload. `title` and `url` are optional at the wire level so
/// their absence surfaces as a validation error rather than a
/// deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// Partial update payload: only present fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// Blog projection attached to users on read endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct BlogSummary {
    pub url: String,
    pub title: String,
    pub author: Option<String>,
    pub id: Uuid,
}

impl From<&Blog> for BlogSummary {
    fn from(blog: &Blog) -> Self {
        Self {
            url: blog.url.clone(),
            title: blog.title.clone(),
            author: blog.author.clone(),
            id: blog.id,
        }
    }
}

/// Response for create/update, owner referenced by id.
#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: Uuid,
}

impl From<&Blog> for BlogResponse {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title.clone(),
            author: blog.author.clone(),
            url: blog.url.clone(),
            likes: blog.likes,
            user: blog.user_id,
        }
    }
}

/// Response entry for `GET /blogs`, with the owner resolved.
#[derive(Debug, Serialize)]
pub struct BlogWithOwnerResponse {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: super::OwnerSummary,
}
