use chrono::{DateTime, Utc};
/// User model and user-facing DTOs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Internal user record. Deliberately not `Serialize`: the password hash
/// must never reach a response body, so every outward shape goes through
/// one of the response DTOs below.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    /// Ordered back-references to owned blogs. Denormalized for per-user
    /// listing; ownership truth lives on `Blog.user_id`.
    pub blogs: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Registration payload. `username` and `password` are optional at the
/// wire level so a missing field surfaces with the same message as a too
/// short one instead of a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, message = "username must be at least 3 characters long"))]
    pub username: Option<String>,

    pub name: Option<String>,

    #[validate(length(min = 3, message = "password must be at least 3 characters long"))]
    pub password: Option<String>,
}

/// Login payload. Missing fields are treated like wrong credentials, so
/// the response never reveals which part was absent.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

/// Owner projection attached to blogs on read endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub username: String,
    pub name: Option<String>,
    pub id: Uuid,
}

impl From<&User> for OwnerSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone(),
            id: user.id,
        }
    }
}

/// Response for a freshly created user (blog references by id only).
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<Uuid>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            blogs: user.blogs.clone(),
        }
    }
}

/// Response entry for `GET /users`, with blog references resolved.
#[derive(Debug, Serialize)]
pub struct UserWithBlogsResponse {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<super::BlogSummary>,
}
