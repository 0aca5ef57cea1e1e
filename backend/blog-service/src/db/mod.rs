//! Persistence layer.
//!
//! The HTTP layer only sees the `UserStore` / `BlogStore` traits; the
//! Postgres implementation backs the running service and the in-memory
//! implementation backs the test suite.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Blog, BlogSummary, OwnerSummary, UpdateBlogRequest, User};

pub use memory::InMemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user_id: Uuid,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `DuplicateUsername` on an exact case-sensitive match.
    async fn create(&self, new: NewUser) -> Result<User>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Append a blog back-reference. Atomic at the store level, but not
    /// idempotent: appending the same id twice stores it twice.
    async fn append_blog(&self, user_id: Uuid, blog_id: Uuid) -> Result<User>;

    /// All users with their back-references resolved to summaries.
    async fn list_with_blogs(&self) -> Result<Vec<(User, Vec<BlogSummary>)>>;
}

#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn create(&self, new: NewBlog) -> Result<Blog>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>>;

    /// Apply only the present fields; `None` when the id is absent.
    async fn update(&self, id: Uuid, changes: UpdateBlogRequest) -> Result<Option<Blog>>;

    /// Returns false when the id is absent.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// All blogs with their owner resolved to a summary.
    async fn list_with_owners(&self) -> Result<Vec<(Blog, OwnerSummary)>>;
}
