// Blog Service Library

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;

use std::sync::Arc;

pub use error::{ApiError, Result};
pub use models::{Blog, User};

use db::{BlogStore, InMemoryStore, PgStore, UserStore};
use security::jwt::JwtService;
use services::BlogService;

/// Shared application state: store handles, the blog service, and the
/// token service. Stores are trait objects so tests run the full HTTP
/// stack against the in-memory implementation.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub blogs: Arc<dyn BlogStore>,
    pub blog_service: BlogService,
    pub tokens: JwtService,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, blogs: Arc<dyn BlogStore>, jwt_secret: &str) -> Self {
        let blog_service = BlogService::new(blogs.clone(), users.clone());
        Self {
            users,
            blogs,
            blog_service,
            tokens: JwtService::new(jwt_secret),
        }
    }

    /// Production wiring over Postgres.
    pub fn postgres(pool: sqlx::PgPool, jwt_secret: &str) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self::new(store.clone(), store, jwt_secret)
    }

    /// Test wiring over the in-memory store.
    pub fn in_memory(jwt_secret: &str) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store, jwt_secret)
    }
}
