//! Route configuration
//!
//! Centralized route setup shared by `main.rs` and the integration tests.

use actix_web::web;

use crate::error::ApiError;
use crate::handlers;

/// JSON extractor configuration: payloads that fail to deserialize get
/// the same `{"error": <message>}` envelope as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public endpoints
        .route("/health", web::get().to(handlers::health::health_check))
        .route("/login", web::post().to(handlers::login::login))
        // Users
        .route("/users", web::get().to(handlers::users::list))
        .route("/users", web::post().to(handlers::users::create))
        // Blogs
        .route("/blogs", web::get().to(handlers::blogs::list))
        .route("/blogs", web::post().to(handlers::blogs::create))
        .route("/blogs/{id}", web::put().to(handlers::blogs::update))
        .route("/blogs/{id}", web::delete().to(handlers::blogs::delete));
}
