pub mod jwt_auth;

// Middleware modules:
// - jwt_auth: bearer token verification and request-scoped identity
// - Request logging: handled by actix_web::middleware::Logger

pub use jwt_auth::{CurrentUser, JwtAuthMiddleware};
