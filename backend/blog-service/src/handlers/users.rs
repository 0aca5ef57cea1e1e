/// User registration and listing handlers
use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::db::NewUser;
use crate::error::{ApiError, Result};
use crate::models::{CreateUserRequest, UserResponse, UserWithBlogsResponse};
use crate::security::password;
use crate::AppState;

/// POST /users
pub async fn create(
    state: web::Data<AppState>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse> {
    let payload = payload.into_inner();
    payload
        .validate()
        .map_err(|e| ApiError::Validation(validation_message(&e)))?;

    // An absent field fails the same way a too short one does.
    let username = payload.username.ok_or_else(|| {
        ApiError::Validation("username must be at least 3 characters long".to_string())
    })?;
    let password = payload.password.ok_or_else(|| {
        ApiError::Validation("password must be at least 3 characters long".to_string())
    })?;

    // Friendlier fast path; the store's uniqueness guard is authoritative.
    if state.users.find_by_username(&username).await?.is_some() {
        return Err(ApiError::DuplicateUsername);
    }

    // Argon2 is CPU-bound; keep it off the request dispatch threads.
    let password_hash = web::block(move || password::hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    let user = state
        .users
        .create(NewUser {
            username,
            name: payload.name,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// GET /users
pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse> {
    let users = state.users.list_with_blogs().await?;

    let body: Vec<UserWithBlogsResponse> = users
        .into_iter()
        .map(|(user, blogs)| UserWithBlogsResponse {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs,
        })
        .collect();

    Ok(HttpResponse::Ok().json(body))
}

/// First constraint message out of a `validator` report. Field constraints
/// carry their own messages, so callers can tell a short username from a
/// short password.
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "invalid request".to_string())
}
