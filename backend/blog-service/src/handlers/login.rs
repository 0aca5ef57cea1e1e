/// Login handler: verifies credentials and issues a bearer token.
use actix_web::{web, HttpResponse};

use crate::error::{ApiError, Result};
use crate::models::{LoginRequest, LoginResponse};
use crate::security::password;
use crate::AppState;

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let payload = payload.into_inner();

    // A missing field gets the same answer as a wrong credential.
    let (Some(username), Some(candidate)) = (payload.username, payload.password) else {
        return Err(ApiError::InvalidCredentials);
    };

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    // Argon2 verification is CPU-bound like hashing.
    let hash = user.password_hash.clone();
    web::block(move || password::verify_password(&candidate, &hash))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    let token = state.tokens.sign(user.id, &user.username)?;

    tracing::info!(user_id = %user.id, username = %user.username, "login succeeded");
    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    }))
}
