//! Bearer-token authentication middleware.
//!
//! Runs in front of every route. A request without an Authorization header
//! (or with a non-bearer scheme) passes through untouched; handlers that
//! need an identity reject it through the `CurrentUser` extractor. A
//! request that does present a bearer token is either resolved to an
//! existing user or rejected here with 401, so no handler ever sees a
//! dangling identity.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::error::ApiError;
use crate::models::User;
use crate::AppState;

/// Authenticated user resolved from the bearer token, attached to the
/// request for exactly the duration of that request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// JWT authentication middleware factory
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            // Extract the header to an owned String before any mutable
            // access to the request extensions.
            let auth_header = req
                .headers()
                .get(actix_web::http::header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            if let Some(token) = auth_header.as_deref().and_then(bearer_token) {
                match resolve_identity(&req, &token).await {
                    Ok(user) => {
                        req.extensions_mut().insert(CurrentUser(user));
                    }
                    Err(e) => {
                        let (request, _payload) = req.into_parts();
                        let response = e.error_response().map_into_right_body();
                        return Ok(ServiceResponse::new(request, response));
                    }
                }
            }

            service
                .call(req)
                .await
                .map(|res| res.map_into_left_body())
        })
    }
}

/// Verify the token and resolve its subject to a stored user.
async fn resolve_identity(req: &ServiceRequest, token: &str) -> Result<User, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Internal("application state missing".to_string()))?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("token verification failed: {e}");
        e
    })?;

    state
        .users
        .find_by_id(claims.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(user_id = %claims.user_id, "valid token for unknown user");
            ApiError::Unauthorized
        })
}

/// Pull the token out of a `Bearer <token>` header value. The scheme
/// keyword matches case-insensitively; other schemes are treated like an
/// absent header. A bearer header with an empty token yields an empty
/// string, which verification rejects.
fn bearer_token(header: &str) -> Option<String> {
    if header.len() < 6 || !header[..6].eq_ignore_ascii_case("bearer") {
        return None;
    }
    let rest = &header[6..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some(rest.trim_start().to_owned())
}

/// FromRequest implementation for CurrentUser
impl actix_web::FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<CurrentUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(ApiError::Unauthorized)),
        }
    }
}
