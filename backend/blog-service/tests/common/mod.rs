//! Helpers shared by the HTTP integration tests. Everything runs against
//! the in-memory store, so each test gets an isolated application with
//! the full middleware and routing stack.
#![allow(dead_code)] // not every test binary uses every helper

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::{test, web, App, Error};
use serde_json::{json, Value};

use blog_service::{middleware::JwtAuthMiddleware, routes, AppState};

pub const TEST_SECRET: &str = "test-secret";

pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::in_memory(TEST_SECRET))
}

pub async fn init_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(state)
            .app_data(routes::json_config())
            .wrap(JwtAuthMiddleware)
            .configure(routes::configure_routes),
    )
    .await
}

pub fn api_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request {
    let mut req = test::TestRequest::with_uri(uri).method(method);
    if let Some(token) = token {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    if let Some(body) = body {
        req = req.set_json(body);
    }
    req.to_request()
}

/// Register a user and assert it succeeded.
pub async fn register_user<S, B>(app: &S, username: &str, password: &str)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let resp = test::call_service(
        app,
        api_request(
            Method::POST,
            "/users",
            None,
            Some(json!({
                "username": username,
                "name": "Superuser",
                "password": password,
            })),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

/// Log in and return the bearer token.
pub async fn login_token<S, B>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let resp = test::call_service(
        app,
        api_request(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": username, "password": password })),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    body["token"].as_str().expect("token in login body").to_owned()
}

/// Create a blog through the API and return the response body.
pub async fn create_blog<S, B>(app: &S, token: &str, payload: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let resp = test::call_service(
        app,
        api_request(Method::POST, "/blogs", Some(token), Some(payload)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    test::read_body_json(resp).await
}

/// Fetch `GET /blogs` as JSON.
pub async fn list_blogs<S, B>(app: &S) -> Vec<Value>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, api_request(Method::GET, "/blogs", None, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    test::read_body_json(resp).await
}
