//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use paella_api::auth::jwt::JwtConfig;
use paella_api::auth::password::hash_password;
use paella_api::config::ServerConfig;
use paella_api::print::PrintRelay;
use paella_api::router::build_app_router;
use paella_api::state::AppState;
use paella_core::roles::{ROLE_ADMIN, ROLE_EMPLOYEE};
use paella_core::types::DbId;
use paella_db::models::profile::CreateProfile;
use paella_db::models::user::CreateUser;
use paella_db::repositories::{ProfileRepo, UserRepo};

pub const TEST_PASSWORD: &str = "paella-valenciana";

/// Config with test-only secrets and printing disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 14,
        },
        print_relay_url: None,
        bootstrap_admin: None,
    }
}

/// The full application router, printing disabled.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_relay(pool, None)
}

/// The full application router, printing to `relay_url` when given.
pub fn build_test_app_with_relay(pool: PgPool, relay_url: Option<String>) -> Router {
    let mut config = test_config();
    config.print_relay_url = relay_url;

    let state = AppState {
        pool,
        print_relay: Arc::new(PrintRelay::new(config.print_relay_url.clone())),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

/// Insert a user with a staff profile, password [`TEST_PASSWORD`].
pub async fn create_staff(pool: &PgPool, email: &str, role: &str) -> DbId {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
        },
    )
    .await
    .unwrap();
    ProfileRepo::create(
        pool,
        &CreateProfile {
            id: user.id,
            role: role.to_string(),
            full_name: None,
        },
    )
    .await
    .unwrap();
    user.id
}

/// Log in through the API and return the full auth response.
pub async fn login(app: Router, email: &str, password: &str) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Create an admin and return an access token for them.
pub async fn admin_token(pool: &PgPool, app: Router) -> String {
    create_staff(pool, "admin@paellas.test", ROLE_ADMIN).await;
    let json = login(app, "admin@paellas.test", TEST_PASSWORD).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Create an employee and return an access token for them.
pub async fn employee_token(pool: &PgPool, app: Router) -> String {
    create_staff(pool, "cocina@paellas.test", ROLE_EMPLOYEE).await;
    let json = login(app, "cocina@paellas.test", TEST_PASSWORD).await;
    json["access_token"].as_str().unwrap().to_string()
}
