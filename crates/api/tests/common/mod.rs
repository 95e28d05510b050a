//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! on top of a test database pool, plus small request/response helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use agentdeck_api::auth::jwt::JwtConfig;
use agentdeck_api::auth::password::hash_password;
use agentdeck_api::config::ServerConfig;
use agentdeck_api::router::build_app_router;
use agentdeck_api::state::AppState;
use agentdeck_cache::{ContentCache, MemoryCache};
use agentdeck_db::models::user::{CreateUser, User};
use agentdeck_db::repositories::UserRepo;
use agentdeck_prompts::{CacheConfig, ContentResolver, PromptEngine};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a fresh in-memory cache.
///
/// This goes through the same [`build_app_router`] as production, so the
/// tests exercise the identical middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let cache: Arc<dyn ContentCache> = Arc::new(MemoryCache::new());
    let cache_config = CacheConfig::default();

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        prompts: Arc::new(PromptEngine::new(
            pool.clone(),
            cache.clone(),
            cache_config.clone(),
        )),
        resolver: Arc::new(ContentResolver::new(pool, cache, cache_config)),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user directly in the database, returning the row and the
/// plaintext password used.
pub async fn create_test_user(
    pool: &PgPool,
    email: &str,
    is_superuser: bool,
) -> (User, String) {
    let password = "test_password_1";
    let hashed = hash_password(password).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: email.split('@').next().unwrap().to_string(),
            email: email.to_string(),
            password_hash: hashed,
            is_superuser,
        },
    )
    .await
    .expect("user creation should succeed");
    (user, password.to_string())
}

/// Log in via the API and return the JSON response containing
/// `access_token`, `refresh_token`, and `user` info.
pub async fn login_user(app: Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Create a user and log in, returning the access token.
pub async fn login_as(app: Router, pool: &PgPool, email: &str, is_superuser: bool) -> String {
    let (_user, password) = create_test_user(pool, email, is_superuser).await;
    let json = login_user(app, email, &password).await;
    json["access_token"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
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

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("invalid JSON body: {e}"))
}
