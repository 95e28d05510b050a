//! HTTP-level integration tests for the prompt CMS endpoints: admin
//! commit/listing/rollback plus the authenticated content read path.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};
use sqlx::PgPool;

/// Commit via the API, returning the new prompt id.
async fn commit_prompt(
    pool: &PgPool,
    token: &str,
    slug: &str,
    content: &str,
    prompt_id: Option<i64>,
) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "slug": slug,
        "name": "Test prompt",
        "content": content,
        "commit_message": "via test",
        "prompt_id": prompt_id,
    });
    let response = post_json_auth(app, "/api/v1/admin/prompts/commit", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["prompt_id"].as_i64().unwrap()
}

/// Commit creates the prompt; details list the version history newest first.
#[sqlx::test(migrations = "../db/migrations")]
async fn commit_and_fetch_details(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::login_as(app, &pool, "editor@example.com", true).await;

    let prompt_id = commit_prompt(&pool, &token, "welcome", "v1", None).await;
    commit_prompt(&pool, &token, "welcome", "v2", Some(prompt_id)).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/admin/prompts/{prompt_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "welcome");
    assert_eq!(json["data"]["content"], "v2");

    let versions = json["data"]["versions"].as_array().unwrap();
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0]["version_number"], 2);
    assert_eq!(versions[0]["is_active"], true);
    assert_eq!(versions[1]["version_number"], 1);
    assert_eq!(versions[1]["is_active"], false);
    // The author is attributed from the access token.
    assert!(versions[0]["created_by_id"].is_number());

    // The listing is ordered by slug and includes the new prompt.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/prompts", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["slug"], "welcome");
}

/// A commit body without a slug is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn commit_requires_slug(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::login_as(app, &pool, "editor@example.com", true).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "slug": "",
        "name": "Nameless",
        "content": "text",
    });
    let response = post_json_auth(app, "/api/v1/admin/prompts/commit", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Activating a historical version rolls the head back; unknown versions
/// are 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn activate_version_rolls_back(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::login_as(app, &pool, "editor@example.com", true).await;

    let prompt_id = commit_prompt(&pool, &token, "rollme", "v1", None).await;
    commit_prompt(&pool, &token, "rollme", "v2", Some(prompt_id)).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/admin/prompts/{prompt_id}"), &token).await;
    let json = body_json(response).await;
    let v1_id = json["data"]["versions"][1]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "prompt_id": prompt_id });
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/prompts/versions/{v1_id}/activate"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/admin/prompts/{prompt_id}"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "v1");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "prompt_id": prompt_id });
    let response = post_json_auth(
        app,
        "/api/v1/admin/prompts/versions/999999/activate",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The content read path serves committed content to any authenticated
/// user and 404s for unknown slugs.
#[sqlx::test(migrations = "../db/migrations")]
async fn content_read_path(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin_token = common::login_as(app, &pool, "editor@example.com", true).await;
    commit_prompt(&pool, &admin_token, "agent-instructions", "be helpful", None).await;

    let app = common::build_test_app(pool.clone());
    let reader_token = common::login_as(app, &pool, "agent@example.com", false).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        "/api/v1/prompts/agent-instructions/content",
        &reader_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "agent-instructions");
    assert_eq!(json["data"]["content"], "be helpful");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/prompts/ghost/content", &reader_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Unauthenticated access is refused.
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/prompts/agent-instructions/content").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// The admin prompt routes are superuser-only.
#[sqlx::test(migrations = "../db/migrations")]
async fn admin_prompt_routes_require_superuser(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::login_as(app, &pool, "pleb@example.com", false).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/admin/prompts", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "slug": "x", "name": "X", "content": "c" });
    let response = post_json_auth(app, "/api/v1/admin/prompts/commit", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
