pub mod admin;
pub mod auth;
pub mod health;
pub mod prompts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                               register (public)
/// /auth/login                                  login (public)
/// /auth/refresh                                refresh (public)
/// /auth/logout                                 logout (requires auth)
/// /auth/me                                     current user (requires auth)
///
/// /admin/users                                 list, create (superuser only)
/// /admin/users/{id}                            get, update, soft-delete
///
/// /admin/prompts                               list (superuser only)
/// /admin/prompts/{id}                          details with version history
/// /admin/prompts/commit                        save a commit
/// /admin/prompts/versions/{id}/activate        rollback to a version
///
/// /prompts/{slug}/content                      resolved content (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/prompts", prompts::router())
}
