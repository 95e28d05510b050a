//! Route definitions for the `/admin` resource (superuser only).

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::routes::prompts;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /users            list_users
/// POST   /users            create_user
/// GET    /users/{id}       get_user
/// PUT    /users/{id}       update_user
/// DELETE /users/{id}       delete_user (soft)
///
/// /prompts/...             see routes::prompts::admin_router
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .nest("/prompts", prompts::admin_router())
}
