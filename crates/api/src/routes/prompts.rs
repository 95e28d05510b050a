//! Route definitions for the prompt CMS.
//!
//! ```text
//! ADMIN (merged into /admin/prompts):
//! GET  /                                  list_prompts
//! GET  /{id}                              get_prompt (with version history)
//! POST /commit                            save_commit
//! POST /versions/{id}/activate            activate_version
//!
//! READ PATH (mounted at /prompts):
//! GET  /{slug}/content                    get_content
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

/// Admin editing/versioning routes -- nested under `/admin/prompts`.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(prompts::list_prompts))
        .route("/commit", post(prompts::save_commit))
        .route("/{id}", get(prompts::get_prompt))
        .route("/versions/{id}/activate", post(prompts::activate_version))
}

/// Content read-path routes -- mounted at `/prompts`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{slug}/content", get(prompts::get_content))
}
