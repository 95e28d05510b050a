//! Handlers for the prompt CMS: admin editing/versioning endpoints and the
//! agent-facing content read path.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use agentdeck_core::error::CoreError;
use agentdeck_core::prompt::CommitRequest;
use agentdeck_core::types::DbId;
use agentdeck_db::models::prompt::Prompt;
use agentdeck_prompts::PromptDetails;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AdminUser, AuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for committing prompt content. The attributed author comes
/// from the access token, never from the body.
#[derive(Debug, Deserialize)]
pub struct SaveCommitRequest {
    pub slug: String,
    pub name: String,
    pub content: String,
    pub commit_message: Option<String>,
    /// Target an existing prompt by identity instead of by slug.
    pub prompt_id: Option<DbId>,
}

/// Request body for activating a historical version.
#[derive(Debug, Deserialize)]
pub struct ActivateVersionRequest {
    pub prompt_id: DbId,
}

/// Response payload for a successful commit.
#[derive(Debug, Serialize)]
pub struct CommitResponse {
    pub prompt_id: DbId,
}

/// Response payload for the content read path.
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub slug: String,
    pub content: String,
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/prompts
///
/// Full listing ordered by slug. No pagination; the corpus is small.
pub async fn list_prompts(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<DataResponse<Vec<Prompt>>>> {
    let prompts = state.prompts.list_for_admin().await?;
    tracing::debug!(count = prompts.len(), "Listed prompts");
    Ok(Json(DataResponse { data: prompts }))
}

/// GET /api/v1/admin/prompts/{id}
///
/// A prompt together with its version history, newest first.
pub async fn get_prompt(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PromptDetails>>> {
    let details = state.prompts.details(id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            key: id.to_string(),
        })
    })?;

    Ok(Json(DataResponse { data: details }))
}

/// POST /api/v1/admin/prompts/commit
///
/// Commit new content, creating the prompt when the slug is unknown. The
/// body is folded into the engine's validated command object here at the
/// boundary.
pub async fn save_commit(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<SaveCommitRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CommitResponse>>)> {
    let request = CommitRequest {
        slug: body.slug,
        name: body.name,
        content: body.content,
        commit_message: body.commit_message,
        prompt_id: body.prompt_id,
        created_by_id: Some(admin.0.user_id),
    };

    let prompt_id = state.prompts.save_commit(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CommitResponse { prompt_id },
        }),
    ))
}

/// POST /api/v1/admin/prompts/versions/{id}/activate
///
/// Re-activate a historical version (rollback). The engine reports a
/// missing version or prompt as a plain `false`, which maps to 404 here.
pub async fn activate_version(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(version_id): Path<DbId>,
    Json(body): Json<ActivateVersionRequest>,
) -> AppResult<StatusCode> {
    let activated = state
        .prompts
        .activate_version(version_id, body.prompt_id)
        .await?;

    if activated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "PromptVersion",
            key: version_id.to_string(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Content read path
// ---------------------------------------------------------------------------

/// GET /api/v1/prompts/{slug}/content
///
/// The latency-sensitive read path used by the agent layer. Served from
/// the cache when warm; a miss falls through to the store and repopulates.
pub async fn get_content(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ContentResponse>>> {
    let content = state.resolver.get_content(&slug).await?;

    Ok(Json(DataResponse {
        data: ContentResponse { slug, content },
    }))
}
