//! Handlers for admin user management (`/admin/users`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use agentdeck_core::error::CoreError;
use agentdeck_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use agentdeck_core::types::DbId;
use agentdeck_db::models::user::{CreateUser, UpdateUser, UserResponse};
use agentdeck_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / request types
// ---------------------------------------------------------------------------

/// Pagination parameters for the user listing.
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Include soft-deleted accounts in the listing.
    #[serde(default)]
    pub include_deleted: bool,
}

/// Request body for creating a user via the admin API.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_superuser: bool,
}

/// Request body for updating a user. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_superuser: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
///
/// List users, newest first, with limit/offset pagination and a total count.
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<UserListParams>,
) -> AppResult<Json<PageResponse<UserResponse>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let users = UserRepo::list(&state.pool, limit, offset, params.include_deleted).await?;
    let total = UserRepo::count(&state.pool, params.include_deleted).await?;

    tracing::debug!(count = users.len(), total, "Listed users");

    Ok(Json(PageResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
        total,
        limit,
        offset,
    }))
}

/// POST /api/v1/admin/users
///
/// Create a user. Unlike self-registration, the admin may grant superuser
/// rights. Duplicate emails surface as 409 via the unique constraint.
pub async fn create_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".into(),
        )));
    }
    if input.email.trim().is_empty() || !input.email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email address is required".into(),
        )));
    }
    validate_password_strength(&input.password)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
            is_superuser: input.is_superuser,
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        created_by = admin.0.user_id,
        is_superuser = user.is_superuser,
        "User created by admin"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: user.into() }),
    ))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    Ok(Json(DataResponse { data: user.into() }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Partial update; a supplied password is strength-checked and re-hashed.
pub async fn update_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let password_hash = match input.password.as_deref() {
        Some(password) => {
            validate_password_strength(password)?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let update = UpdateUser {
        name: input.name,
        email: input.email,
        password_hash,
        is_superuser: input.is_superuser,
    };

    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    tracing::info!(user_id = id, updated_by = admin.0.user_id, "User updated");

    Ok(Json(DataResponse { data: user.into() }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft delete. Deleting an already-deleted user is a conflict; an unknown
/// id is 404.
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if UserRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(user_id = id, deleted_by = admin.0.user_id, "User soft-deleted");
        return Ok(StatusCode::NO_CONTENT);
    }

    match UserRepo::find_by_id(&state.pool, id).await? {
        Some(_) => Err(AppError::Core(CoreError::Conflict(format!(
            "User {id} is already deleted"
        )))),
        None => Err(user_not_found(id)),
    }
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "User",
        key: id.to_string(),
    })
}
