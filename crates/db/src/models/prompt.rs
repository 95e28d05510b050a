//! Prompt and prompt-version entity models and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use agentdeck_core::types::{DbId, Timestamp};

/// The mutable head of a prompt document. `content` always mirrors the
/// content of the version currently flagged active, and is `None` only
/// before the first commit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prompt {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub content: Option<String>,
    pub created_at: Timestamp,
}

/// An immutable historical snapshot. Only `is_active` ever changes after
/// insertion.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptVersion {
    pub id: DbId,
    pub prompt_id: DbId,
    pub version_number: i32,
    pub content: String,
    pub commit_message: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub created_by_id: Option<DbId>,
}

/// Normalized input for one commit: the new head fields plus the version
/// snapshot to append. Used for both the create-new-prompt and the
/// update-existing-prompt paths.
#[derive(Debug)]
pub struct NewCommit {
    pub slug: String,
    pub name: String,
    pub content: String,
    pub commit_message: String,
    pub created_by_id: Option<DbId>,
}

/// What a committed write produced; the slug is returned so the caller can
/// invalidate the right cache key even when the commit changed it.
#[derive(Debug)]
pub struct CommitOutcome {
    pub prompt_id: DbId,
    pub slug: String,
    pub version_number: i32,
}
