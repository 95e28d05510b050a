//! Prompt CMS domain rules: field validation, the commit command object,
//! and the cache key scheme shared by the versioning engine and the
//! content resolver.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a prompt slug in characters.
pub const MAX_SLUG_LENGTH: usize = 100;

/// Maximum length of a prompt display name in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length of prompt content in characters.
pub const MAX_CONTENT_LENGTH: usize = 100_000;

/// Maximum length of a commit message in characters.
pub const MAX_COMMIT_MESSAGE_LENGTH: usize = 255;

/// Commit message used when the caller supplies none.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Updated prompt";

/// Default cache key prefix for resolved prompt content.
pub const DEFAULT_CACHE_PREFIX: &str = "prompt_cache:";

/// Default TTL for cached prompt content, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

// ---------------------------------------------------------------------------
// Cache key scheme
// ---------------------------------------------------------------------------

/// Build the cache key for a slug: `"{prefix}{slug}"`.
pub fn cache_key(prefix: &str, slug: &str) -> String {
    format!("{prefix}{slug}")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a slug: must be non-empty and within length limit.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".to_string()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug exceeds maximum length of {MAX_SLUG_LENGTH} characters (got {})",
            slug.len()
        )));
    }
    Ok(())
}

/// Validate a display name: must be non-empty and within length limit.
///
/// Only enforced when a new prompt is created; committing to an existing
/// prompt overwrites the name with whatever the caller sent.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".to_string()));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name exceeds maximum length of {MAX_NAME_LENGTH} characters (got {})",
            name.len()
        )));
    }
    Ok(())
}

/// Validate prompt content: length check only. Empty content is allowed;
/// the resolver treats a prompt with empty content as having nothing to
/// serve.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.len() > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Content exceeds maximum length of {MAX_CONTENT_LENGTH} characters (got {})",
            content.len()
        )));
    }
    Ok(())
}

/// Normalize a commit message: trim, fall back to [`DEFAULT_COMMIT_MESSAGE`]
/// when absent or blank, and enforce the length limit.
pub fn normalize_commit_message(message: Option<&str>) -> Result<String, CoreError> {
    let message = message.map(str::trim).unwrap_or("");
    if message.is_empty() {
        return Ok(DEFAULT_COMMIT_MESSAGE.to_string());
    }
    if message.len() > MAX_COMMIT_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Commit message exceeds maximum length of {MAX_COMMIT_MESSAGE_LENGTH} characters (got {})",
            message.len()
        )));
    }
    Ok(message.to_string())
}

// ---------------------------------------------------------------------------
// Commit command object
// ---------------------------------------------------------------------------

/// A validated commit command, built once at the boundary and handed to the
/// versioning engine. `content` is the new full text, not a diff.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRequest {
    pub slug: String,
    pub name: String,
    pub content: String,
    pub commit_message: Option<String>,
    /// Target an existing prompt by identity instead of by slug.
    pub prompt_id: Option<DbId>,
    /// Attributed author, when the commit comes from an authenticated user.
    pub created_by_id: Option<DbId>,
}

impl CommitRequest {
    /// Check the field-level rules that apply to every commit.
    ///
    /// The create-new-prompt path additionally requires a non-empty name;
    /// the engine enforces that once it knows which path it is on.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_slug(&self.slug)?;
        validate_content(&self.content)?;
        if self.name.len() > MAX_NAME_LENGTH {
            return Err(CoreError::Validation(format!(
                "Name exceeds maximum length of {MAX_NAME_LENGTH} characters (got {})",
                self.name.len()
            )));
        }
        Ok(())
    }
}
