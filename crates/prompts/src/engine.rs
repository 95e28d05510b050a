//! The prompt versioning engine: commit creation, version activation, and
//! cache invalidation.

use std::sync::Arc;

use serde::Serialize;

use agentdeck_cache::ContentCache;
use agentdeck_core::prompt::{self, CommitRequest};
use agentdeck_core::types::DbId;
use agentdeck_db::models::prompt::{NewCommit, Prompt, PromptVersion};
use agentdeck_db::repositories::{PromptRepo, PromptVersionRepo};
use agentdeck_db::DbPool;

use crate::error::PromptError;
use crate::CacheConfig;

/// A prompt head together with its full version history, newest first.
#[derive(Debug, Serialize)]
pub struct PromptDetails {
    #[serde(flatten)]
    pub prompt: Prompt,
    pub versions: Vec<PromptVersion>,
}

/// Sole writer of prompts and their version history.
///
/// Every mutation runs inside a single storage transaction; the cache entry
/// for the affected slug is deleted only after that transaction commits.
/// If the caller goes away between commit and invalidation, the cache can
/// serve the previous content until its TTL expires -- a bounded staleness
/// window, not a correctness bug.
pub struct PromptEngine {
    pool: DbPool,
    cache: Arc<dyn ContentCache>,
    cache_config: CacheConfig,
}

impl PromptEngine {
    pub fn new(pool: DbPool, cache: Arc<dyn ContentCache>, cache_config: CacheConfig) -> Self {
        Self {
            pool,
            cache,
            cache_config,
        }
    }

    /// Commit new content, creating the prompt if needed.
    ///
    /// Target resolution: an explicit `prompt_id` wins and must refer to an
    /// existing prompt; otherwise the slug is looked up; otherwise a new
    /// prompt is created with version 1. The new version is always
    /// `max(version_number) + 1` and becomes the only active one.
    ///
    /// Concurrent commits against the same prompt can both read the same
    /// max; the unique constraint on `(prompt_id, version_number)` turns
    /// the loser into [`PromptError::Conflict`]. No retry is attempted
    /// here -- callers decide whether to retry.
    pub async fn save_commit(&self, request: &CommitRequest) -> Result<DbId, PromptError> {
        request.validate()?;

        let commit = NewCommit {
            slug: request.slug.clone(),
            name: request.name.clone(),
            content: request.content.clone(),
            commit_message: prompt::normalize_commit_message(request.commit_message.as_deref())?,
            created_by_id: request.created_by_id,
        };

        let target = match request.prompt_id {
            Some(id) => Some(id),
            None => PromptRepo::find_by_slug(&self.pool, &request.slug)
                .await
                .map_err(PromptError::from)?
                .map(|existing| existing.id),
        };

        let outcome = match target {
            Some(prompt_id) => PromptRepo::commit_new_version(&self.pool, prompt_id, &commit)
                .await
                .map_err(PromptError::from)?
                .ok_or_else(|| PromptError::not_found(prompt_id.to_string()))?,
            None => {
                prompt::validate_name(&request.name)?;
                PromptRepo::create_with_first_version(&self.pool, &commit)
                    .await
                    .map_err(PromptError::from)?
            }
        };

        tracing::info!(
            prompt_id = outcome.prompt_id,
            slug = %outcome.slug,
            version = outcome.version_number,
            "Prompt commit saved"
        );

        self.cache
            .delete(&self.cache_config.key_for(&outcome.slug))
            .await;

        Ok(outcome.prompt_id)
    }

    /// Re-activate a historical version: the rollback primitive.
    ///
    /// Returns `Ok(false)` -- not an error -- when the version or the
    /// prompt does not exist, or when the version belongs to a different
    /// prompt. On success the version's content is mirrored onto the head
    /// and the cache entry for the prompt's slug is invalidated. Nothing
    /// is deleted or renumbered.
    pub async fn activate_version(
        &self,
        version_id: DbId,
        prompt_id: DbId,
    ) -> Result<bool, PromptError> {
        match PromptVersionRepo::activate(&self.pool, version_id, prompt_id)
            .await
            .map_err(PromptError::from)?
        {
            Some(slug) => {
                tracing::info!(
                    version_id,
                    prompt_id,
                    slug = %slug,
                    "Prompt version activated"
                );
                self.cache.delete(&self.cache_config.key_for(&slug)).await;
                Ok(true)
            }
            None => {
                tracing::debug!(version_id, prompt_id, "Activation target not found");
                Ok(false)
            }
        }
    }

    /// Full prompt listing for the admin screen, ordered by slug.
    pub async fn list_for_admin(&self) -> Result<Vec<Prompt>, PromptError> {
        PromptRepo::list_all(&self.pool)
            .await
            .map_err(PromptError::from)
    }

    /// A prompt together with its version history, newest first.
    pub async fn details(&self, prompt_id: DbId) -> Result<Option<PromptDetails>, PromptError> {
        let Some(prompt) = PromptRepo::find_by_id(&self.pool, prompt_id)
            .await
            .map_err(PromptError::from)?
        else {
            return Ok(None);
        };

        let versions = PromptVersionRepo::list_for_prompt(&self.pool, prompt_id)
            .await
            .map_err(PromptError::from)?;

        Ok(Some(PromptDetails { prompt, versions }))
    }
}
