//! Repository for the `prompt_versions` table.

use sqlx::PgPool;

use agentdeck_core::types::DbId;

use crate::models::prompt::PromptVersion;

/// Column list for prompt_versions queries.
const COLUMNS: &str =
    "id, prompt_id, version_number, content, commit_message, is_active, created_at, created_by_id";

/// Provides data access for version history rows.
pub struct PromptVersionRepo;

impl PromptVersionRepo {
    /// Find a version by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PromptVersion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompt_versions WHERE id = $1");
        sqlx::query_as::<_, PromptVersion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all versions of a prompt, newest first.
    pub async fn list_for_prompt(
        pool: &PgPool,
        prompt_id: DbId,
    ) -> Result<Vec<PromptVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_versions
             WHERE prompt_id = $1
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, PromptVersion>(&query)
            .bind(prompt_id)
            .fetch_all(pool)
            .await
    }

    /// Re-activate a historical version and mirror its content onto the
    /// prompt head, deactivating every other version of that prompt.
    ///
    /// The target is matched on `(id, prompt_id)` so a version id belonging
    /// to a different prompt behaves as not-found. Nothing is deleted or
    /// renumbered; only the active flag moves.
    ///
    /// Returns the prompt's slug (for cache invalidation) on success, or
    /// `None` when the version or the prompt does not exist.
    pub async fn activate(
        pool: &PgPool,
        version_id: DbId,
        prompt_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let target: Option<(String,)> = sqlx::query_as(
            "SELECT content FROM prompt_versions WHERE id = $1 AND prompt_id = $2",
        )
        .bind(version_id)
        .bind(prompt_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((content,)) = target else {
            return Ok(None);
        };

        let updated: Option<(String,)> = sqlx::query_as(
            "UPDATE prompts SET content = $2 WHERE id = $1 RETURNING slug",
        )
        .bind(prompt_id)
        .bind(&content)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((slug,)) = updated else {
            return Ok(None);
        };

        sqlx::query("UPDATE prompt_versions SET is_active = false WHERE prompt_id = $1")
            .bind(prompt_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE prompt_versions SET is_active = true WHERE id = $1")
            .bind(version_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(slug))
    }
}
