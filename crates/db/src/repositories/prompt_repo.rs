//! Repository for the `prompts` table and the transactional commit paths.

use sqlx::PgPool;

use agentdeck_core::types::DbId;

use crate::models::prompt::{CommitOutcome, NewCommit, Prompt};

/// Column list for prompts queries.
const COLUMNS: &str = "id, slug, name, content, created_at";

/// Provides data access for prompt heads, including the two commit paths.
/// Each commit runs in a single transaction so the head update, the
/// deactivate-all sweep, and the version insert land together or not at all.
pub struct PromptRepo;

impl PromptRepo {
    /// Find a prompt by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompts WHERE slug = $1");
        sqlx::query_as::<_, Prompt>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a prompt by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompts WHERE id = $1");
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every prompt, ordered by slug ascending. No pagination; the
    /// corpus is small and this feeds the admin listing only.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Prompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompts ORDER BY slug ASC");
        sqlx::query_as::<_, Prompt>(&query).fetch_all(pool).await
    }

    /// Create a brand-new prompt together with version 1, flagged active.
    ///
    /// Runs in one transaction: insert the head to obtain its id, then
    /// insert the first version. A concurrent create for the same slug
    /// trips `uq_prompts_slug` and rolls back.
    pub async fn create_with_first_version(
        pool: &PgPool,
        input: &NewCommit,
    ) -> Result<CommitOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (prompt_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO prompts (slug, name, content)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(&input.slug)
        .bind(&input.name)
        .bind(&input.content)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO prompt_versions
                (prompt_id, version_number, content, commit_message, is_active, created_by_id)
             VALUES ($1, 1, $2, $3, true, $4)",
        )
        .bind(prompt_id)
        .bind(&input.content)
        .bind(&input.commit_message)
        .bind(input.created_by_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(CommitOutcome {
            prompt_id,
            slug: input.slug.clone(),
            version_number: 1,
        })
    }

    /// Append a new version to an existing prompt and update its head.
    ///
    /// One transaction: overwrite the head fields, deactivate every
    /// existing version, insert the new version as `max(version_number) + 1`
    /// flagged active. Returns `None` (after rollback) if no prompt with
    /// the given id exists. A concurrent commit to the same prompt trips
    /// `uq_prompt_versions_prompt_version` and rolls back.
    pub async fn commit_new_version(
        pool: &PgPool,
        prompt_id: DbId,
        input: &NewCommit,
    ) -> Result<Option<CommitOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<(String,)> = sqlx::query_as(
            "UPDATE prompts SET slug = $2, name = $3, content = $4
             WHERE id = $1
             RETURNING slug",
        )
        .bind(prompt_id)
        .bind(&input.slug)
        .bind(&input.name)
        .bind(&input.content)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((slug,)) = updated else {
            return Ok(None);
        };

        sqlx::query("UPDATE prompt_versions SET is_active = false WHERE prompt_id = $1")
            .bind(prompt_id)
            .execute(&mut *tx)
            .await?;

        let (version_number,): (i32,) = sqlx::query_as(
            "INSERT INTO prompt_versions
                (prompt_id, version_number, content, commit_message, is_active, created_by_id)
             VALUES ($1,
                     COALESCE((SELECT MAX(version_number) FROM prompt_versions WHERE prompt_id = $1), 0) + 1,
                     $2, $3, true, $4)
             RETURNING version_number",
        )
        .bind(prompt_id)
        .bind(&input.content)
        .bind(&input.commit_message)
        .bind(input.created_by_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(CommitOutcome {
            prompt_id,
            slug,
            version_number,
        }))
    }
}
