//! The read path for latency-sensitive callers: a strict read-through cache
//! over the prompt store.

use std::sync::Arc;

use agentdeck_cache::ContentCache;
use agentdeck_db::repositories::PromptRepo;
use agentdeck_db::DbPool;

use crate::error::PromptError;
use crate::CacheConfig;

/// Resolves prompt content by slug: cache first, store on miss, populate on
/// hit-from-store. Not-found results are never cached, so lookups for a
/// missing slug always reach the store.
pub struct ContentResolver {
    pool: DbPool,
    cache: Arc<dyn ContentCache>,
    config: CacheConfig,
}

impl ContentResolver {
    pub fn new(pool: DbPool, cache: Arc<dyn ContentCache>, config: CacheConfig) -> Self {
        Self {
            pool,
            cache,
            config,
        }
    }

    /// Resolve the current content for `slug`.
    ///
    /// A cache hit returns immediately without touching the store or
    /// refreshing the TTL. On a miss the store is consulted; non-empty
    /// content is cached under `{prefix}{slug}` with the configured TTL.
    /// A missing prompt and a prompt with empty content are the same
    /// outcome: [`PromptError::NotFound`].
    pub async fn get_content(&self, slug: &str) -> Result<String, PromptError> {
        let key = self.config.key_for(slug);

        if let Some(content) = self.cache.get(&key).await {
            tracing::debug!(slug = %slug, "Prompt content served from cache");
            return Ok(content);
        }

        let prompt = PromptRepo::find_by_slug(&self.pool, slug)
            .await
            .map_err(PromptError::from)?;

        match prompt.and_then(|p| p.content).filter(|c| !c.is_empty()) {
            Some(content) => {
                self.cache
                    .set(&key, content.clone(), self.config.ttl)
                    .await;
                tracing::debug!(slug = %slug, "Prompt content loaded from store and cached");
                Ok(content)
            }
            None => Err(PromptError::not_found(slug.to_string())),
        }
    }

    /// Drop the cache entry for `slug`. Idempotent; missing keys are fine.
    pub async fn invalidate(&self, slug: &str) {
        self.cache.delete(&self.config.key_for(slug)).await;
    }
}
