//! Prompt versioning engine and content resolver.
//!
//! [`PromptEngine`] is the sole writer of prompts and their version history:
//! it commits new versions, re-activates historical ones, and invalidates
//! the content cache after every successful write. [`ContentResolver`] is
//! the latency-sensitive read path: cache lookup, store fallback, cache
//! population.
//!
//! The cache is a derived, disposable projection of the store. Writes never
//! update it in place; they delete the key and let the next read repopulate
//! it, so cache and store never need to agree transactionally.

use std::time::Duration;

use agentdeck_core::prompt::{cache_key, DEFAULT_CACHE_PREFIX, DEFAULT_CACHE_TTL_SECS};

pub mod engine;
pub mod error;
pub mod resolver;

pub use engine::{PromptDetails, PromptEngine};
pub use error::PromptError;
pub use resolver::ContentResolver;

/// Cache namespace and expiry settings, overridable per instance so tests
/// and multi-tenant deployments get isolated key spaces.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub prefix: String,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_CACHE_PREFIX.to_string(),
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl CacheConfig {
    /// The cache key for a slug under this namespace.
    pub fn key_for(&self, slug: &str) -> String {
        cache_key(&self.prefix, slug)
    }
}
