//! Cache port for resolved prompt content.
//!
//! The resolver and versioning engine only ever see [`ContentCache`]; the
//! concrete store behind it is an infrastructure choice. [`MemoryCache`] is
//! the in-process implementation; a networked cache slots in behind the same
//! trait.
//!
//! Semantics the implementations must uphold:
//! - single-key `get`/`set`/`delete` are atomic; an entry is either absent,
//!   fresh, or expired, never partially written
//! - `delete` is idempotent and never fails on a missing key
//! - TTL is per entry, supplied by the caller on every `set`

use std::time::Duration;

use async_trait::async_trait;

mod memory;

pub use memory::MemoryCache;

/// Key/value cache with per-entry TTL expiry.
#[async_trait]
pub trait ContentCache: Send + Sync {
    /// Look up a key. Expired entries are treated as absent.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store a value under `key`, expiring after `ttl`. Last write wins.
    async fn set(&self, key: &str, value: String, ttl: Duration);

    /// Remove a key. Succeeds whether or not the key exists.
    async fn delete(&self, key: &str);
}
