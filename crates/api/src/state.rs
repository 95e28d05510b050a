use std::sync::Arc;

use agentdeck_prompts::{ContentResolver, PromptEngine};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: agentdeck_db::DbPool,
    /// Server configuration (accessed by extractors and handlers).
    pub config: Arc<ServerConfig>,
    /// Prompt versioning engine (sole writer of prompt state).
    pub prompts: Arc<PromptEngine>,
    /// Read-through content resolver for the agent-facing read path.
    pub resolver: Arc<ContentResolver>,
}
