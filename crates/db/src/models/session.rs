//! Refresh-token session model.

use sqlx::FromRow;

use agentdeck_core::types::{DbId, Timestamp};

/// Row from the `sessions` table. `refresh_token_hash` is the SHA-256 hex
/// digest of the opaque token handed to the client.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
#[derive(Debug)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
