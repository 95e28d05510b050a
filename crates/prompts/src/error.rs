use agentdeck_core::error::CoreError;

/// Errors from the versioning engine and content resolver.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// No prompt (or version) for the requested key. An expected outcome on
    /// read paths; callers routinely branch on it.
    #[error("prompt not found: {key}")]
    NotFound { key: String },

    /// A domain validation failure from the core rules.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// A storage uniqueness violation: concurrent commits raced on a
    /// version number, or two writers created the same slug. Callers retry.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other storage failure, propagated unmodified so the boundary
    /// layer can map it to a 5xx-equivalent response.
    #[error(transparent)]
    Database(sqlx::Error),
}

impl PromptError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }
}

impl From<sqlx::Error> for PromptError {
    /// Classify storage errors: PostgreSQL unique violations (code 23505)
    /// become [`PromptError::Conflict`]; everything else passes through.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return PromptError::Conflict(format!(
                    "duplicate value violates unique constraint {constraint}"
                ));
            }
        }
        PromptError::Database(err)
    }
}
