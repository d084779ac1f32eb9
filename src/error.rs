//! Error types
//!
//! Normal play has no failure modes; everything here is a configuration
//! error surfaced when a session is built or an entity is seeded.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown enemy archetype: {0:?}")]
    UnknownEnemyKind(String),

    #[error("unknown power-up archetype: {0:?}")]
    UnknownPowerUpKind(String),

    #[error("invalid tuning value for `{field}`: {reason}")]
    InvalidTuning { field: &'static str, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
