//! Error types for the fallible edges of the game (config, snapshots and save files)

use thiserror::Error;

/// Errors raised outside the simulation proper
#[derive(Debug, Error)]
pub enum TowerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T> = std::result::Result<T, TowerError>;
