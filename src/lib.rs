//! Stack Tower - A timing-based block stacking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, cutting, scoring, game state)
//! - `adapter`: Command sinks that hand simulation side effects to a host
//! - `config`: Data-driven game tuning
//! - `highscores`: Best tower heights leaderboard

pub mod adapter;
pub mod config;
pub mod error;
pub mod highscores;
pub mod sim;

pub use adapter::{CommandSink, JsonLinesSink, LogSink, RecordingSink, dispatch};
pub use config::TowerConfig;
pub use error::{Result, TowerError};
pub use highscores::HighScores;

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz is plenty for one moving block)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted by the driver before clamping
    pub const MAX_FRAME_DT: f32 = 0.1;
}
