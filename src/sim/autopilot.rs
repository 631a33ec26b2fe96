//! Autopilot for demo/idle mode
//!
//! Picks an aim error per block from a seeded RNG and drops once the
//! active block is within it. When one step is wider than the aim window it
//! drops at the step closest to the block below instead. Same seed, same run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::block::BlockId;
use crate::config::TowerConfig;
use crate::error::{Result, TowerError};

/// Accuracy used by `Autopilot::default`
pub const DEFAULT_ACCURACY: f32 = 0.8;

/// Where the active block is heading during the coming tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approach {
    pub block: BlockId,
    /// Offset from the block below before this tick's move
    pub offset: f32,
    /// Signed distance this tick's move covers
    pub step: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Autopilot {
    rng: Pcg32,
    /// 1.0 aims within the perfect tolerance, 0.0 anywhere on the block
    accuracy: f32,
    /// Request a restart when the run ends
    pub restart_on_game_over: bool,
    /// Block the current aim was rolled for, and the aim itself
    aim: Option<(BlockId, f32)>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::seeded(0, DEFAULT_ACCURACY)
    }
}

impl Autopilot {
    /// `accuracy` must be finite and within [0, 1]
    pub fn new(seed: u64, accuracy: f32) -> Result<Self> {
        if !accuracy.is_finite() || !(0.0..=1.0).contains(&accuracy) {
            return Err(TowerError::InvalidConfig(format!(
                "autopilot accuracy must be within [0, 1], got {accuracy}"
            )));
        }
        Ok(Self::seeded(seed, accuracy))
    }

    fn seeded(seed: u64, accuracy: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            accuracy,
            restart_on_game_over: false,
            aim: None,
        }
    }

    pub fn accuracy(&self) -> f32 {
        self.accuracy
    }

    /// Forget the aim rolled for the current block (new session)
    pub fn reset_aim(&mut self) {
        self.aim = None;
    }

    /// Decide whether to drop during the coming tick.
    ///
    /// `tick` moves the block before it drops, so everything is judged on
    /// the position after this step.
    pub fn wants_drop(&mut self, approach: Approach, config: &TowerConfig) -> bool {
        let aim = self.aim_for(approach.block, config);

        let next = approach.offset + approach.step;
        if next.abs() <= aim {
            return true;
        }

        // Window too narrow for the step: drop on the side of zero we land
        // closest to, or right after crossing if that chance was missed.
        let after = next + approach.step;
        let crosses_next = next.signum() != after.signum();
        let crossed_now = approach.offset.signum() != next.signum();
        (crosses_next && next.abs() <= after.abs()) || crossed_now
    }

    fn aim_for(&mut self, block: BlockId, config: &TowerConfig) -> f32 {
        if let Some((id, aim)) = self.aim {
            if id == block {
                return aim;
            }
        }

        // Floor keeps the window wider than one step at start speed
        let floor = config.tolerance * 0.5 * self.accuracy;
        let spread = config.tolerance + (1.0 - self.accuracy) * config.max_extent;
        let aim = if floor.is_finite() && spread.is_finite() && floor < spread {
            self.rng.random_range(floor..spread)
        } else {
            0.0
        };
        self.aim = Some((block, aim));
        aim
    }
}
