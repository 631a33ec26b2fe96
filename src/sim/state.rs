//! Session state
//!
//! Everything a single run owns lives in [`TowerState`]. A restart builds a
//! fresh one from the same config.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::autopilot::{Approach, Autopilot};
use super::block::{Axis, Block, BlockId, FallingPiece};
use super::color::{BlockColor, block_color};
use super::command::Command;
use super::pulse::Pulse;
use crate::config::TowerConfig;
use crate::error::{Result, TowerError};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active block is sliding, drops are accepted
    Playing,
    /// Run ended on a total miss
    GameOver,
}

/// Complete session state (serializable)
///
/// A deserialized snapshot must go through [`TowerState::validate`] (or be
/// loaded with [`TowerState::restore`]) before it is ticked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerState {
    pub config: TowerConfig,
    pub phase: GamePhase,
    /// Successful placements
    pub score: u32,
    /// Consecutive perfect placements
    pub combo: u32,
    /// Longest perfect streak this run
    pub best_combo: u32,
    /// Current slide speed (units/sec)
    pub speed: f32,
    /// +1 or -1 along the active axis
    pub direction: f32,
    /// Axis the active block slides on
    pub axis: Axis,
    /// Placed blocks, base first
    pub stack: Vec<Block>,
    /// Block in motion, `None` once the game is over
    pub active: Option<Block>,
    /// Block that missed the tower (falling under host physics)
    pub lost_block: Option<Block>,
    /// Sheared-off pieces still alive on the host
    pub falling: Vec<FallingPiece>,
    /// Running pulse animations
    pub pulses: Vec<Pulse>,
    /// Accumulated camera shift
    pub camera_offset: Vec3,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Demo player, consulted when `TickInput::autoplay` is set
    #[serde(default)]
    pub autopilot: Autopilot,
    /// Side effects waiting for the host
    #[serde(skip)]
    pub commands: Vec<Command>,
    next_id: u32,
}

impl TowerState {
    /// Start a run: place the base block and spawn the first active block
    pub fn new(config: TowerConfig) -> Self {
        let mut state = Self {
            speed: config.start_speed,
            config,
            phase: GamePhase::Playing,
            score: 0,
            combo: 0,
            best_combo: 0,
            direction: 1.0,
            axis: Axis::X,
            stack: Vec::new(),
            active: None,
            lost_block: None,
            falling: Vec::new(),
            pulses: Vec::new(),
            camera_offset: Vec3::ZERO,
            time_ticks: 0,
            autopilot: Autopilot::default(),
            commands: Vec::new(),
            next_id: 1,
        };

        state.commands.push(Command::HideGameOver);
        state.commands.push(Command::UpdateScore {
            text: "0".to_string(),
        });

        let base = Block {
            id: state.next_block_id(),
            position: Vec3::ZERO,
            scale: Vec3::new(
                state.config.max_extent,
                state.config.block_height,
                state.config.max_extent,
            ),
            color: state.color_for(0),
        };
        state.emit_spawn(&base);
        state.stack.push(base);

        state.spawn_next();
        state
    }

    /// Allocate a new block ID
    pub fn next_block_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Top of the stack. The base block is never removed, so this holds
    /// for any state built by `new` or accepted by `validate`.
    pub fn last_block(&self) -> &Block {
        &self.stack[self.stack.len() - 1]
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Tower height in blocks above the base
    pub fn height(&self) -> usize {
        self.stack.len() - 1
    }

    /// Offset of the active block from the block below along the active axis
    pub fn active_offset(&self) -> Option<f32> {
        let active = self.active.as_ref()?;
        Some(active.axis_position(self.axis) - self.last_block().axis_position(self.axis))
    }

    /// Where the active block goes during a tick of `dt` seconds
    pub fn approach(&self, dt: f32) -> Option<Approach> {
        let block = self.active.as_ref()?.id;
        Some(Approach {
            block,
            offset: self.active_offset()?,
            step: self.speed * self.direction * dt,
        })
    }

    /// Parse a JSON snapshot and check it is safe to tick
    pub fn restore(json: &str) -> Result<Self> {
        let state: Self = serde_json::from_str(json)?;
        state.validate()?;
        log::info!(
            "Restored session at height {} (tick {})",
            state.height(),
            state.time_ticks
        );
        Ok(state)
    }

    /// Reject snapshots the simulation cannot run from
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        if self.stack.is_empty() {
            return Err(invalid_snapshot("stack has no base block"));
        }
        match (self.phase, &self.active) {
            (GamePhase::Playing, None) => {
                return Err(invalid_snapshot("playing without an active block"));
            }
            (GamePhase::GameOver, Some(_)) => {
                return Err(invalid_snapshot("game over with an active block"));
            }
            _ => {}
        }
        if !self.speed.is_finite() || self.direction.abs() != 1.0 {
            return Err(invalid_snapshot("speed or direction out of range"));
        }
        let highest = self
            .stack
            .iter()
            .chain(self.active.iter())
            .chain(self.lost_block.iter())
            .chain(self.falling.iter().map(|p| &p.block))
            .map(|b| b.id.0)
            .max()
            .unwrap_or(0);
        if self.next_id <= highest {
            return Err(invalid_snapshot("next block id already in use"));
        }
        Ok(())
    }

    /// Take the queued commands
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Spawn the next active block above the top of the stack
    pub(crate) fn spawn_next(&mut self) {
        self.axis = Axis::for_stack_len(self.stack.len());
        self.direction = 1.0;

        let last = self.last_block();
        let above = last.position + Vec3::Y * self.config.block_height;
        let position = self.axis.with(above, -self.config.bounds);
        let scale = last.scale;

        let block = Block {
            id: self.next_block_id(),
            position,
            scale,
            color: self.color_for(self.stack.len()),
        };
        log::debug!(
            "Spawned block {:?} on {:?} at height {}",
            block.id,
            self.axis,
            self.stack.len()
        );
        self.emit_spawn(&block);
        self.active = Some(block);
    }

    pub(crate) fn color_for(&self, index: usize) -> BlockColor {
        block_color(
            index,
            self.config.hue_step,
            self.config.saturation,
            self.config.value,
        )
    }

    pub(crate) fn emit_spawn(&mut self, block: &Block) {
        self.commands.push(Command::SpawnBlock {
            id: block.id,
            position: block.position,
            scale: block.scale,
            color: block.color,
        });
    }
}

fn invalid_snapshot(msg: &str) -> TowerError {
    TowerError::InvalidSnapshot(msg.to_string())
}

impl Default for TowerState {
    fn default() -> Self {
        Self::new(TowerConfig::default())
    }
}
