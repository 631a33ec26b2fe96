//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through `tick`
//! - Seeded RNG only (autopilot)
//! - No rendering, audio or physics; side effects are queued as `Command`s

pub mod autopilot;
pub mod block;
pub mod color;
pub mod command;
pub mod cut;
pub mod pulse;
pub mod state;
pub mod tick;

pub use autopilot::{Approach, Autopilot};
pub use block::{Axis, Block, BlockId, FallingPiece};
pub use color::{BlockColor, block_color};
pub use command::Command;
pub use cut::{CutOutcome, resolve};
pub use pulse::{Pulse, PulseStep};
pub use state::{GamePhase, TowerState};
pub use tick::{TickInput, restart, tick};
