//! Perfect-drop pulse animation
//!
//! A pulse scales a placed block up and back down over two equal halves.
//! It is visual only: the logical scale of the block never changes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::block::BlockId;

/// What a pulse wants the host to do after one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PulseStep {
    /// Still animating; show the block at this scale
    Scale(Vec3),
    /// Finished; restore this scale and drop the pulse
    Done(Vec3),
    /// Target vanished; drop the pulse without touching anything
    Cancelled,
}

/// Running pulse on one block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pulse {
    pub target: BlockId,
    /// Scale to return to
    pub base: Vec3,
    /// Scale at the midpoint
    pub peak: Vec3,
    /// Length of each half (seconds)
    pub half_duration: f32,
    pub elapsed: f32,
}

impl Pulse {
    pub fn new(target: BlockId, base: Vec3, grow: f32, half_duration: f32) -> Self {
        Self {
            target,
            base,
            peak: base + Vec3::new(grow, 0.0, grow),
            half_duration,
            elapsed: 0.0,
        }
    }

    /// Scale at the current elapsed time
    pub fn current_scale(&self) -> Vec3 {
        let d = self.half_duration;
        if self.elapsed < d {
            self.base.lerp(self.peak, self.elapsed / d)
        } else if self.elapsed < 2.0 * d {
            self.peak.lerp(self.base, (self.elapsed - d) / d)
        } else {
            self.base
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= 2.0 * self.half_duration
    }

    /// Advance by `dt`. `target_alive` is whether the block still exists.
    pub fn advance(&mut self, dt: f32, target_alive: bool) -> PulseStep {
        if !target_alive {
            return PulseStep::Cancelled;
        }
        self.elapsed += dt.max(0.0);
        if self.is_finished() {
            PulseStep::Done(self.base)
        } else {
            PulseStep::Scale(self.current_scale())
        }
    }
}
