//! Cutting geometry
//!
//! Works on a single axis: the active block's center, the center and
//! footprint of the block underneath, and the perfect-drop tolerance.

use serde::{Deserialize, Serialize};

/// Result of dropping the active block onto the block below
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CutOutcome {
    /// Close enough: snap onto the block below
    Perfect { center: f32 },
    /// No overlap left
    Miss,
    /// Overlap survives, the overhang falls off
    Partial {
        kept_center: f32,
        kept_extent: f32,
        falling_center: f32,
        falling_extent: f32,
    },
}

/// Classify a drop.
///
/// `diff = active - last`. Checks run in order: perfect (`|diff| <= tolerance`),
/// miss (`|diff| >= last_extent`), otherwise partial.
pub fn resolve(active: f32, last: f32, last_extent: f32, tolerance: f32) -> CutOutcome {
    let diff = active - last;
    let offset = diff.abs();

    if offset <= tolerance {
        return CutOutcome::Perfect { center: last };
    }
    if offset >= last_extent {
        return CutOutcome::Miss;
    }

    let kept_extent = last_extent - offset;
    let kept_center = last + diff / 2.0;
    let falling_extent = offset;
    let falling_center = kept_center + diff.signum() * (kept_extent / 2.0 + falling_extent / 2.0);

    CutOutcome::Partial {
        kept_center,
        kept_extent,
        falling_center,
        falling_extent,
    }
}
