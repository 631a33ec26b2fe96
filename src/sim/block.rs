//! Block entities
//!
//! Blocks are plain axis-aligned boxes: a center position and full extents.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::color::BlockColor;

/// Stable identifier used by commands to address a block on the host side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u32);

/// Horizontal axis the active block slides along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// Axis for a block spawned while the stack holds `stack_len` blocks.
    /// Odd lengths move along X, even lengths along Z.
    pub fn for_stack_len(stack_len: usize) -> Self {
        if stack_len % 2 == 1 { Axis::X } else { Axis::Z }
    }

    /// Unit vector along this axis
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Z => Vec3::Z,
        }
    }

    /// Component of `v` along this axis
    #[inline]
    pub fn get(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.z,
        }
    }

    /// Copy of `v` with the component along this axis replaced
    #[inline]
    pub fn with(self, v: Vec3, value: f32) -> Vec3 {
        match self {
            Axis::X => Vec3::new(value, v.y, v.z),
            Axis::Z => Vec3::new(v.x, v.y, value),
        }
    }
}

/// A box in the tower (placed, moving or falling)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    /// Center of the box
    pub position: Vec3,
    /// Full extents (width, height, depth)
    pub scale: Vec3,
    pub color: BlockColor,
}

impl Block {
    /// Position along `axis`
    pub fn axis_position(&self, axis: Axis) -> f32 {
        axis.get(self.position)
    }

    /// Footprint width along `axis`
    pub fn axis_extent(&self, axis: Axis) -> f32 {
        axis.get(self.scale)
    }
}

/// A sheared-off piece on its way down.
///
/// The host owns the physics; this mirror only tracks how long the piece
/// has left so snapshots and renderers can see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingPiece {
    pub block: Block,
    /// Seconds until the host destroys it
    pub ttl: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_alternates_with_stack_len() {
        assert_eq!(Axis::for_stack_len(1), Axis::X);
        assert_eq!(Axis::for_stack_len(2), Axis::Z);
        assert_eq!(Axis::for_stack_len(3), Axis::X);
        assert_eq!(Axis::for_stack_len(10), Axis::Z);
    }

    #[test]
    fn test_axis_component_access() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::X.get(v), 1.0);
        assert_eq!(Axis::Z.get(v), 3.0);
        assert_eq!(Axis::X.with(v, 9.0), Vec3::new(9.0, 2.0, 3.0));
        assert_eq!(Axis::Z.with(v, 9.0), Vec3::new(1.0, 2.0, 9.0));
    }
}
