//! Block colors
//!
//! Purely cosmetic: each block's hue rotates with its stack index.

use serde::{Deserialize, Serialize};

/// Linear RGB color in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BlockColor {
    /// Convert HSV to RGB (`hue` in degrees, `saturation`/`value` in [0, 1])
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = value * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = value - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self {
            r: r + m,
            g: g + m,
            b: b + m,
        }
    }
}

/// Hue in degrees for the block at `index`
pub fn block_hue(index: usize, hue_step: f32) -> f32 {
    (index as f32 * hue_step) % 360.0
}

/// Color for the block at `index`
pub fn block_color(index: usize, hue_step: f32, saturation: f32, value: f32) -> BlockColor {
    BlockColor::from_hsv(block_hue(index, hue_step), saturation, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: BlockColor, b: BlockColor) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn test_primary_hues() {
        let red = BlockColor::from_hsv(0.0, 1.0, 1.0);
        assert!(close(red, BlockColor { r: 1.0, g: 0.0, b: 0.0 }));

        let green = BlockColor::from_hsv(120.0, 1.0, 1.0);
        assert!(close(green, BlockColor { r: 0.0, g: 1.0, b: 0.0 }));

        let blue = BlockColor::from_hsv(240.0, 1.0, 1.0);
        assert!(close(blue, BlockColor { r: 0.0, g: 0.0, b: 1.0 }));
    }

    #[test]
    fn test_tiny_negative_hue_is_red() {
        // rem_euclid rounds up to exactly 360, i.e. sector 6
        assert_eq!((-1e-6f32).rem_euclid(360.0), 360.0);
        let c = BlockColor::from_hsv(-1e-6, 1.0, 1.0);
        assert!(close(c, BlockColor { r: 1.0, g: 0.0, b: 0.0 }));

        let c = BlockColor::from_hsv(-360.0, 0.8, 0.9);
        assert!(close(c, block_color(0, 8.0, 0.8, 0.9)));
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(block_hue(0, 8.0), 0.0);
        assert_eq!(block_hue(10, 8.0), 80.0);
        assert_eq!(block_hue(45, 8.0), 0.0);
        assert_eq!(block_hue(46, 8.0), 8.0);
        assert!(close(block_color(45, 8.0, 0.8, 0.9), block_color(0, 8.0, 0.8, 0.9)));
    }

    #[test]
    fn test_saturation_and_value() {
        // Base block: hue 0 at s=0.8, v=0.9
        let c = block_color(0, 8.0, 0.8, 0.9);
        assert!(close(c, BlockColor { r: 0.9, g: 0.18, b: 0.18 }));
    }
}
