//! Game tuning
//!
//! Every gameplay constant lives in [`TowerConfig`]. Defaults reproduce the
//! classic feel; a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TowerError};

/// Tuning values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerConfig {
    // === Geometry ===
    /// Height of every block (also the camera step per placement)
    pub block_height: f32,
    /// Footprint of the base block, and the cap for combo growth
    pub max_extent: f32,
    /// Active block turns around past +/- this coordinate
    pub bounds: f32,

    // === Motion ===
    /// Speed of the first active block (units/sec)
    pub start_speed: f32,
    /// Added to the speed after every successful drop
    pub speed_increment: f32,

    // === Cutting ===
    /// Offsets up to this are snapped as perfect placements
    pub tolerance: f32,
    /// Growth kicks in once the combo exceeds this
    pub grow_combo_threshold: u32,
    /// Growth per perfect drop on both horizontal extents
    pub grow_amount: f32,
    /// Seconds a sheared-off piece lives before the host destroys it
    pub falling_lifetime: f32,

    // === Feedback ===
    /// Length of each half of the perfect-drop pulse (seconds)
    pub pulse_duration: f32,
    /// Extra horizontal scale at the peak of the pulse
    pub pulse_grow: f32,
    /// Clip played on every successful drop; `None` disables the sound
    pub drop_sound: Option<String>,
    /// Pitch added per combo step
    pub pitch_per_combo: f32,
    /// Upper clamp for the drop pitch
    pub max_pitch: f32,

    // === Colors ===
    /// Hue rotation per stack index (degrees)
    pub hue_step: f32,
    pub saturation: f32,
    pub value: f32,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            block_height: 0.5,
            max_extent: 5.0,
            bounds: 4.5,

            start_speed: 5.0,
            speed_increment: 0.2,

            tolerance: 0.15,
            grow_combo_threshold: 5,
            grow_amount: 0.2,
            falling_lifetime: 3.0,

            pulse_duration: 0.1,
            pulse_grow: 0.2,
            drop_sound: Some("drop".to_string()),
            pitch_per_combo: 0.1,
            max_pitch: 2.5,

            hue_step: 8.0,
            saturation: 0.8,
            value: 0.9,
        }
    }
}

impl TowerConfig {
    /// Parse and validate a JSON document (missing fields keep defaults)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would break the cutting geometry or the loop
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("block_height", self.block_height),
            ("max_extent", self.max_extent),
            ("bounds", self.bounds),
            ("start_speed", self.start_speed),
            ("tolerance", self.tolerance),
            ("falling_lifetime", self.falling_lifetime),
            ("pulse_duration", self.pulse_duration),
            ("max_pitch", self.max_pitch),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{name} must be finite and > 0, got {value}")));
            }
        }

        let non_negative = [
            ("speed_increment", self.speed_increment),
            ("grow_amount", self.grow_amount),
            ("pulse_grow", self.pulse_grow),
            ("pitch_per_combo", self.pitch_per_combo),
            ("hue_step", self.hue_step),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be finite and >= 0, got {value}")));
            }
        }

        if self.tolerance >= self.max_extent {
            return Err(invalid(format!(
                "tolerance ({}) must be smaller than max_extent ({})",
                self.tolerance, self.max_extent
            )));
        }
        if !(0.0..=1.0).contains(&self.saturation) || !(0.0..=1.0).contains(&self.value) {
            return Err(invalid("saturation and value must lie in [0, 1]".to_string()));
        }
        if self.max_pitch < 1.0 {
            return Err(invalid(format!("max_pitch must be >= 1, got {}", self.max_pitch)));
        }

        Ok(())
    }

    /// Drop sound pitch for the given combo
    pub fn drop_pitch(&self, combo: u32) -> f32 {
        (1.0 + combo as f32 * self.pitch_per_combo).clamp(1.0, self.max_pitch)
    }
}

fn invalid(msg: String) -> TowerError {
    TowerError::InvalidConfig(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TowerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_extent, 5.0);
        assert_eq!(config.tolerance, 0.15);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = TowerConfig::from_json_str(r#"{ "start_speed": 7.5, "drop_sound": null }"#)
            .expect("valid config");
        assert_eq!(config.start_speed, 7.5);
        assert_eq!(config.drop_sound, None);
        assert_eq!(config.bounds, 4.5);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = TowerConfig::from_json_str(r#"{ "block_height": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TowerError::InvalidConfig(_)));

        let err = TowerConfig::from_json_str(r#"{ "tolerance": 6.0 }"#).unwrap_err();
        assert!(matches!(err, TowerError::InvalidConfig(_)));

        let err = TowerConfig::from_json_str(r#"{ "saturation": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TowerError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = TowerConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, TowerError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TowerConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TowerError::Io(_)));
    }

    #[test]
    fn test_demo_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/fast_tower.json");
        let config = TowerConfig::load(path).expect("demo config");
        assert_eq!(config.grow_combo_threshold, 3);
        assert_eq!(config.drop_sound.as_deref(), Some("blip"));
        assert_eq!(config.block_height, 0.5);
    }

    #[test]
    fn test_drop_pitch_clamps() {
        let config = TowerConfig::default();
        assert_eq!(config.drop_pitch(0), 1.0);
        assert!((config.drop_pitch(3) - 1.3).abs() < 1e-6);
        assert_eq!(config.drop_pitch(100), 2.5);
    }
}
