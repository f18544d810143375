//! Data-driven game balance
//!
//! Loaded from JSON; any field left out falls back to [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be finite and positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("`{field}` must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("speed_cap ({cap}) is below base_speed ({base})")]
    SpeedCapBelowBase { cap: f32, base: f32 },
    #[error("idle_aim_error ({value}) is wider than the base footprint ({limit})")]
    AimErrorTooWide { value: f32, limit: f32 },
}

/// Geometry and tempo knobs for one engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub base_width: f32,
    pub base_depth: f32,
    pub block_height: f32,
    /// Half-range `R` of the oscillation window
    pub move_range: f32,
    pub base_speed: f32,
    pub speed_increment: f32,
    pub speed_cap: f32,
    pub snap_threshold: f32,
    pub debounce_secs: f32,
    pub reset_secs: f32,
    pub idle_aim_error: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_width: BASE_WIDTH,
            base_depth: BASE_DEPTH,
            block_height: BLOCK_HEIGHT,
            move_range: MOVE_RANGE,
            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            speed_cap: SPEED_CAP,
            snap_threshold: SNAP_THRESHOLD,
            debounce_secs: DEBOUNCE_SECS,
            reset_secs: RESET_SECS,
            idle_aim_error: IDLE_AIM_ERROR,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("base_width", self.base_width),
            ("base_depth", self.base_depth),
            ("block_height", self.block_height),
            ("move_range", self.move_range),
            ("base_speed", self.base_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("speed_increment", self.speed_increment),
            ("snap_threshold", self.snap_threshold),
            ("debounce_secs", self.debounce_secs),
            ("reset_secs", self.reset_secs),
            ("idle_aim_error", self.idle_aim_error),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }

        // NaN cap fails this comparison too
        if !(self.speed_cap >= self.base_speed) {
            return Err(TuningError::SpeedCapBelowBase {
                cap: self.speed_cap,
                base: self.base_speed,
            });
        }

        let limit = self.base_width.min(self.base_depth);
        if self.idle_aim_error > limit {
            return Err(TuningError::AimErrorTooWide {
                value: self.idle_aim_error,
                limit,
            });
        }

        Ok(())
    }
}
