//! Engine configuration parsed from a host-supplied JSON object.
//!
//! Every field is optional; missing ones take the defaults in
//! [`consts`](crate::consts). Keys are camelCase:
//!
//! - `selectionEnabled`: rubber-band select on empty canvas (default true)
//! - `showFps`: draw the FPS badge (default true)
//! - `transformerPadding`, `handleSize`, `minResize`: selection chrome
//! - `frameDurationMs`: base sprite frame duration before speed
//! - `gravity`, `jumpCooldownMs`: controller physics
//! - `hoverSpeed`: speed of hover velocity components
//! - `storageKey`: key used by the browser storage port (default `"canvas"`)

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    FRAME_DURATION_MS, GRAVITY, HANDLE_SIZE, HOVER_SPEED, JUMP_COOLDOWN_MS, MIN_RESIZE, TRANSFORMER_PADDING,
};
use crate::controller::Physics;
use crate::error::ConfigError;
use crate::transformer::TransformerSettings;
use crate::vector::Vector;

pub const DEFAULT_STORAGE_KEY: &str = "canvas";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub selection_enabled: bool,
    pub show_fps: bool,
    pub transformer_padding: f64,
    pub handle_size: f64,
    pub min_resize: f64,
    pub frame_duration_ms: f64,
    pub gravity: f64,
    pub jump_cooldown_ms: f64,
    pub hover_speed: f64,
    pub storage_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            selection_enabled: true,
            show_fps: true,
            transformer_padding: TRANSFORMER_PADDING,
            handle_size: HANDLE_SIZE,
            min_resize: MIN_RESIZE,
            frame_duration_ms: FRAME_DURATION_MS,
            gravity: GRAVITY,
            jump_cooldown_ms: JUMP_COOLDOWN_MS,
            hover_speed: HOVER_SPEED,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config object.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine can't run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("frameDurationMs", self.frame_duration_ms)?;
        positive("handleSize", self.handle_size)?;
        positive("minResize", self.min_resize)?;
        non_negative("transformerPadding", self.transformer_padding)?;
        non_negative("gravity", self.gravity)?;
        non_negative("jumpCooldownMs", self.jump_cooldown_ms)?;
        non_negative("hoverSpeed", self.hover_speed)?;
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "storageKey", reason: "must not be empty".into() });
        }
        Ok(())
    }

    #[must_use]
    pub fn transformer_settings(&self) -> TransformerSettings {
        TransformerSettings {
            padding: self.transformer_padding,
            handle_size: self.handle_size,
            min_size: self.min_resize,
        }
    }

    #[must_use]
    pub fn physics(&self) -> Physics {
        Physics { gravity: Vector::new(0.0, self.gravity), jump_cooldown_ms: self.jump_cooldown_ms }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("expected a positive number, got {value}") })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("expected a non-negative number, got {value}") })
    }
}
