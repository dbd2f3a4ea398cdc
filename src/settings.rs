//! Simulation settings
//!
//! Every field has a default from `consts`, so a settings file only needs the
//! values it overrides.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::consts::*;
use crate::sim::effect::EffectParams;
use crate::sim::rect::Rect;

/// Errors from loading, saving or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Layout and tuning for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Layout ===
    /// Full window width; each panel gets half
    pub window_width: f32,
    pub window_height: f32,
    /// Panel height; the banner takes the remaining strip at the top
    pub panel_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Units per second
    pub ball_speed: f32,

    // === Obstacles ===
    pub obstacle_size: f32,
    pub oscillation_amplitude: f32,

    // === Effects ===
    pub halo_growth: f32,
    pub rotation_step: f32,

    // === Launch ===
    /// Headings strictly between these (degrees) are redrawn at launch
    pub launch_band_min_deg: u32,
    pub launch_band_max_deg: u32,

    // === Timing ===
    /// Frame deltas above this are clamped (seconds)
    pub max_frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            panel_height: PANEL_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,

            obstacle_size: OBSTACLE_SIZE,
            oscillation_amplitude: OSCILLATION_AMPLITUDE,

            halo_growth: HALO_GROWTH,
            rotation_step: ROTATION_STEP,

            launch_band_min_deg: LAUNCH_BAND_MIN_DEG,
            launch_band_max_deg: LAUNCH_BAND_MAX_DEG,

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Settings {
    /// Width of the field panel (and of the mirror panel)
    #[inline]
    pub fn panel_width(&self) -> f32 {
        self.window_width / 2.0
    }

    /// Playable rectangle: the left panel below the banner
    pub fn field_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(0.0, self.window_height - self.panel_height),
            Vec2::new(self.panel_width(), self.window_height),
        )
    }

    pub fn effect_params(&self) -> EffectParams {
        EffectParams {
            halo_growth: self.halo_growth,
            rotation_step: self.rotation_step,
            mirror_axis_x: self.panel_width(),
        }
    }

    /// Check the values describe a playable layout
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("window_width", self.window_width),
            ("window_height", self.window_height),
            ("panel_height", self.panel_height),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
            ("obstacle_size", self.obstacle_size),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("oscillation_amplitude", self.oscillation_amplitude),
            ("halo_growth", self.halo_growth),
            ("rotation_step", self.rotation_step),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, format!("must be non-negative, got {value}")));
            }
        }

        if self.panel_height > self.window_height {
            return Err(invalid("panel_height", "taller than the window"));
        }

        // Ball must pass between obstacles, and between an obstacle and an
        // edge, even with both swung fully toward each other
        let diameter = 2.0 * self.ball_radius;
        let swing = self.oscillation_amplitude;
        let third = Vec2::new(self.panel_width(), self.panel_height) / 3.0;
        let edge_gap = third.min_element() - self.obstacle_size / 2.0 - swing;
        if edge_gap <= diameter {
            return Err(invalid(
                "obstacle_size",
                format!("leaves {edge_gap} between obstacles and the field edge, ball needs {diameter}"),
            ));
        }
        let between = third.min_element() - self.obstacle_size;
        if between <= diameter {
            return Err(invalid(
                "obstacle_size",
                format!("leaves {between} between obstacles, ball needs {diameter}"),
            ));
        }
        let closest = between - 2.0 * swing;
        if closest <= diameter {
            return Err(invalid(
                "oscillation_amplitude",
                format!("oscillating obstacles close to {closest} apart, ball needs {diameter}"),
            ));
        }

        // One frame of travel must stay below the radius or contacts get skipped
        let max_step = self.ball_speed * self.max_frame_dt;
        if max_step >= self.ball_radius {
            return Err(invalid(
                "max_frame_dt",
                format!("ball can travel {max_step} in one frame, radius is {}", self.ball_radius),
            ));
        }

        if self.launch_band_min_deg > self.launch_band_max_deg || self.launch_band_max_deg > 360 {
            return Err(invalid(
                "launch_band_max_deg",
                format!(
                    "band {}..{} is not within 0..360",
                    self.launch_band_min_deg, self.launch_band_max_deg
                ),
            ));
        }

        Ok(())
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.panel_width(), 400.0);
        let field = settings.field_rect();
        assert_eq!(field.min, Vec2::new(0.0, 50.0));
        assert_eq!(field.max, Vec2::new(400.0, 600.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "ball_speed": 150.0 }"#).unwrap();
        assert_eq!(settings.ball_speed, 150.0);
        assert_eq!(settings.ball_radius, BALL_RADIUS);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "ball_radius": -1.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "ball_radius", .. }));

        let err = Settings::from_json(r#"{ "obstacle_size": 120.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "obstacle_size", .. }));

        let err = Settings::from_json(r#"{ "oscillation_amplitude": 30.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "oscillation_amplitude", .. }));

        let err = Settings::from_json(r#"{ "max_frame_dt": 0.5 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "max_frame_dt", .. }));

        let err = Settings::from_json(r#"{ "launch_band_min_deg": 200, "launch_band_max_deg": 100 }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load_from(Path::new("/nonexistent/geot.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/geot.json"));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("geot-settings-{}.json", std::process::id()));
        let settings = Settings {
            ball_speed: 180.0,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
