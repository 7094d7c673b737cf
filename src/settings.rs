//! Scene settings module
//!
//! Display and pacing constants for the scene, with optional overrides
//! from a JSON settings file. Defaults are tuned for legibility rather
//! than physical realism and are safe to ship as-is.

use anyhow::{Context, ensure};
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Rings below this segment count read as polygons, not circles.
pub const MIN_RING_SEGMENTS: usize = 24;

/// Slowest selectable clock speed.
pub const MIN_SPEED: f64 = 0.125;
/// Fastest selectable clock speed.
pub const MAX_SPEED: f64 = 64.0;

/// Tuned constants driving scale and pacing.
///
/// Every field is optional in the settings file; absent fields keep their
/// defaults. Unknown fields and out-of-range values are configuration
/// defects and fail startup.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneSettings {
    /// Display units per astronomical unit.
    pub au_scale: f64,
    /// Display units per Earth radius.
    pub base_body_scale: f64,
    /// Extra size multiplier for every body except the central one, so
    /// planets stay visible next to the sun.
    pub planet_scale_boost: f64,
    /// Speed-up applied to orbital motion.
    pub orbital_time_scale: f64,
    /// Speed-up applied to axial spin.
    pub rotation_time_scale: f64,
    /// Line segments per orbit ring.
    pub ring_segments: usize,
    /// Initial clock speed multiplier, within the selectable speed range.
    pub start_speed: f64,
    /// Start with the clock frozen.
    pub start_paused: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            au_scale: 30.0,
            base_body_scale: 0.1,
            planet_scale_boost: 10.0,
            orbital_time_scale: 5.0,
            rotation_time_scale: 0.1,
            ring_segments: 128,
            start_speed: 1.0,
            start_paused: false,
        }
    }
}

impl SceneSettings {
    /// Load settings from the platform config location, falling back to
    /// defaults when no file exists.
    ///
    /// The `ORRERY_SETTINGS` environment variable overrides the platform
    /// path; when set, the file must exist and parse.
    pub fn load_or_default() -> Result<Self, anyhow::Error> {
        if let Ok(path) = std::env::var("ORRERY_SETTINGS") {
            return Self::from_file(Path::new(&path));
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate settings from a specific file.
    ///
    /// This is primarily intended for tests or custom setups where the
    /// platform config directory is not used.
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Resolves the platform-specific settings path:
    /// - macOS: ~/Library/Application Support/orrery/settings.json
    /// - Linux: ~/.config/orrery/settings.json
    /// - Windows: %APPDATA%\orrery\config\settings.json
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "orrery").map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Range-check every field.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let positive = [
            ("au_scale", self.au_scale),
            ("base_body_scale", self.base_body_scale),
            ("planet_scale_boost", self.planet_scale_boost),
            ("orbital_time_scale", self.orbital_time_scale),
            ("rotation_time_scale", self.rotation_time_scale),
        ];
        for (name, value) in positive {
            ensure!(
                value.is_finite() && value > 0.0,
                "Setting '{}' must be positive and finite (got {})",
                name,
                value
            );
        }
        ensure!(
            self.start_speed.is_finite() && (MIN_SPEED..=MAX_SPEED).contains(&self.start_speed),
            "Setting 'start_speed' must be between {} and {} (got {})",
            MIN_SPEED,
            MAX_SPEED,
            self.start_speed
        );
        ensure!(
            self.ring_segments >= MIN_RING_SEGMENTS,
            "Setting 'ring_segments' must be at least {} (got {})",
            MIN_RING_SEGMENTS,
            self.ring_segments
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_file(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "orrery-settings-{}-{}-{}.json",
            test_name,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn test_default_settings_are_valid() {
        SceneSettings::default().validate().expect("defaults must pass validation");
    }

    #[test]
    fn test_defaults_are_the_tuned_constants() {
        let settings = SceneSettings::default();
        assert_eq!(settings.au_scale, 30.0);
        assert_eq!(settings.base_body_scale, 0.1);
        assert_eq!(settings.planet_scale_boost, 10.0);
        assert_eq!(settings.orbital_time_scale, 5.0);
        assert_eq!(settings.rotation_time_scale, 0.1);
        assert_eq!(settings.ring_segments, 128);
        assert_eq!(settings.start_speed, 1.0);
        assert!(!settings.start_paused);
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let path = unique_temp_file("partial");
        fs::write(&path, r#"{"au_scale": 45.0, "ring_segments": 64}"#)
            .expect("Failed to write settings file");

        let settings = SceneSettings::from_file(&path).expect("Failed to load settings");
        assert_eq!(settings.au_scale, 45.0);
        assert_eq!(settings.ring_segments, 64);
        // Untouched fields keep their defaults
        assert_eq!(settings.base_body_scale, SceneSettings::default().base_body_scale);
        assert!(!settings.start_paused);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = unique_temp_file("missing");
        assert!(SceneSettings::from_file(&path).is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = unique_temp_file("malformed");
        fs::write(&path, "{ not json").expect("Failed to write settings file");

        let err = SceneSettings::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("parse"), "{err}");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let path = unique_temp_file("unknown-key");
        fs::write(&path, r#"{"au_scal": 30.0}"#).expect("Failed to write settings file");

        let err = SceneSettings::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("unknown field"), "{err:#}");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_out_of_range_value_is_rejected() {
        let path = unique_temp_file("range");
        fs::write(&path, r#"{"au_scale": -30.0}"#).expect("Failed to write settings file");

        let err = SceneSettings::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("au_scale"), "{err}");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_too_few_ring_segments_is_rejected() {
        let settings = SceneSettings {
            ring_segments: 8,
            ..SceneSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("ring_segments"), "{err}");
    }

    #[test]
    fn test_start_speed_outside_the_speed_range_is_rejected() {
        // Above the fastest and below the slowest selectable speed.
        for bad in [1000.0, 0.01] {
            let settings = SceneSettings {
                start_speed: bad,
                ..SceneSettings::default()
            };
            let err = settings.validate().unwrap_err();
            assert!(err.to_string().contains("start_speed"), "{err}");
        }
    }

    #[test]
    fn test_zero_time_scale_is_rejected() {
        let settings = SceneSettings {
            orbital_time_scale: 0.0,
            ..SceneSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
