//! Game tuning
//!
//! Every number the simulation depends on, loadable from JSON. Missing fields
//! fall back to the reference values in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigurationError;

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Scene ===
    pub scene_width: f32,
    /// Visible frame height, also the garbage collection distance
    pub scene_height: f32,

    // === Economy & physics ===
    pub starting_impulses: u32,
    pub impulse_velocity: f32,
    pub gravity: f32,

    // === Lateral control ===
    pub tilt_gain: f32,
    pub tilt_update_interval: f32,

    // === Player ===
    pub player_start_y: f32,
    pub player_width: f32,
    pub player_height: f32,

    // === Contact ===
    pub pickup_radius: f32,
    pub hazard_radius: f32,
    /// Keep collecting orbs after a black hole strike (legacy behavior)
    pub doomed_player_collects_pickups: bool,

    // === Camera ===
    pub scroll_baseline: f32,
    pub scroll_ceiling: f32,
    pub win_altitude: f32,
    pub background_parallax: f32,
    pub stars_parallax: f32,
    pub planet_parallax: f32,

    // === Timing ===
    pub hazard_leg_duration: f32,
    pub exhaust_duration: f32,
    pub damage_tint_duration: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene_width: SCENE_WIDTH,
            scene_height: SCENE_HEIGHT,

            starting_impulses: STARTING_IMPULSES,
            impulse_velocity: IMPULSE_VELOCITY,
            gravity: GRAVITY,

            tilt_gain: TILT_GAIN,
            tilt_update_interval: TILT_UPDATE_INTERVAL,

            player_start_y: PLAYER_START_Y,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,

            pickup_radius: PICKUP_RADIUS,
            hazard_radius: HAZARD_RADIUS,
            doomed_player_collects_pickups: false,

            scroll_baseline: SCROLL_BASELINE,
            scroll_ceiling: SCROLL_CEILING,
            win_altitude: WIN_ALTITUDE,
            background_parallax: BACKGROUND_PARALLAX,
            stars_parallax: STARS_PARALLAX,
            planet_parallax: PLANET_PARALLAX,

            hazard_leg_duration: HAZARD_LEG_DURATION,
            exhaust_duration: EXHAUST_DURATION,
            damage_tint_duration: DAMAGE_TINT_DURATION,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let settings: Settings = serde_json::from_str(json).map_err(|source| {
            ConfigurationError::Parse {
                what: "settings",
                source,
            }
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject tuning the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let positive = [
            ("scene_width", self.scene_width),
            ("scene_height", self.scene_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("pickup_radius", self.pickup_radius),
            ("hazard_radius", self.hazard_radius),
            ("background_parallax", self.background_parallax),
            ("stars_parallax", self.stars_parallax),
            ("planet_parallax", self.planet_parallax),
            ("hazard_leg_duration", self.hazard_leg_duration),
            ("exhaust_duration", self.exhaust_duration),
            ("damage_tint_duration", self.damage_tint_duration),
            ("tilt_update_interval", self.tilt_update_interval),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigurationError::InvalidSetting {
                    name,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        let finite = [
            ("impulse_velocity", self.impulse_velocity),
            ("gravity", self.gravity),
            ("tilt_gain", self.tilt_gain),
            ("player_start_y", self.player_start_y),
            ("scroll_baseline", self.scroll_baseline),
            ("scroll_ceiling", self.scroll_ceiling),
            ("win_altitude", self.win_altitude),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigurationError::InvalidSetting {
                    name,
                    reason: format!("must be finite, got {value}"),
                });
            }
        }

        if self.scroll_baseline >= self.scroll_ceiling {
            return Err(ConfigurationError::InvalidSetting {
                name: "scroll_ceiling",
                reason: format!(
                    "must be above scroll_baseline ({} >= {})",
                    self.scroll_baseline, self.scroll_ceiling
                ),
            });
        }
        if self.scroll_ceiling > self.win_altitude {
            return Err(ConfigurationError::InvalidSetting {
                name: "win_altitude",
                reason: format!(
                    "must not be below scroll_ceiling ({} < {})",
                    self.win_altitude, self.scroll_ceiling
                ),
            });
        }
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
        assert_eq!(settings.starting_impulses, 4);
        assert_eq!(settings.player_width, 40.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "starting_impulses": 6, "scene_width": 375 }"#)
            .expect("valid settings");
        assert_eq!(settings.starting_impulses, 6);
        assert_eq!(settings.scene_width, 375.0);
        assert_eq!(settings.tilt_gain, TILT_GAIN);
    }

    #[test]
    fn test_rejects_zero_divisor() {
        let err = Settings::from_json(r#"{ "stars_parallax": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidSetting {
                name: "stars_parallax",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_scroll_band() {
        let json = r#"{ "scroll_baseline": 500, "scroll_ceiling": 400 }"#;
        let err = Settings::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSetting { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigurationError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigurationError::Io { .. }));
    }
}
