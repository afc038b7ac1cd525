//! Game tuning constants
//!
//! Defaults come from `crate::consts`. A JSON override can be stored in
//! LocalStorage (web) or pointed to by `TREE_BOUNCE_CONFIG` (native).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be {requirement}")]
    Invalid {
        field: &'static str,
        requirement: &'static str,
    },
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the simulation and its collaborators are tuned by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Ball physics ===
    /// Vertical acceleration (negative = down)
    pub gravity: f32,
    /// Vertical speed imparted by every bounce
    pub bounce_speed: f32,
    /// Cap on vertical speed magnitude
    pub max_velocity: f32,
    pub ball_radius: f32,
    /// Distance of the ball from the trunk axis
    pub ball_orbit_radius: f32,

    // === Trunk and platforms ===
    pub trunk_radius: f32,
    pub trunk_height: f32,
    pub platform_count: u32,
    pub platform_radius: f32,
    /// Height of a platform slab along the trunk axis
    pub platform_thickness: f32,
    /// How far a platform centre sits outside the trunk surface
    pub stick_out: f32,
    pub base_platform_top_y: f32,

    // === Controls ===
    /// Radians of trunk rotation per dragged pixel
    pub rotation_speed: f32,
    /// Per-frame multiplier applied to spin after release
    pub inertia: f32,

    // === Camera / game over ===
    pub camera_follow_speed: f32,
    pub camera_height_offset: f32,
    pub camera_start_y: f32,
    pub game_over_offset: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            bounce_speed: BOUNCE_SPEED,
            max_velocity: MAX_VELOCITY,
            ball_radius: BALL_RADIUS,
            ball_orbit_radius: BALL_ORBIT_RADIUS,

            trunk_radius: TRUNK_RADIUS,
            trunk_height: TRUNK_HEIGHT,
            platform_count: PLATFORM_COUNT,
            platform_radius: PLATFORM_RADIUS,
            platform_thickness: PLATFORM_THICKNESS,
            stick_out: STICK_OUT,
            base_platform_top_y: BASE_PLATFORM_TOP_Y,

            rotation_speed: ROTATION_SPEED,
            inertia: INERTIA,

            camera_follow_speed: CAMERA_FOLLOW_SPEED,
            camera_height_offset: CAMERA_HEIGHT_OFFSET,
            camera_start_y: CAMERA_START_Y,
            game_over_offset: GAME_OVER_Y_OFFSET,
        }
    }
}

impl GameConfig {
    /// Half of the trunk height; platforms span [-half, half)
    pub fn trunk_half_height(&self) -> f32 {
        self.trunk_height / 2.0
    }

    /// Horizontal distance within which a platform can catch the ball
    pub fn catch_radius(&self) -> f32 {
        self.platform_radius + self.ball_radius
    }

    /// Parse and validate a JSON document (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, requirement: &'static str) -> ConfigError {
            ConfigError::Invalid { field, requirement }
        }

        let finite = [
            ("gravity", self.gravity),
            ("bounce_speed", self.bounce_speed),
            ("max_velocity", self.max_velocity),
            ("ball_radius", self.ball_radius),
            ("ball_orbit_radius", self.ball_orbit_radius),
            ("trunk_radius", self.trunk_radius),
            ("trunk_height", self.trunk_height),
            ("platform_radius", self.platform_radius),
            ("platform_thickness", self.platform_thickness),
            ("stick_out", self.stick_out),
            ("base_platform_top_y", self.base_platform_top_y),
            ("rotation_speed", self.rotation_speed),
            ("inertia", self.inertia),
            ("camera_follow_speed", self.camera_follow_speed),
            ("camera_height_offset", self.camera_height_offset),
            ("camera_start_y", self.camera_start_y),
            ("game_over_offset", self.game_over_offset),
        ];
        if let Some((field, _)) = finite.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(field, "a finite number"));
        }

        if self.gravity >= 0.0 {
            return Err(invalid("gravity", "negative (downward)"));
        }
        if self.bounce_speed <= 0.0 {
            return Err(invalid("bounce_speed", "> 0"));
        }
        if self.max_velocity < self.bounce_speed {
            return Err(invalid("max_velocity", ">= bounce_speed"));
        }
        if self.ball_radius <= 0.0 {
            return Err(invalid("ball_radius", "> 0"));
        }
        if self.trunk_radius <= 0.0 || self.trunk_height <= 0.0 {
            return Err(invalid("trunk_radius/trunk_height", "> 0"));
        }
        if self.platform_radius <= 0.0 || self.platform_thickness <= 0.0 {
            return Err(invalid("platform_radius/platform_thickness", "> 0"));
        }
        if self.ball_orbit_radius < 0.0 {
            return Err(invalid("ball_orbit_radius", ">= 0"));
        }
        if self.stick_out < 0.0 {
            return Err(invalid("stick_out", ">= 0"));
        }
        if self.platform_count > MAX_PLATFORM_COUNT {
            return Err(invalid("platform_count", "at most 10000"));
        }
        if !(0.0..=MAX_ROTATION_SPEED).contains(&self.rotation_speed) {
            return Err(invalid("rotation_speed", "in [0, 1] radians per pixel"));
        }
        if !(0.0..1.0).contains(&self.inertia) {
            return Err(invalid("inertia", "in [0, 1)"));
        }
        if !(0.0..=1.0).contains(&self.camera_follow_speed) {
            return Err(invalid("camera_follow_speed", "in [0, 1]"));
        }
        if self.game_over_offset >= 0.0 {
            return Err(invalid("game_over_offset", "negative"));
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tree_bounce_config";

    /// Environment variable naming a JSON config file (native)
    pub const ENV_PATH: &'static str = "TREE_BOUNCE_CONFIG";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Load config from the file named by `TREE_BOUNCE_CONFIG`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            log::info!("Using default config");
            return Self::default();
        };

        match Self::load_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.platform_count, 35);
        assert_eq!(config.trunk_half_height(), 35.0);
        assert!((config.catch_radius() - 0.55).abs() < 1e-6);
        assert!((config.base_platform_top_y - -2.725).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "gravity": -5.0, "platform_count": 10 }"#).unwrap();
        assert_eq!(config.gravity, -5.0);
        assert_eq!(config.platform_count, 10);
        assert_eq!(config.bounce_speed, BOUNCE_SPEED);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig {
            inertia: 0.5,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = GameConfig::from_json(r#"{ "gravity": 9.8 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "gravity", .. }));

        let err = GameConfig::from_json(r#"{ "inertia": 1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "inertia", .. }));

        let err = GameConfig::from_json(r#"{ "max_velocity": 1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_velocity", .. }));

        let err = GameConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_out_of_range_geometry_and_control() {
        let cases = [
            (r#"{ "stick_out": -0.1 }"#, "stick_out"),
            (r#"{ "ball_orbit_radius": -1.3 }"#, "ball_orbit_radius"),
            (r#"{ "rotation_speed": -0.005 }"#, "rotation_speed"),
            (r#"{ "rotation_speed": 1e30 }"#, "rotation_speed"),
            (r#"{ "platform_count": 4000000000 }"#, "platform_count"),
        ];
        for (json, expected) in cases {
            match GameConfig::from_json(json) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected, "{}", json),
                other => panic!("{} accepted: {:?}", json, other),
            }
        }

        // Edges stay valid
        let config = GameConfig::from_json(
            r#"{ "stick_out": 0.0, "rotation_speed": 1.0, "platform_count": 10000 }"#,
        )
        .unwrap();
        assert_eq!(config.platform_count, MAX_PLATFORM_COUNT);
    }

    #[test]
    fn test_rejects_non_finite() {
        let config = GameConfig {
            ball_radius: f32::NAN,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "ball_radius", .. }));
        assert!(err.to_string().contains("finite"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
