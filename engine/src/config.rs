//! Boat and environment configuration records.
//!
//! Both are plain JSON documents; see the builtins module for ready-made
//! parameter sets that skip the files entirely.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_max_angular_speed() -> f32 {
    90.0
}

/// Physical parameters of one boat. Loaded once, immutable for the
/// simulation's lifetime.
///
/// `sail_foil`, `rudder_foil` and `keel_foil` name `<foil>.csv` tables in the
/// foils directory. The keel is optional equipment: `keel_area` defaults to
/// zero and `keel_foil` to none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoatConfig {
    pub mass: f32,
    pub length: f32,
    /// Center of mass, measured from the bow along the hull.
    pub com_length: f32,
    pub moment_of_inertia: f32,
    pub sail_area: f32,
    pub rudder_area: f32,
    #[serde(default)]
    pub keel_area: f32,
    #[serde(default)]
    pub keel_distance_from_com: f32,
    pub hull_area: f32,
    pub hull_friction_coefficient: f32,
    pub hull_rotation_resistance: f32,
    #[serde(default = "default_max_angular_speed")]
    pub max_angular_speed_deg_s: f32,
    pub sail_foil: String,
    pub rudder_foil: String,
    #[serde(default)]
    pub keel_foil: Option<String>,
}

impl BoatConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_json(path)
    }
}

/// Wind and current parameters. Directions are degrees on the trigonometric
/// circle (the vector points where the fluid flows toward); speeds are m/s,
/// durations seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
    pub wind_direction: f32,
    pub wind_min_speed: f32,
    pub wind_max_speed: f32,
    /// Largest wind-speed change per tick, percent of the current speed.
    pub wind_max_delta_percent: f32,
    pub wind_gust_probability: f32,
    pub wind_gust_min_duration: f32,
    pub wind_gust_max_duration: f32,
    pub wind_gust_min_speed: f32,
    pub wind_gust_max_speed: f32,
    pub wind_gust_max_delta_percent: f32,
    pub current_direction: f32,
    pub current_speed: f32,
}

impl EnvConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = load_json(path)?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        // A later Bernoulli draw would panic on a probability outside [0, 1].
        if !(0.0..=1.0).contains(&self.wind_gust_probability) {
            return Err(ConfigError::InvalidValue {
                path: path.to_path_buf(),
                key: "wind_gust_probability",
                reason: format!("must be within [0, 1], got {}", self.wind_gust_probability),
            });
        }
        Ok(())
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_json(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("engine-config-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn boat_config_defaults_optional_keel_fields() {
        let path = temp_json(
            "boat.json",
            r#"{
                "mass": 100.0, "length": 4.0, "com_length": 1.8,
                "moment_of_inertia": 150.0, "sail_area": 7.0,
                "rudder_area": 0.1, "hull_area": 2.0,
                "hull_friction_coefficient": 0.004,
                "hull_rotation_resistance": 0.5,
                "sail_foil": "sail", "rudder_foil": "rudder"
            }"#,
        );
        let config = BoatConfig::load(&path).unwrap();
        assert_eq!(config.keel_area, 0.0);
        assert_eq!(config.keel_foil, None);
        assert_eq!(config.max_angular_speed_deg_s, 90.0);
        fs::remove_file(path).ok();
    }

    #[test]
    fn env_config_rejects_bad_gust_probability() {
        let path = temp_json(
            "env.json",
            r#"{
                "wind_direction": 180.0, "wind_min_speed": 3.0,
                "wind_max_speed": 7.0, "wind_max_delta_percent": 5.0,
                "wind_gust_probability": 1.5,
                "wind_gust_min_duration": 4.0, "wind_gust_max_duration": 12.0,
                "wind_gust_min_speed": 7.0, "wind_gust_max_speed": 11.0,
                "wind_gust_max_delta_percent": 10.0,
                "current_direction": 90.0, "current_speed": 0.2
            }"#,
        );
        let err = EnvConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "wind_gust_probability", .. }));
        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_reports_path() {
        let err = BoatConfig::load(Path::new("/nonexistent/boat.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/boat.json"));
    }
}
