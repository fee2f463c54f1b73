use std::path::PathBuf;

use thiserror::Error;

use crate::foil::FoilKind;

/// Construction-time failures: malformed or missing configuration and foil
/// files. Always fatal; nothing is substituted with defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("bad foil table at {}, line {line}: {reason}", path.display())]
    FoilCsv {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("invalid value for `{key}` in {}: {reason}", path.display())]
    InvalidValue {
        path: PathBuf,
        key: &'static str,
        reason: String,
    },
}

/// Step-time failures. Both variants reject the tick; `InvalidCommand` is
/// raised before any state mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("command must be [sail_angle_deg, rudder_angle_deg], got {len} elements")]
    InvalidCommand { len: usize },
    #[error("no {surface} foil row for angle of attack {alpha}°")]
    FoilLookup { surface: FoilKind, alpha: i32 },
}
