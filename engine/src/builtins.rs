//! Builtin boat, environment and foil parameter sets.
//!
//! These let the engine run (and be tested) without any external data files;
//! the runner can also export the foil tables to CSV for editing.

use crate::config::{BoatConfig, EnvConfig};
use crate::foil::{FoilCoeffs, FoilSet, FoilTable};

/// A small single-handed dinghy, SI units.
pub fn dinghy_config() -> BoatConfig {
    BoatConfig {
        mass: 120.0,
        length: 4.2,
        com_length: 1.9,
        // ~(1/12)·m·L² for a slender hull
        moment_of_inertia: 180.0,
        sail_area: 7.5,
        rudder_area: 0.12,
        keel_area: 0.35,
        keel_distance_from_com: 0.25,
        hull_area: 2.4,
        hull_friction_coefficient: 0.004,
        hull_rotation_resistance: 0.6,
        max_angular_speed_deg_s: 90.0,
        sail_foil: "sail".to_string(),
        rudder_foil: "rudder".to_string(),
        keel_foil: Some("keel".to_string()),
    }
}

/// Moderate breeze with occasional short gusts and a light tidal current.
pub fn steady_breeze_env() -> EnvConfig {
    EnvConfig {
        wind_direction: 180.0,
        wind_min_speed: 3.0,
        wind_max_speed: 7.0,
        wind_max_delta_percent: 5.0,
        wind_gust_probability: 0.005,
        wind_gust_min_duration: 4.0,
        wind_gust_max_duration: 12.0,
        wind_gust_min_speed: 7.0,
        wind_gust_max_speed: 11.0,
        wind_gust_max_delta_percent: 10.0,
        current_direction: 90.0,
        current_speed: 0.15,
    }
}

fn flat_plate(alpha_deg: i32, cl_gain: f32, cd_floor: f32, cd_gain: f32) -> FoilCoeffs {
    let alpha = (alpha_deg as f32).to_radians();
    FoilCoeffs {
        cl: cl_gain * (2.0 * alpha).sin(),
        cd: cd_floor + cd_gain * alpha.sin() * alpha.sin(),
    }
}

/// Mainsail polar: thin-airfoil lift shape with a broad post-stall falloff.
pub fn sail_table() -> FoilTable {
    FoilTable::from_rows((-180..=180).map(|a| (a, flat_plate(a, 1.2, 0.08, 1.3))))
}

pub fn rudder_table() -> FoilTable {
    FoilTable::from_rows((-180..=180).map(|a| (a, flat_plate(a, 1.1, 0.02, 1.1))))
}

pub fn keel_table() -> FoilTable {
    FoilTable::from_rows((-180..=180).map(|a| (a, flat_plate(a, 1.0, 0.015, 1.0))))
}

/// Dinghy config paired with its builtin foil tables.
pub fn dinghy() -> (BoatConfig, FoilSet) {
    (
        dinghy_config(),
        FoilSet {
            sail: sail_table(),
            rudder: rudder_table(),
            keel: Some(keel_table()),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_cover_the_full_integer_domain() {
        for table in [sail_table(), rudder_table(), keel_table()] {
            for alpha in -180..=180 {
                assert!(table.lookup(alpha).is_some(), "missing row at {alpha}");
            }
        }
    }

    #[test]
    fn drag_is_never_negative_and_lift_is_antisymmetric() {
        let table = sail_table();
        for alpha in -180..=180 {
            let row = table.lookup(alpha).unwrap();
            assert!(row.cd > 0.0, "cd must stay positive at {alpha}");
            let mirrored = table.lookup(-alpha).unwrap();
            assert!(
                (row.cl + mirrored.cl).abs() < 1e-4,
                "cl should be antisymmetric at {alpha}"
            );
        }
    }
}
