use engine::math::Vec2;
use engine::{
    builtins, Boat, Environment, FoilCoeffs, FoilKind, FoilTable, Manager, SimError, SimOptions,
};

fn constant_env(wind_speed: f32, current_speed: f32) -> Environment {
    let mut config = builtins::steady_breeze_env();
    config.wind_direction = 220.0;
    config.wind_min_speed = wind_speed;
    config.wind_max_speed = wind_speed;
    config.wind_gust_probability = 0.0;
    config.current_direction = 0.0;
    config.current_speed = current_speed;
    Environment::with_seed(config, 0)
}

fn narrow_table() -> FoilTable {
    FoilTable::from_rows((-10..=10).map(|a| (a, FoilCoeffs { cl: 0.1, cd: 0.1 })))
}

#[test]
fn missing_sail_row_is_a_fatal_lookup_error() {
    let (config, mut foils) = builtins::dinghy();
    foils.sail = narrow_table();
    let mut manager = Manager::new(
        Boat::new(config, foils),
        constant_env(5.0, 0.0),
        SimOptions::default(),
    );
    // Heading 90 with wind toward 220 puts the sail angle of attack far
    // outside the narrow table.
    let err = manager.step(&[-30.0, 0.0]).unwrap_err();
    match err {
        SimError::FoilLookup { surface, alpha } => {
            assert_eq!(surface, FoilKind::Sail);
            assert!(alpha.abs() > 10, "unexpected alpha {alpha}");
        }
        other => panic!("expected a sail lookup error, got {other:?}"),
    }
}

#[test]
fn missing_rudder_row_is_a_fatal_lookup_error() {
    let (config, mut foils) = builtins::dinghy();
    foils.rudder = narrow_table();
    let mut manager = Manager::new(
        Boat::new(config, foils),
        constant_env(0.0, 0.5),
        SimOptions::default(),
    );
    // Apparent current flows toward 0° against a rudder bearing 90°: angle
    // of attack -90, far outside the narrow table.
    let err = manager.step(&[0.0, 0.0]).unwrap_err();
    assert_eq!(
        err,
        SimError::FoilLookup {
            surface: FoilKind::Rudder,
            alpha: -90
        }
    );
}

#[test]
fn missing_keel_row_drops_only_the_keel_contribution() {
    let (config, mut foils) = builtins::dinghy();
    assert!(config.keel_area > 0.0);
    foils.keel = Some(FoilTable::from_rows(std::iter::empty()));
    let mut manager = Manager::new(
        Boat::new(config, foils),
        constant_env(0.0, 0.5),
        SimOptions::default(),
    );

    manager.step(&[0.0, 0.0]).unwrap();
    let debug = manager.last_debug();
    assert_eq!(debug.keel_alpha, Some(-90));
    assert_eq!(debug.forces.keel, Vec2::ZERO);
    assert_eq!(debug.keel_torque, 0.0);
    let sum = debug.forces.sail + debug.forces.hull;
    assert!(
        (debug.forces.total - sum).length() < 1e-6,
        "total must equal sail + hull when the keel is skipped"
    );
}

#[test]
fn non_finite_keel_coefficients_are_dropped() {
    let (config, mut foils) = builtins::dinghy();
    foils.keel = Some(FoilTable::from_rows((-180..=180).map(|a| {
        (
            a,
            FoilCoeffs {
                cl: f32::NAN,
                cd: 0.1,
            },
        )
    })));
    let mut manager = Manager::new(
        Boat::new(config, foils),
        constant_env(0.0, 0.5),
        SimOptions::default(),
    );

    manager.step(&[0.0, 0.0]).unwrap();
    let debug = manager.last_debug();
    assert_eq!(debug.forces.keel, Vec2::ZERO);
    assert!(debug.forces.total.is_finite());
}
