//! Boat state and explicit-Euler integrator.

use std::path::Path;

use bevy_math::Vec2;

use crate::config::BoatConfig;
use crate::error::ConfigError;
use crate::foil::{FoilSet, FoilTable};

/// A sailboat's kinematic state plus its immutable physical parameters and
/// foil tables.
///
/// Mutated only through [`Boat::apply_force`],
/// [`Boat::apply_angular_acceleration`], [`Boat::execute`] and the setters;
/// resetting a run means constructing a new boat. All inputs are assumed
/// pre-validated by the orchestrator, so nothing here fails.
#[derive(Debug, Clone)]
pub struct Boat {
    config: BoatConfig,
    foils: FoilSet,
    position: Vec2,
    velocity: Vec2,
    /// Degrees, always in [0, 360).
    heading_deg: f32,
    angular_speed_deg_s: f32,
    /// Commanded sail angle of attack relative to the heading, whole degrees.
    sail_angle_deg: i32,
    /// Rudder deflection relative to the heading, whole degrees.
    rudder_angle_deg: i32,
    time: f32,
}

impl Boat {
    pub fn new(config: BoatConfig, foils: FoilSet) -> Self {
        Self {
            config,
            foils,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            heading_deg: 270.0,
            angular_speed_deg_s: 0.0,
            sail_angle_deg: 0,
            rudder_angle_deg: 0,
            time: 0.0,
        }
    }

    /// Load the configuration file and the foil tables it names.
    pub fn from_config_file(path: &Path, foils_dir: &Path) -> Result<Self, ConfigError> {
        let config = BoatConfig::load(path)?;
        let foils = FoilSet::load(&config, foils_dir)?;
        Ok(Self::new(config, foils))
    }

    pub fn config(&self) -> &BoatConfig {
        &self.config
    }

    pub fn sail_table(&self) -> &FoilTable {
        &self.foils.sail
    }

    pub fn rudder_table(&self) -> &FoilTable {
        &self.foils.rudder
    }

    pub fn keel_table(&self) -> Option<&FoilTable> {
        self.foils.keel.as_ref()
    }

    pub fn mass(&self) -> f32 {
        self.config.mass
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn heading_deg(&self) -> f32 {
        self.heading_deg
    }

    pub fn angular_speed_deg_s(&self) -> f32 {
        self.angular_speed_deg_s
    }

    pub fn sail_angle_deg(&self) -> i32 {
        self.sail_angle_deg
    }

    pub fn rudder_angle_deg(&self) -> i32 {
        self.rudder_angle_deg
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// `v += F/m · dt`. The velocity itself is unbounded; the orchestrator
    /// clamps the apparent velocities that feed the force model instead.
    pub fn apply_force(&mut self, force: Vec2, dt: f32) {
        self.velocity += force / self.config.mass * dt;
    }

    /// Integrates the yaw rate, then clamps it to the configured maximum.
    pub fn apply_angular_acceleration(&mut self, accel_deg_s2: f32, dt: f32) {
        let max_rate = self.config.max_angular_speed_deg_s;
        self.angular_speed_deg_s =
            (self.angular_speed_deg_s + accel_deg_s2 * dt).clamp(-max_rate, max_rate);
    }

    /// Advance position and heading one timestep. Heading is renormalized
    /// into [0, 360) by true modulo, so the cost is O(1) whatever the yaw
    /// rate accumulated.
    pub fn execute(&mut self, dt: f32) {
        self.time += dt;
        self.position += self.velocity * dt;
        self.heading_deg = (self.heading_deg + self.angular_speed_deg_s * dt).rem_euclid(360.0);
    }

    pub fn set_sail_angle(&mut self, angle_deg: i32) {
        self.sail_angle_deg = angle_deg;
    }

    pub fn set_rudder_angle(&mut self, angle_deg: i32) {
        self.rudder_angle_deg = angle_deg;
    }

    pub fn set_heading(&mut self, heading_deg: f32) {
        self.heading_deg = heading_deg.rem_euclid(360.0);
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins;

    fn boat() -> Boat {
        let (config, foils) = builtins::dinghy();
        Boat::new(config, foils)
    }

    #[test]
    fn heading_stays_normalized_under_sustained_rotation() {
        let mut boat = boat();
        boat.set_heading(350.0);
        for i in 0..500 {
            let accel = if i % 3 == 0 { 400.0 } else { -250.0 };
            boat.apply_angular_acceleration(accel, 0.1);
            boat.execute(0.1);
            let h = boat.heading_deg();
            assert!((0.0..360.0).contains(&h), "heading {h} left [0, 360)");
        }
    }

    #[test]
    fn angular_speed_never_exceeds_configured_rate() {
        let mut boat = boat();
        let max = boat.config().max_angular_speed_deg_s;
        for _ in 0..50 {
            boat.apply_angular_acceleration(720.0, 0.1);
            assert!(boat.angular_speed_deg_s() <= max);
        }
        for _ in 0..200 {
            boat.apply_angular_acceleration(-720.0, 0.1);
            assert!(boat.angular_speed_deg_s() >= -max);
        }
    }

    #[test]
    fn apply_force_is_explicit_euler() {
        let mut boat = boat();
        let mass = boat.mass();
        boat.apply_force(Vec2::new(mass * 2.0, 0.0), 0.1);
        assert!((boat.velocity().x - 0.2).abs() < 1e-6);
        boat.execute(0.1);
        assert!((boat.position().x - 0.02).abs() < 1e-6);
    }

    #[test]
    fn set_heading_normalizes() {
        let mut boat = boat();
        boat.set_heading(-90.0);
        assert_eq!(boat.heading_deg(), 270.0);
    }
}
