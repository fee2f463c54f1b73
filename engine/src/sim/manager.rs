//! Simulation orchestrator: apparent flows, foil lookups, force/torque
//! assembly and fixed-step integration of boat and environment.

use std::path::{Path, PathBuf};

use bevy_math::Vec2;
use tracing::{debug, warn};

use crate::boat::Boat;
use crate::config::EnvConfig;
use crate::environment::Environment;
use crate::error::{ConfigError, SimError};
use crate::foil::{FoilCoeffs, FoilKind, FoilTable};
use crate::math::{angle_of, clamp_relative_velocity, vector_of, wrap_deg, wrap_signed_deg, zero_non_finite};
use crate::sim::forces::{
    damping_torque, fluid_force, foil_force, AIR_RHO, MAX_ANGULAR_ACCEL, MAX_RELATIVE_SPEED,
    SEA_WATER_RHO, SLIP_FORCE_COEFF,
};
use crate::sim::types::{AgentState, ForceBreakdown, FullState, SailSide, StepDebug};
use crate::state_log::{LogPhase, StateLog, StateRecord};

/// Construction options for a [`Manager`].
#[derive(Debug, Clone)]
pub struct SimOptions {
    /// Fixed integration timestep, seconds.
    pub time_step: f32,
    /// Initial boat heading, degrees.
    pub heading: f32,
    /// Initial boat position, meters.
    pub position: Vec2,
    /// Half-width of the dead-ahead/dead-astern band inside which the
    /// resolved sail side is kept, degrees.
    pub sail_side_deadband: f32,
    /// Optional JSON-lines state log path.
    pub state_log: Option<PathBuf>,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            time_step: 0.1,
            heading: 90.0,
            position: Vec2::ZERO,
            sail_side_deadband: 5.0,
            state_log: None,
        }
    }
}

/// Owns one boat/environment pair and advances them strictly one tick per
/// [`Manager::step`] call. Single-threaded and turn-based: a step runs to
/// completion before the caller can observe any state.
pub struct Manager {
    boat: Boat,
    env: Environment,
    dt: f32,
    sail_side: SailSide,
    sail_side_deadband: f32,
    apparent_wind_speed: f32,
    apparent_wind_direction: f32,
    last: StepDebug,
    step_index: u64,
    state_log: Option<StateLog>,
}

impl Manager {
    pub fn new(mut boat: Boat, env: Environment, options: SimOptions) -> Self {
        boat.set_heading(options.heading);
        boat.set_position(options.position);
        let state_log = options.state_log.as_deref().and_then(|path| {
            StateLog::create(path)
                .map_err(|err| {
                    warn!(path = %path.display(), %err, "state log disabled");
                    err
                })
                .ok()
        });
        let mut manager = Self {
            boat,
            env,
            dt: options.time_step,
            sail_side: SailSide::default(),
            sail_side_deadband: options.sail_side_deadband,
            apparent_wind_speed: 0.0,
            apparent_wind_direction: 0.0,
            last: StepDebug::default(),
            step_index: 0,
            state_log,
        };
        manager.log_state(LogPhase::Init);
        manager
    }

    /// Load configuration files and build a manager from them.
    pub fn from_config_files(
        boat_config: &Path,
        env_config: &Path,
        foils_dir: &Path,
        options: SimOptions,
    ) -> Result<Self, ConfigError> {
        let boat = Boat::from_config_file(boat_config, foils_dir)?;
        let env = Environment::new(EnvConfig::load(env_config)?);
        Ok(Self::new(boat, env, options))
    }

    pub fn boat(&self) -> &Boat {
        &self.boat
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn time_step(&self) -> f32 {
        self.dt
    }

    /// Number of completed steps.
    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    /// Diagnostic telemetry from the most recent step.
    pub fn last_debug(&self) -> &StepDebug {
        &self.last
    }

    /// Full simulation snapshot.
    pub fn state(&self) -> FullState {
        FullState {
            wind: self.env.wind_vector(),
            current: self.env.current_vector(),
            heading: self.boat.heading_deg(),
            velocity: self.boat.velocity(),
            velocity_direction: angle_of(self.boat.velocity()).to_degrees(),
            position: self.boat.position(),
            sail_angle: self.boat.sail_angle_deg(),
            rudder_angle: self.boat.rudder_angle_deg(),
        }
    }

    /// Reduced view for control algorithms; apparent-wind fields are the
    /// values cached by the most recent step.
    pub fn agent_state(&self) -> AgentState {
        AgentState {
            heading: self.boat.heading_deg(),
            wind_speed: self.apparent_wind_speed,
            wind_direction: self.apparent_wind_direction,
            position: self.boat.position(),
        }
    }

    /// Advance the simulation one fixed timestep under the given
    /// `[sail_angle_deg, rudder_angle_deg]` command.
    ///
    /// Both command angles are truncated toward zero to whole degrees before
    /// use: the foil tables have integer resolution, so sub-degree trim is
    /// unrepresentable by contract.
    pub fn step(&mut self, command: &[f32]) -> Result<(), SimError> {
        let &[sail_cmd, rudder_cmd] = command else {
            return Err(SimError::InvalidCommand {
                len: command.len(),
            });
        };
        self.log_state(LogPhase::PreStep);
        self.boat.set_sail_angle(sail_cmd as i32);
        self.boat.set_rudder_angle(rudder_cmd as i32);

        let dt = self.dt;
        let config = self.boat.config().clone();
        let mut total_force = Vec2::ZERO;

        // 1 - Wind forces on the sail.
        let apparent_wind = clamp_relative_velocity(
            self.env.wind_vector() - self.boat.velocity(),
            MAX_RELATIVE_SPEED,
        );
        let wind_angle = angle_of(apparent_wind).to_degrees();
        let wind_rel = wrap_signed_deg(wind_angle - self.boat.heading_deg());
        let wind_speed = apparent_wind.length();
        self.apparent_wind_direction = wind_rel;
        self.apparent_wind_speed = wind_speed;

        // Resolve which side the sail falls on. Inside the deadband the
        // previously resolved side sticks, which keeps the rig from
        // chattering near dead up/downwind; outside it the apparent wind
        // decides: wind from starboard puts the sail to port and vice versa.
        let commanded = self.boat.sail_angle_deg();
        let side = if wind_rel.abs() < self.sail_side_deadband {
            self.sail_side
        } else if wind_rel >= 0.0 {
            SailSide::Port
        } else {
            SailSide::Starboard
        };
        self.sail_side = side;
        let effective_sail = side.sign() * commanded.abs();
        if effective_sail != commanded {
            debug!(from = commanded, to = effective_sail, "sail moved to the resolved side");
            self.boat.set_sail_angle(effective_sail);
        }

        let global_sail_angle = wrap_deg(self.boat.heading_deg() + effective_sail as f32);
        let sail_alpha = wrap_signed_deg(wind_angle - global_sail_angle).round() as i32;
        let sail_coeffs = required_lookup(self.boat.sail_table(), FoilKind::Sail, sail_alpha)?;
        // Lift sign follows the side the sail is on.
        let sail_lift_offset = if effective_sail > 0 { 90.0 } else { -90.0 };
        let sail_total = foil_force(
            AIR_RHO,
            wind_speed,
            config.sail_area,
            sail_coeffs,
            wind_angle,
            sail_lift_offset,
        );

        // Split into drive along the hull axis plus a damped leeway
        // component: the hull resists most of the sideways push.
        let forward = vector_of(1.0, self.boat.heading_deg().to_radians());
        let drive = sail_total.dot(forward) * forward;
        let slip = SLIP_FORCE_COEFF * (sail_total - drive);
        let sail_force = drive + slip;
        total_force += sail_force;
        debug!(alpha = sail_alpha, ?sail_force, wind_speed, "sail force");

        // 2 - Water resistance on the hull.
        let apparent_current = clamp_relative_velocity(
            self.env.current_vector() - self.boat.velocity(),
            MAX_RELATIVE_SPEED,
        );
        let current_angle = angle_of(apparent_current).to_degrees();
        let current_speed = apparent_current.length();
        let hull_force = vector_of(
            fluid_force(
                SEA_WATER_RHO,
                current_speed,
                config.hull_area,
                config.hull_friction_coefficient,
            )
            .abs(),
            current_angle.to_radians(),
        );
        total_force += hull_force;

        // 3 - Keel: optional equipment. Its contribution is dropped on any
        // lookup miss or non-finite value, never fatal.
        let mut keel_force = Vec2::ZERO;
        let mut keel_torque = 0.0_f32;
        let mut keel_alpha_used = None;
        if config.keel_area > 0.0 && current_speed > 0.0 {
            if let Some(table) = self.boat.keel_table() {
                let keel_angle = wrap_signed_deg(current_angle - self.boat.heading_deg());
                let keel_alpha = (keel_angle.round() as i32).clamp(-180, 180);
                keel_alpha_used = Some(keel_alpha);
                match table.lookup(keel_alpha) {
                    Some(coeffs) if coeffs.cl.is_finite() && coeffs.cd.is_finite() => {
                        let lift_offset = if keel_angle > 0.0 { -90.0 } else { 90.0 };
                        let candidate = foil_force(
                            SEA_WATER_RHO,
                            current_speed,
                            config.keel_area,
                            coeffs,
                            current_angle,
                            lift_offset,
                        );
                        if candidate.is_finite() {
                            keel_force = candidate;
                            total_force += keel_force;
                            let lever = config.keel_distance_from_com * forward;
                            keel_torque = lever.perp_dot(keel_force);
                        } else {
                            warn!(?candidate, "non-finite keel force; dropping keel contribution");
                        }
                    }
                    Some(coeffs) => {
                        warn!(
                            cl = coeffs.cl,
                            cd = coeffs.cd,
                            alpha = keel_alpha,
                            "non-finite keel coefficients; dropping keel contribution"
                        );
                    }
                    None => {
                        warn!(alpha = keel_alpha, "no keel foil row; dropping keel contribution");
                    }
                }
            }
        }

        // 4 - Water forces on the rudder, and the steering torque they exert
        // through the stern lever arm.
        let global_rudder_angle = wrap_deg(self.boat.heading_deg() + self.boat.rudder_angle_deg() as f32);
        let rudder_alpha = wrap_signed_deg(current_angle - global_rudder_angle).round() as i32;
        let rudder_coeffs = required_lookup(self.boat.rudder_table(), FoilKind::Rudder, rudder_alpha)?;
        let rudder_lift_offset = if self.boat.rudder_angle_deg() > 0 { -90.0 } else { 90.0 };
        let rudder_force = foil_force(
            SEA_WATER_RHO,
            current_speed,
            config.rudder_area,
            rudder_coeffs,
            current_angle,
            rudder_lift_offset,
        );
        let lever_arm = config.length - config.com_length;
        let rudder_torque = (-lever_arm * forward).perp_dot(rudder_force);

        // 5 - Rotational damping from the flow the yaw rate itself induces.
        let damping = damping_torque(
            self.boat.angular_speed_deg_s(),
            lever_arm,
            config.hull_area,
            config.hull_rotation_resistance,
        );

        if !keel_torque.is_finite() {
            warn!(keel_torque, "non-finite keel torque; resetting to zero");
            keel_torque = 0.0;
        }
        let mut net_torque = rudder_torque + keel_torque + damping;
        if !net_torque.is_finite() {
            warn!(net_torque, "non-finite net torque; resetting to zero");
            net_torque = 0.0;
        }
        let angular_acceleration = (net_torque / config.moment_of_inertia)
            .to_degrees()
            .clamp(-MAX_ANGULAR_ACCEL, MAX_ANGULAR_ACCEL);
        self.boat.apply_angular_acceleration(angular_acceleration, dt);
        debug!(rudder_torque, keel_torque, damping, angular_acceleration, "torque assembly");

        // 6 - Apply the linear forces and integrate boat and environment.
        if !total_force.is_finite() {
            warn!(?total_force, "non-finite total force; sanitizing to zero");
            total_force = zero_non_finite(total_force);
        }
        self.boat.apply_force(total_force, dt);
        self.boat.execute(dt);
        self.env.execute(dt);

        self.last = StepDebug {
            apparent_wind,
            apparent_wind_speed: wind_speed,
            apparent_wind_direction: wind_rel,
            sail_side: side,
            effective_sail_angle: effective_sail,
            sail_alpha,
            apparent_current,
            rudder_alpha,
            keel_alpha: keel_alpha_used,
            forces: ForceBreakdown {
                sail: sail_force,
                hull: hull_force,
                keel: keel_force,
                total: total_force,
            },
            rudder_torque,
            keel_torque,
            damping_torque: damping,
            net_torque,
            angular_acceleration,
        };
        self.log_state(LogPhase::PostStep);
        self.step_index += 1;
        Ok(())
    }

    fn log_state(&mut self, phase: LogPhase) {
        if self.state_log.is_none() {
            return;
        }
        let record = StateRecord {
            timestamp: crate::state_log::unix_timestamp(),
            step: self.step_index,
            phase,
            state: self.state(),
            force_components: self.last.forces,
            angular_acceleration_deg: self.last.angular_acceleration,
        };
        if let Some(log) = self.state_log.as_mut() {
            log.append(&record);
        }
    }
}

fn required_lookup(table: &FoilTable, surface: FoilKind, alpha: i32) -> Result<FoilCoeffs, SimError> {
    table
        .lookup(alpha)
        .ok_or(SimError::FoilLookup { surface, alpha })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins;

    fn quiet_manager() -> Manager {
        let (config, foils) = builtins::dinghy();
        let mut env_config = builtins::steady_breeze_env();
        env_config.wind_min_speed = 0.0;
        env_config.wind_max_speed = 0.0;
        env_config.wind_gust_probability = 0.0;
        env_config.current_speed = 0.0;
        Manager::new(
            Boat::new(config, foils),
            Environment::with_seed(env_config, 0),
            SimOptions::default(),
        )
    }

    #[test]
    fn rejects_malformed_commands_before_mutating() {
        let mut manager = quiet_manager();
        let heading = manager.boat().heading_deg();
        assert_eq!(
            manager.step(&[1.0]),
            Err(SimError::InvalidCommand { len: 1 })
        );
        assert_eq!(
            manager.step(&[1.0, 2.0, 3.0]),
            Err(SimError::InvalidCommand { len: 3 })
        );
        assert_eq!(manager.step_index(), 0);
        assert_eq!(manager.boat().heading_deg(), heading);
        assert_eq!(manager.boat().sail_angle_deg(), 0);
    }

    #[test]
    fn commands_truncate_toward_zero() {
        let mut manager = quiet_manager();
        manager.step(&[-30.9, 4.7]).unwrap();
        // Sail magnitude survives side resolution; the rudder is stored as
        // commanded.
        assert_eq!(manager.boat().sail_angle_deg().abs(), 30);
        assert_eq!(manager.boat().rudder_angle_deg(), 4);
    }

    #[test]
    fn step_counter_is_monotonic() {
        let mut manager = quiet_manager();
        for expected in 1..=5u64 {
            manager.step(&[0.0, 0.0]).unwrap();
            assert_eq!(manager.step_index(), expected);
        }
    }
}
