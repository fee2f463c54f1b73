use bevy_math::Vec2;
use serde::Serialize;

/// Which side of the hull the sail is let out to.
///
/// Replaces a raw ±1 sign: there is no zero to mis-handle, and the resolved
/// side survives ticks where the commanded magnitude is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SailSide {
    Port,
    Starboard,
}

impl SailSide {
    /// Sign the effective sail angle inherits: starboard positive, port
    /// negative.
    pub fn sign(self) -> i32 {
        match self {
            SailSide::Starboard => 1,
            SailSide::Port => -1,
        }
    }
}

impl Default for SailSide {
    fn default() -> Self {
        SailSide::Starboard
    }
}

/// Per-surface force contributions from the latest step, Newtons.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ForceBreakdown {
    pub sail: Vec2,
    pub hull: Vec2,
    pub keel: Vec2,
    pub total: Vec2,
}

/// Diagnostic telemetry for the most recent step. Recomputed every tick;
/// never part of the physical state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepDebug {
    pub apparent_wind: Vec2,
    pub apparent_wind_speed: f32,
    /// Apparent wind relative to the heading, degrees in (-180, 180];
    /// positive means wind from starboard.
    pub apparent_wind_direction: f32,
    pub sail_side: SailSide,
    /// Sail angle after side resolution, degrees relative to heading.
    pub effective_sail_angle: i32,
    /// Sail angle of attack used for the table lookup.
    pub sail_alpha: i32,
    pub apparent_current: Vec2,
    pub rudder_alpha: i32,
    /// Keel angle of attack, when the keel path ran this tick.
    pub keel_alpha: Option<i32>,
    pub forces: ForceBreakdown,
    pub rudder_torque: f32,
    pub keel_torque: f32,
    pub damping_torque: f32,
    pub net_torque: f32,
    /// Clamped yaw acceleration applied this tick, deg/s².
    pub angular_acceleration: f32,
}

/// Full simulation snapshot for visualization and logging.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FullState {
    pub wind: Vec2,
    pub current: Vec2,
    /// Degrees in [0, 360).
    pub heading: f32,
    pub velocity: Vec2,
    /// Direction of travel, degrees in [0, 360).
    pub velocity_direction: f32,
    pub position: Vec2,
    pub sail_angle: i32,
    pub rudder_angle: i32,
}

/// Reduced view for navigation/control algorithms. Apparent-wind fields are
/// cached from the most recent step, not recomputed.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AgentState {
    pub heading: f32,
    /// Apparent wind speed, m/s.
    pub wind_speed: f32,
    /// Apparent wind relative to the heading, degrees in (-180, 180].
    pub wind_direction: f32,
    pub position: Vec2,
}
