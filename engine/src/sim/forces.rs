//! Pure force and torque terms used by the step routine.

use bevy_math::Vec2;

use crate::foil::FoilCoeffs;
use crate::math::vector_of;

/// Air density at sea level, kg/m³.
pub const AIR_RHO: f32 = 1.225;
/// Sea water density, kg/m³.
pub const SEA_WATER_RHO: f32 = 1029.0;

/// Magnitude cap for apparent wind/current, m/s.
pub(crate) const MAX_RELATIVE_SPEED: f32 = 50.0;
/// Hard physical bound on yaw acceleration, deg/s².
pub(crate) const MAX_ANGULAR_ACCEL: f32 = 720.0;
/// Fraction of the residual lateral sail force that leaks into leeway; the
/// hull absorbs the rest.
pub(crate) const SLIP_FORCE_COEFF: f32 = 0.25;

/// `½·ρ·V²·A·c`, with a ×10 stabilizing multiplier in air. Hydrodynamic
/// forces are naturally larger; only the aerodynamic branch is scaled so
/// sail forces stay numerically significant at small-boat scale.
pub(crate) fn fluid_force(rho: f32, speed: f32, area: f32, coeff: f32) -> f32 {
    let force_scale = if rho <= 10.0 { 10.0 } else { 1.0 };
    force_scale * 0.5 * rho * speed * speed * area * coeff
}

/// Total (drag + lift) force on a foil in an apparent flow.
///
/// Drag is colinear with the flow at `flow_angle_deg`; lift is perpendicular
/// to it, rotated by `lift_offset_deg` (±90, per-surface sign convention).
/// Coefficient signs are discarded: direction comes entirely from the flow
/// angle and the offset.
pub(crate) fn foil_force(
    rho: f32,
    speed: f32,
    area: f32,
    coeffs: FoilCoeffs,
    flow_angle_deg: f32,
    lift_offset_deg: f32,
) -> Vec2 {
    let drag = vector_of(
        fluid_force(rho, speed, area, coeffs.cd).abs(),
        flow_angle_deg.to_radians(),
    );
    let lift = vector_of(
        fluid_force(rho, speed, area, coeffs.cl).abs(),
        (flow_angle_deg + lift_offset_deg).to_radians(),
    );
    drag + lift
}

/// Torque opposing the current yaw rate, driven by the tangential flow the
/// rotation itself induces at the rudder's lever radius. Zero at zero rate.
pub(crate) fn damping_torque(
    angular_speed_deg_s: f32,
    lever_arm: f32,
    hull_area: f32,
    rotation_resistance: f32,
) -> f32 {
    let omega = angular_speed_deg_s.to_radians();
    if omega == 0.0 {
        return 0.0;
    }
    let tangential_speed = omega.abs() * lever_arm;
    let force = fluid_force(SEA_WATER_RHO, tangential_speed, hull_area, rotation_resistance);
    -omega.signum() * force * lever_arm
}
