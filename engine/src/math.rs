//! Angle-wrap-safe conversions between 2D vectors and polar form.
//!
//! Every force and torque computation in the engine goes through these
//! helpers; angle differences are wrapped per use-site into (-180, 180] or
//! [0, 360) so the 2π cut never produces a discontinuity.

use std::f32::consts::TAU;

pub use bevy_math::Vec2;

/// Angle of a 2D vector in radians, normalized into [0, 2π).
///
/// Trigonometric-circle convention: 0 = +X (east), π/2 = +Y (north).
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x).rem_euclid(TAU)
}

/// Vector of the given magnitude pointing along `angle_rad`. Inverse of
/// [`angle_of`]; pure and total for finite inputs.
#[inline]
pub fn vector_of(magnitude: f32, angle_rad: f32) -> Vec2 {
    magnitude * Vec2::new(angle_rad.cos(), angle_rad.sin())
}

/// Wrap an angle in degrees into (-180, 180].
#[inline]
pub fn wrap_signed_deg(deg: f32) -> f32 {
    let a = deg.rem_euclid(360.0);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// Wrap an angle in degrees into [0, 360).
#[inline]
pub fn wrap_deg(deg: f32) -> f32 {
    deg.rem_euclid(360.0)
}

/// Clamp an apparent (boat-relative) fluid velocity before it feeds a force
/// computation. Non-finite or zero-magnitude input collapses to zero; a
/// magnitude above `max_speed` is rescaled to it, direction preserved.
pub fn clamp_relative_velocity(v: Vec2, max_speed: f32) -> Vec2 {
    let speed = v.length();
    if !speed.is_finite() || speed == 0.0 {
        return Vec2::ZERO;
    }
    if speed > max_speed {
        v * (max_speed / speed)
    } else {
        v
    }
}

/// Replace non-finite components with zero, leaving finite ones untouched.
pub fn zero_non_finite(v: Vec2) -> Vec2 {
    Vec2::new(
        if v.x.is_finite() { v.x } else { 0.0 },
        if v.y.is_finite() { v.y } else { 0.0 },
    )
}
