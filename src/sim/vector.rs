//! Vector and rotation helpers on top of glam

use glam::{Quat, Vec3};

use crate::deg_to_rad;

/// Rotation of `degrees` about `axis`
#[inline]
pub fn axis_rotation(axis: Vec3, degrees: f32) -> Quat {
    Quat::from_axis_angle(axis.normalize_or_zero(), deg_to_rad(degrees))
}

/// Unit vector an orientation is facing (local +Y)
#[inline]
pub fn forward(rot: Quat) -> Vec3 {
    rot * Vec3::Y
}

/// Shrink the magnitude of `v` by `amount` without flipping its direction
pub fn approach_zero(v: Vec3, amount: f32) -> Vec3 {
    let speed = v.length();
    if speed <= amount || speed == 0.0 {
        Vec3::ZERO
    } else {
        (v / speed) * (speed - amount)
    }
}

/// Rescale `v` so its magnitude does not exceed `max`
#[inline]
pub fn clamp_speed(v: Vec3, max: f32) -> Vec3 {
    v.clamp_length_max(max)
}

/// Direction perpendicular to `pos` in the XY plane (clockwise about +Z)
#[inline]
pub fn tangent(pos: Vec3) -> Vec3 {
    pos.normalize_or_zero().cross(Vec3::Z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_identity_is_up() {
        assert_eq!(forward(Quat::IDENTITY), Vec3::Y);
    }

    #[test]
    fn test_axis_rotation_quarter_turn() {
        let f = forward(axis_rotation(Vec3::Z, -90.0));
        assert!((f - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_approach_zero_never_overshoots() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        let slowed = approach_zero(v, 2.0);
        assert!((slowed.length() - 3.0).abs() < 1e-6);
        assert!(slowed.dot(v) > 0.0);
        assert_eq!(approach_zero(v, 10.0), Vec3::ZERO);
        assert_eq!(approach_zero(Vec3::ZERO, 1.0), Vec3::ZERO);
    }

    #[test]
    fn test_clamp_speed_preserves_direction() {
        let v = Vec3::new(300.0, 400.0, 0.0);
        let c = clamp_speed(v, 100.0);
        assert!((c.length() - 100.0).abs() < 1e-3);
        assert!((c.normalize() - v.normalize()).length() < 1e-6);
        assert_eq!(clamp_speed(Vec3::X, 100.0), Vec3::X);
    }

    #[test]
    fn test_tangent_of_origin_is_zero() {
        assert_eq!(tangent(Vec3::ZERO), Vec3::ZERO);
        let t = tangent(Vec3::new(10.0, 0.0, 0.0));
        assert!((t - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-6);
    }
}
