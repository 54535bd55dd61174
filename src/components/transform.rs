//! World transform of the character and yaw-angle helpers.
//!
//! Yaw is measured in radians about the +Y axis; yaw 0 faces +Z and positive
//! yaw turns toward +X, so the facing direction is `(sin yaw, 0, cos yaw)`.

use std::f32::consts::{PI, TAU};

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// Position and heading of an entity on the ground plane.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform3D {
    pub position: Vector3,
    /// Rotation about +Y in radians, kept in (-π, π].
    pub yaw: f32,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Transform3D {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3 { x, y, z },
            yaw: 0.0,
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = wrap_angle(yaw);
        self
    }

    /// Unit vector the entity is facing, on the horizontal plane.
    pub fn forward(&self) -> Vector3 {
        heading_vector(self.yaw)
    }
}

/// Horizontal unit vector for a yaw angle.
pub fn heading_vector(yaw: f32) -> Vector3 {
    Vector3 {
        x: yaw.sin(),
        y: 0.0,
        z: yaw.cos(),
    }
}

/// Wrap an angle into (-π, π].
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Signed angle to turn from `from` to reach `to` along the shorter arc.
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_wrap_angle_range() {
        assert!(approx_eq(wrap_angle(0.0), 0.0));
        assert!(approx_eq(wrap_angle(TAU + 0.5), 0.5));
        assert!(approx_eq(wrap_angle(-TAU - 0.5), -0.5));
        assert!(approx_eq(wrap_angle(3.0 * PI / 2.0), -FRAC_PI_2));
    }

    #[test]
    fn test_wrap_angle_maps_minus_pi_to_pi() {
        assert!(approx_eq(wrap_angle(-PI), PI));
        assert!(approx_eq(wrap_angle(PI), PI));
    }

    #[test]
    fn test_shortest_arc_crosses_boundary() {
        // 170° to -170° is a 20° turn through ±180°, not 340° back.
        let from = 170f32.to_radians();
        let to = (-170f32).to_radians();
        assert!(approx_eq(shortest_arc(from, to), 20f32.to_radians()));
        assert!(approx_eq(shortest_arc(to, from), (-20f32).to_radians()));
    }

    #[test]
    fn test_forward_follows_yaw() {
        let t = Transform3D::default();
        let f = t.forward();
        assert!(approx_eq(f.x, 0.0) && approx_eq(f.z, 1.0));

        let t = Transform3D::default().with_yaw(FRAC_PI_2);
        let f = t.forward();
        assert!(approx_eq(f.x, 1.0) && approx_eq(f.z, 0.0));
        assert!(approx_eq(f.y, 0.0));
    }
}
