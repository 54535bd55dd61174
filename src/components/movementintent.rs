//! Per-frame movement intent of the character.
//!
//! Holds what the resolver decided (heading and moving flag) and what the
//! integrator did with it, so later systems in the frame can react.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// Where the character wants to go this frame.
///
/// Written by [`crate::systems::movementresolver`]; read by the orientation,
/// velocity and camera-follow systems.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MovementIntent {
    /// Desired yaw: camera bearing plus the direction-key offset.
    pub heading: f32,
    /// At least one non-cancelling direction key is held.
    pub is_moving: bool,
    /// Last horizontal bearing from camera to character. Kept when the camera
    /// is directly overhead and no bearing can be measured.
    pub bearing: f32,
    /// Displacement applied by the velocity integrator this frame.
    pub last_step: Vector3,
}

impl MovementIntent {
    pub fn new(bearing: f32) -> Self {
        Self {
            heading: bearing,
            is_moving: false,
            bearing,
            last_step: Vector3 {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
        }
    }
}
