//! Camera reference shared with the render layer.
//!
//! The controller only reads the horizontal bearing from the camera to the
//! character. When camera follow is enabled it also translates the camera by
//! the character's displacement and re-aims it at the character, the way an
//! orbit camera keeps its subject centred.
use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector3;

/// Below this squared horizontal distance the camera is treated as directly
/// above the character and has no usable bearing.
const MIN_BEARING_DISTANCE_SQ: f32 = 1e-8;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vector3,
    pub target: Vector3,
}

impl CameraRig {
    pub fn new(position: Vector3, target: Vector3) -> Self {
        Self { position, target }
    }

    /// Horizontal bearing from the camera to `point`, as a yaw angle
    /// (0 = looking along +Z, positive toward +X).
    pub fn bearing_to(&self, point: Vector3) -> Option<f32> {
        let dx = point.x - self.position.x;
        let dz = point.z - self.position.z;
        if dx * dx + dz * dz < MIN_BEARING_DISTANCE_SQ {
            None
        } else {
            Some(dx.atan2(dz))
        }
    }
}
