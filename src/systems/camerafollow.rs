//! Camera follow.
//!
//! Translates the [`CameraRig`] by the character's displacement for the
//! frame and points it at the character, so an orbiting camera keeps its
//! distance and the bearing the character is steered by stays stable.

use bevy_ecs::prelude::*;

use crate::components::character::Character;
use crate::components::movementintent::MovementIntent;
use crate::components::transform::Transform3D;
use crate::resources::camerarig::CameraRig;
use crate::resources::motionconfig::MotionConfig;

pub fn camera_follow(
    query: Query<(&Transform3D, &MovementIntent), With<Character>>,
    mut camera: ResMut<CameraRig>,
    config: Res<MotionConfig>,
) {
    if !config.camera_follow {
        return;
    }
    for (transform, intent) in query.iter() {
        camera.position.x += intent.last_step.x;
        camera.position.z += intent.last_step.z;
        camera.target = transform.position;
    }
}
