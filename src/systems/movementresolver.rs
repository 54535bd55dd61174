//! Movement resolution.
//!
//! [`movement_resolver`] combines the held direction keys with the camera
//! bearing into the heading the character should turn toward:
//! `heading = wrap(bearing + offset)`, where the offset comes from the
//! [`DirectionTable`]. Cancelling combinations (no keys, forward+backward,
//! left+right, all four) leave the character not moving.

use bevy_ecs::prelude::*;

use crate::components::character::Character;
use crate::components::movementintent::MovementIntent;
use crate::components::transform::{Transform3D, wrap_angle};
use crate::resources::camerarig::CameraRig;
use crate::resources::directiontable::{DirectionKeys, DirectionTable};
use crate::resources::input::InputState;
use crate::resources::keybindings::KeyBindings;

/// Desired heading for a bearing and a set of held keys, or `None` when the
/// keys do not produce movement.
pub fn resolve_heading(table: &DirectionTable, keys: DirectionKeys, bearing: f32) -> Option<f32> {
    table.offset(keys).map(|offset| wrap_angle(bearing + offset))
}

/// Update each character's [`MovementIntent`] from input and camera.
pub fn movement_resolver(
    mut query: Query<(&Transform3D, &mut MovementIntent), With<Character>>,
    input: Res<InputState>,
    bindings: Res<KeyBindings>,
    table: Res<DirectionTable>,
    camera: Res<CameraRig>,
) {
    let keys = DirectionKeys::from_input(&input, &bindings);

    for (transform, mut intent) in query.iter_mut() {
        if let Some(bearing) = camera.bearing_to(transform.position) {
            intent.bearing = bearing;
        }
        match resolve_heading(&table, keys, intent.bearing) {
            Some(heading) => {
                intent.heading = heading;
                intent.is_moving = true;
            }
            None => intent.is_moving = false,
        }
    }
}
