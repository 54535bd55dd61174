//! Orientation smoothing.
//!
//! [`orientation_smoother`] turns the character toward its desired heading at
//! no more than `turn_rate` radians per second, always along the shorter arc
//! so that crossing the ±π seam never spins the long way round. While the
//! character is not moving its yaw is left alone.

use bevy_ecs::prelude::*;

use crate::components::character::Character;
use crate::components::movementintent::MovementIntent;
use crate::components::transform::{Transform3D, shortest_arc, wrap_angle};
use crate::resources::motionconfig::MotionConfig;
use crate::resources::worldtime::WorldTime;

/// Rotate `current` toward `target` by at most `max_step` radians.
pub fn rotate_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let arc = shortest_arc(current, target);
    if arc.abs() <= max_step {
        wrap_angle(target)
    } else {
        wrap_angle(current + max_step.copysign(arc))
    }
}

pub fn orientation_smoother(
    mut query: Query<(&mut Transform3D, &MovementIntent), With<Character>>,
    config: Res<MotionConfig>,
    time: Res<WorldTime>,
) {
    let max_step = config.turn_rate * time.delta;
    for (mut transform, intent) in query.iter_mut() {
        if !intent.is_moving {
            continue;
        }
        transform.yaw = rotate_towards(transform.yaw, intent.heading, max_step);
    }
}
