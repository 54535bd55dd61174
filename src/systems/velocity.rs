//! Position integration.
//!
//! [`velocity_integrator`] advances a moving character along its *smoothed*
//! facing, not the raw desired heading, so the body visibly turns before it
//! commits to a new direction. Speed is `walk_speed`, multiplied by
//! `run_multiplier` while the run toggle is on and the selected action is
//! `Run`. A character whose selected action is still `Idle` (for example
//! because the walk clip is missing) does not move. There is no collision or
//! boundary clamping.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;

use crate::components::animation::{ActionName, ActionState};
use crate::components::character::Character;
use crate::components::movementintent::MovementIntent;
use crate::components::transform::Transform3D;
use crate::resources::motionconfig::MotionConfig;
use crate::resources::runtoggle::RunToggle;
use crate::resources::worldtime::WorldTime;

/// Distance covered this frame.
pub fn step_length(
    config: &MotionConfig,
    is_moving: bool,
    running: bool,
    action: ActionName,
    dt: f32,
) -> f32 {
    if !is_moving || action == ActionName::Idle {
        return 0.0;
    }
    let multiplier = if running && action == ActionName::Run {
        config.run_multiplier
    } else {
        1.0
    };
    config.walk_speed * multiplier * dt
}

pub fn velocity_integrator(
    mut query: Query<(&mut Transform3D, &mut MovementIntent, &ActionState), With<Character>>,
    config: Res<MotionConfig>,
    run_toggle: Res<RunToggle>,
    time: Res<WorldTime>,
) {
    for (mut transform, mut intent, state) in query.iter_mut() {
        let distance = step_length(
            &config,
            intent.is_moving,
            run_toggle.enabled,
            state.selected,
            time.delta,
        );
        let forward = transform.forward();
        let step = Vector3 {
            x: forward.x * distance,
            y: 0.0,
            z: forward.z * distance,
        };
        if distance > 0.0 {
            transform.position.x += step.x;
            transform.position.z += step.z;
        }
        intent.last_step = step;
    }
}
