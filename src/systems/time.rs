//! Time update.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, clamping the host-provided delta.
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is the raw frame delta in seconds as measured by the host. It is
/// clamped into `[0, max_delta]` before anything else sees it.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let clamped = wt.clamp_delta(dt);
    if clamped != dt {
        debug!("Frame delta {} clamped to {}", dt, clamped);
    }
    wt.elapsed += clamped;
    wt.delta = clamped;
    wt.frame_count += 1;
}
