//! Reporting of actions whose clip is not in the animation library.
//!
//! The action selector triggers a [`MissingAnimationEvent`] every frame it
//! wants an action it cannot play. The observer warns the first time a clip
//! is missing and drops to debug level afterwards so a held key does not
//! flood the log.
use crate::components::animation::ActionName;
use crate::error::MissingAnimationError;
use crate::resources::missinganimations::MissingAnimations;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, warn};

#[derive(Event, Debug, Clone)]
pub struct MissingAnimationEvent {
    pub action: ActionName,
    pub clip: String,
}

impl From<MissingAnimationError> for MissingAnimationEvent {
    fn from(err: MissingAnimationError) -> Self {
        Self {
            action: err.action,
            clip: err.clip,
        }
    }
}

/// Observer that logs missing clips, once loudly per clip.
pub fn missing_animation_observer(
    trigger: On<MissingAnimationEvent>,
    mut missing: ResMut<MissingAnimations>,
) {
    let event = trigger.event();
    if missing.record(&event.clip) {
        warn!(
            "Animation clip '{}' for {} not found, keeping the previous action",
            event.clip, event.action
        );
    } else {
        debug!("Animation clip '{}' for {} still missing", event.clip, event.action);
    }
}
