//! Character marker component.

use std::sync::Arc;

use bevy_ecs::prelude::Component;

/// Marker for the player-steered character.
///
/// Carries the key of the animated model so the render layer knows what to
/// draw at the character's [`Transform3D`](super::transform::Transform3D).
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Character {
    pub model_key: Arc<str>,
}

impl Character {
    pub fn new(model_key: impl Into<Arc<str>>) -> Self {
        Self {
            model_key: model_key.into(),
        }
    }
}
