//! Walk/run preference resource.

use bevy_ecs::prelude::Resource;

/// Sticky walk/run preference. Flipped by
/// [`SwitchRunEvent`](crate::events::switchrun::SwitchRunEvent); only has an
/// effect while the character is moving.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunToggle {
    pub enabled: bool,
}

impl RunToggle {
    pub fn switch(&mut self) {
        self.enabled = !self.enabled;
    }
}
