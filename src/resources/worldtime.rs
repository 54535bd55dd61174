//! Frame timing resource.

use bevy_ecs::prelude::Resource;

/// Frame timing as seen by the controller's systems.
///
/// `delta` is the clamped delta for the current frame. Hosts may hand in
/// anything (zero, negative, or a multi-second gap after the window was
/// backgrounded); [`WorldTime::clamp_delta`] keeps it within
/// `[0, max_delta]`.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub max_delta: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            max_delta: 0.1,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Clamp a raw frame delta into `[0, max_delta]`; non-finite values become 0.
    pub fn clamp_delta(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            0.0
        } else {
            dt.min(self.max_delta)
        }
    }
}
