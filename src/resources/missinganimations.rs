//! Registry of clips reported missing.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashSet;

/// Clips that were requested but are absent from the animation library.
///
/// Used to report each missing clip loudly once instead of every frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct MissingAnimations {
    reported: FxHashSet<Arc<str>>,
}

impl MissingAnimations {
    /// Remember `clip`; returns true the first time it is seen.
    pub fn record(&mut self, clip: &str) -> bool {
        if self.reported.contains(clip) {
            return false;
        }
        self.reported.insert(Arc::from(clip));
        true
    }

    pub fn contains(&self, clip: &str) -> bool {
        self.reported.contains(clip)
    }

    pub fn len(&self) -> usize {
        self.reported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }
}
