//! Animation clip registry.
//!
//! This module provides an immutable lookup table from clip name to a playable
//! [`AnimationClip`] handle. It is built once at scene initialization from a
//! list of clip descriptors (typically a JSON manifest exported alongside the
//! character model) and is only read afterwards.
//!
//! The clip reserved as the neutral calibration pose (`TPose` by default) is
//! never registered, so it cannot be selected by the controller.
//!
//! # Manifest Format
//!
//! ```json
//! {
//!   "model": "models/Soldier.glb",
//!   "clips": [
//!     { "name": "Idle", "duration": 2.0 },
//!     { "name": "Walk", "duration": 1.1 },
//!     { "name": "Run", "duration": 0.7 },
//!     { "name": "TPose", "duration": 0.0, "looped": false }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::LibraryError;

/// Playable clip handle: the data the crossfader needs to drive a clock.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: Arc<str>,
    /// Clip length in seconds.
    pub duration: f32,
    /// Whether playback wraps around at the end.
    pub looped: bool,
}

impl AnimationClip {
    pub fn new(name: impl Into<Arc<str>>, duration: f32, looped: bool) -> Self {
        Self {
            name: name.into(),
            duration,
            looped,
        }
    }
}

fn default_looped() -> bool {
    true
}

/// A clip as listed in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipDescriptor {
    pub name: String,
    pub duration: f32,
    #[serde(default = "default_looped")]
    pub looped: bool,
}

impl ClipDescriptor {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            looped: true,
        }
    }
}

/// Clip manifest as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipManifest {
    /// Model file the clips belong to.
    #[serde(default)]
    pub model: Option<String>,
    pub clips: Vec<ClipDescriptor>,
}

/// Read-only table of clips keyed by name.
#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationLibrary {
    clips: FxHashMap<Arc<str>, AnimationClip>,
    model: Option<Arc<str>>,
}

impl AnimationLibrary {
    /// Build the table, skipping the clip named `reserved_pose`.
    ///
    /// Later descriptors replace earlier ones with the same name.
    pub fn from_clips(
        clips: impl IntoIterator<Item = ClipDescriptor>,
        reserved_pose: &str,
    ) -> Result<Self, LibraryError> {
        let mut table = FxHashMap::default();
        for descriptor in clips {
            if descriptor.name == reserved_pose {
                continue;
            }
            if !descriptor.duration.is_finite() || descriptor.duration < 0.0 {
                return Err(LibraryError::InvalidClip {
                    name: descriptor.name,
                    duration: descriptor.duration,
                });
            }
            let name: Arc<str> = Arc::from(descriptor.name.as_str());
            let clip = AnimationClip::new(name.clone(), descriptor.duration, descriptor.looped);
            if table.insert(name, clip).is_some() {
                warn!("Duplicate clip '{}' in manifest, keeping the last one", descriptor.name);
            }
        }
        Ok(Self {
            clips: table,
            model: None,
        })
    }

    /// Parse a JSON manifest.
    pub fn from_manifest_str(json: &str, reserved_pose: &str) -> Result<Self, LibraryError> {
        let manifest: ClipManifest = serde_json::from_str(json)?;
        let model = manifest.model.map(Arc::from);
        let mut library = Self::from_clips(manifest.clips, reserved_pose)?;
        library.model = model;
        Ok(library)
    }

    /// Read and parse a JSON manifest from disk.
    pub fn load_manifest(
        path: impl AsRef<Path>,
        reserved_pose: &str,
    ) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let library = Self::from_manifest_str(&json, reserved_pose)?;
        info!(
            "Loaded {} animation clip(s) from {:?}: {}",
            library.len(),
            path,
            library.names().join(", ")
        );
        Ok(library)
    }

    pub fn get(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Model file named by the manifest, if any.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Clip names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.clips.keys().map(|k| &**k).collect();
        names.sort_unstable();
        names
    }
}
