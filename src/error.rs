//! Error types shared by the controller, the animation library and the host.
//!
//! None of these abort a running session: systems log them and keep the last
//! good state. Only construction-time failures reach the caller.

use std::path::PathBuf;

use thiserror::Error;

use crate::components::animation::ActionName;

/// The clip configured for an action is not present in the
/// [`AnimationLibrary`](crate::resources::animationlibrary::AnimationLibrary).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no clip named '{clip}' for action {action}")]
pub struct MissingAnimationError {
    pub action: ActionName,
    pub clip: String,
}

/// Failures while building an animation library from a clip manifest.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("failed to read clip manifest {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse clip manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("clip '{name}' has invalid duration {duration}")]
    InvalidClip { name: String, duration: f32 },
}

/// Failures while constructing [`CharacterControls`](crate::controller::CharacterControls).
#[derive(Error, Debug)]
pub enum ControlsError {
    #[error("cannot start character controls: {0}")]
    MissingAnimation(#[from] MissingAnimationError),
}
