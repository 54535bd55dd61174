//! ECS components attached to the character entity.
//!
//! Submodules overview:
//! - [`animation`] – selected action, playback clocks and crossfade state
//! - [`character`] – marker for the steered character and its model key
//! - [`movementintent`] – resolved heading and moving flag for the frame
//! - [`transform`] – world position and yaw, plus angle-wrapping helpers

pub mod animation;
pub mod character;
pub mod movementintent;
pub mod transform;
