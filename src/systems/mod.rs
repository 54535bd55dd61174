//! Controller systems.
//!
//! Run once per frame, in this order, by
//! [`CharacterControls::update`](crate::controller::CharacterControls::update):
//!
//! 1. [`actionselector`] – pick Idle/Walk/Run from input and the run toggle
//! 2. [`crossfade`] – start/advance the crossfade toward the selected action
//! 3. [`movementresolver`] – combine direction keys and camera bearing
//! 4. [`orientation`] – turn toward the heading at a bounded rate
//! 5. [`velocity`] – move along the smoothed facing
//! 6. [`camerafollow`] – carry the camera along
//!
//! [`time`] clamps the frame delta before the schedule runs.

pub mod actionselector;
pub mod camerafollow;
pub mod crossfade;
pub mod movementresolver;
pub mod orientation;
pub mod time;
pub mod velocity;
