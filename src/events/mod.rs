//! Event types and observers used by the controller.
//!
//! Submodules:
//! - [`missinganimation`] – an action was selected whose clip is not loaded
//! - [`switchrun`] – flip the sticky walk/run preference
pub mod missinganimation;
pub mod switchrun;
