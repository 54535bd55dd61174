//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the controller's
//! world: input state, timing, configuration, the camera reference and the
//! animation library. Each submodule documents the semantics and intended
//! usage of its resource(s).
//!
//! Overview
//! - `animationlibrary` – read-only clip table built from the clip manifest
//! - `camerarig` – camera position/target and bearing computation
//! - `directiontable` – key combinations and their heading offsets
//! - `input` – per-frame keyboard state keyed by identifier
//! - `keybindings` – which identifiers steer in which direction
//! - `missinganimations` – clips already reported as missing
//! - `motionconfig` – INI-backed locomotion tunables
//! - `runtoggle` – sticky walk/run preference
//! - `worldtime` – clamped frame delta and elapsed time
pub mod animationlibrary;
pub mod camerarig;
pub mod directiontable;
pub mod input;
pub mod keybindings;
pub mod missinganimations;
pub mod motionconfig;
pub mod runtoggle;
pub mod worldtime;
