//! Ecowalk character controls library.
//!
//! This module exposes the controller's ECS components, resources, systems, and
//! events, plus the [`controller::CharacterControls`] facade the host drives
//! once per frame. It is also used by the integration tests.

pub mod components;
pub mod controller;
pub mod error;
pub mod events;
pub mod resources;
pub mod systems;
