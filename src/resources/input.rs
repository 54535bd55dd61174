//! Per-frame keyboard input resource.
//!
//! The host captures keyboard state however it likes and hands the controller
//! an [`InputState`]: a map from key identifier to pressed flag. Identifiers
//! are lower-cased on insertion (`"W"` and `"w"` are the same key). Which
//! identifiers steer the character is decided by
//! [`KeyBindings`](crate::resources::keybindings::KeyBindings); anything else
//! in the map is ignored.
use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

/// Resource capturing which keys are held this frame.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct InputState {
    keys: FxHashMap<String, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state of `key`.
    pub fn set_key(&mut self, key: &str, pressed: bool) {
        let key = key.to_lowercase();
        if let Some(state) = self.keys.get_mut(&key) {
            *state = pressed;
        } else {
            self.keys.insert(key, pressed);
        }
    }

    pub fn press(&mut self, key: &str) {
        self.set_key(key, true);
    }

    pub fn release(&mut self, key: &str) {
        self.set_key(key, false);
    }

    /// Builder form of [`press`](Self::press).
    pub fn with_pressed(mut self, key: &str) -> Self {
        self.press(key);
        self
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        match self.keys.get(key) {
            Some(pressed) => *pressed,
            None => self.keys.get(&key.to_lowercase()).copied().unwrap_or(false),
        }
    }

    /// Release every key.
    pub fn clear(&mut self) {
        self.keys.values_mut().for_each(|pressed| *pressed = false);
    }

    /// Keys currently held, in no particular order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(|(_, pressed)| **pressed)
            .map(|(key, _)| key.as_str())
    }
}
