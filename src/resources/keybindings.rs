//! Mapping from movement directions to key identifiers.
//!
//! Defaults use WASD for primary movement and the arrow keys as alternates.
use bevy_ecs::prelude::*;
use smallvec::{SmallVec, smallvec};

use crate::resources::input::InputState;

/// The four movement directions, relative to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];

    /// Key used for this direction in the `[keys]` section of the config file.
    pub fn config_key(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

type Keys = SmallVec<[String; 2]>;

/// Key identifiers bound to each direction. Any bound key being held activates
/// the direction.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub forward: Keys,
    pub backward: Keys,
    pub left: Keys,
    pub right: Keys,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: smallvec!["w".to_string(), "arrowup".to_string()],
            backward: smallvec!["s".to_string(), "arrowdown".to_string()],
            left: smallvec!["a".to_string(), "arrowleft".to_string()],
            right: smallvec!["d".to_string(), "arrowright".to_string()],
        }
    }
}

impl KeyBindings {
    pub fn keys(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    fn keys_mut(&mut self, direction: Direction) -> &mut Keys {
        match direction {
            Direction::Forward => &mut self.forward,
            Direction::Backward => &mut self.backward,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// Replace the keys bound to `direction`. Identifiers are lower-cased and
    /// blanks dropped; an empty list leaves the binding unchanged.
    pub fn rebind<'a>(&mut self, direction: Direction, keys: impl IntoIterator<Item = &'a str>) {
        let keys: Keys = keys
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if !keys.is_empty() {
            *self.keys_mut(direction) = keys;
        }
    }

    /// Whether any key bound to `direction` is held.
    pub fn is_active(&self, direction: Direction, input: &InputState) -> bool {
        self.keys(direction).iter().any(|key| input.is_pressed(key))
    }
}
