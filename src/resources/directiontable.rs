//! Direction-key combinations and their heading offsets.
//!
//! [`DirectionKeys`] captures which of the four direction keys are held and
//! reduces them to two axes, cancelling opposite keys. [`DirectionTable`]
//! maps each of the eight non-neutral axis combinations to a yaw offset that
//! is added to the camera bearing.
//!
//! Offsets are configuration, not derived at runtime. Defaults, in radians:
//!
//! | keys            | offset |
//! |-----------------|--------|
//! | forward         | 0      |
//! | forward + left  | π/4    |
//! | forward + right | -π/4   |
//! | left            | π/2    |
//! | right           | -π/2   |
//! | backward        | π      |
//! | backward + left | 3π/4   |
//! | backward + right| -3π/4  |

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use bevy_ecs::prelude::*;

use crate::resources::input::InputState;
use crate::resources::keybindings::{Direction, KeyBindings};

/// Which direction keys are held this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionKeys {
    pub fn from_input(input: &InputState, bindings: &KeyBindings) -> Self {
        Self {
            forward: bindings.is_active(Direction::Forward, input),
            backward: bindings.is_active(Direction::Backward, input),
            left: bindings.is_active(Direction::Left, input),
            right: bindings.is_active(Direction::Right, input),
        }
    }

    /// `(forward, side)` axis values in {-1, 0, 1}. Positive side is left.
    /// Opposite keys on the same axis cancel.
    pub fn axes(&self) -> (i8, i8) {
        let forward = self.forward as i8 - self.backward as i8;
        let side = self.left as i8 - self.right as i8;
        (forward, side)
    }

    /// True when at least one axis is non-zero after cancellation.
    pub fn is_moving(&self) -> bool {
        self.axes() != (0, 0)
    }
}

/// Yaw offsets for the eight movement combinations.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DirectionTable {
    pub forward: f32,
    pub forward_left: f32,
    pub forward_right: f32,
    pub left: f32,
    pub right: f32,
    pub backward: f32,
    pub backward_left: f32,
    pub backward_right: f32,
}

impl Default for DirectionTable {
    fn default() -> Self {
        Self {
            forward: 0.0,
            forward_left: FRAC_PI_4,
            forward_right: -FRAC_PI_4,
            left: FRAC_PI_2,
            right: -FRAC_PI_2,
            backward: PI,
            backward_left: FRAC_PI_4 + FRAC_PI_2,
            backward_right: -FRAC_PI_4 - FRAC_PI_2,
        }
    }
}

impl DirectionTable {
    /// Names of the entries as used in the `[directions]` config section.
    pub const ENTRY_NAMES: [&'static str; 8] = [
        "forward",
        "forward_left",
        "forward_right",
        "left",
        "right",
        "backward",
        "backward_left",
        "backward_right",
    ];

    /// Offset for the held keys, or `None` when they cancel out to no motion.
    pub fn offset(&self, keys: DirectionKeys) -> Option<f32> {
        match keys.axes() {
            (1, 0) => Some(self.forward),
            (1, 1) => Some(self.forward_left),
            (1, -1) => Some(self.forward_right),
            (0, 1) => Some(self.left),
            (0, -1) => Some(self.right),
            (-1, 0) => Some(self.backward),
            (-1, 1) => Some(self.backward_left),
            (-1, -1) => Some(self.backward_right),
            _ => None,
        }
    }

    pub fn entry(&self, name: &str) -> Option<f32> {
        match name {
            "forward" => Some(self.forward),
            "forward_left" => Some(self.forward_left),
            "forward_right" => Some(self.forward_right),
            "left" => Some(self.left),
            "right" => Some(self.right),
            "backward" => Some(self.backward),
            "backward_left" => Some(self.backward_left),
            "backward_right" => Some(self.backward_right),
            _ => None,
        }
    }

    /// Set an entry by config name. Returns false for unknown names.
    pub fn set_entry(&mut self, name: &str, radians: f32) -> bool {
        let slot = match name {
            "forward" => &mut self.forward,
            "forward_left" => &mut self.forward_left,
            "forward_right" => &mut self.forward_right,
            "left" => &mut self.left,
            "right" => &mut self.right,
            "backward" => &mut self.backward,
            "backward_left" => &mut self.backward_left,
            "backward_right" => &mut self.backward_right,
            _ => return false,
        };
        *slot = radians;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn keys(forward: bool, backward: bool, left: bool, right: bool) -> DirectionKeys {
        DirectionKeys {
            forward,
            backward,
            left,
            right,
        }
    }

    /// Expected offset for every one of the 16 key combinations.
    fn expected(k: DirectionKeys) -> Option<f32> {
        let table = DirectionTable::default();
        let f = k.forward && !k.backward;
        let b = k.backward && !k.forward;
        let l = k.left && !k.right;
        let r = k.right && !k.left;
        match (f, b, l, r) {
            (true, _, true, _) => Some(table.forward_left),
            (true, _, _, true) => Some(table.forward_right),
            (true, _, _, _) => Some(table.forward),
            (_, true, true, _) => Some(table.backward_left),
            (_, true, _, true) => Some(table.backward_right),
            (_, true, _, _) => Some(table.backward),
            (_, _, true, _) => Some(table.left),
            (_, _, _, true) => Some(table.right),
            _ => None,
        }
    }

    #[test]
    fn test_all_sixteen_combinations() {
        let table = DirectionTable::default();
        for mask in 0u8..16 {
            let k = keys(mask & 1 != 0, mask & 2 != 0, mask & 4 != 0, mask & 8 != 0);
            let got = table.offset(k);
            let want = expected(k);
            match (got, want) {
                (Some(g), Some(w)) => assert!((g - w).abs() < EPSILON, "mask {mask:04b}"),
                (None, None) => assert!(!k.is_moving(), "mask {mask:04b}"),
                _ => panic!("mask {mask:04b}: got {got:?}, want {want:?}"),
            }
            assert_eq!(got.is_some(), k.is_moving());
        }
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let table = DirectionTable::default();
        assert_eq!(table.offset(keys(true, true, false, false)), None);
        assert_eq!(table.offset(keys(false, false, true, true)), None);
        assert_eq!(table.offset(keys(true, true, true, true)), None);
        // forward+backward+left leaves only left
        assert_eq!(table.offset(keys(true, true, true, false)), Some(FRAC_PI_2));
    }

    #[test]
    fn test_default_offsets() {
        let table = DirectionTable::default();
        assert_eq!(table.offset(keys(true, false, false, false)), Some(0.0));
        assert_eq!(table.offset(keys(false, true, false, false)), Some(PI));
        assert_eq!(table.offset(keys(false, false, false, true)), Some(-FRAC_PI_2));
        let back_left = table.offset(keys(false, true, true, false)).unwrap();
        assert!((back_left - 3.0 * FRAC_PI_4).abs() < EPSILON);
    }

    #[test]
    fn test_from_input_uses_bindings() {
        let bindings = KeyBindings::default();
        let input = InputState::new().with_pressed("w").with_pressed("d").with_pressed("q");
        let k = DirectionKeys::from_input(&input, &bindings);
        assert_eq!(k, keys(true, false, false, true));
        assert_eq!(k.axes(), (1, -1));
    }

    #[test]
    fn test_set_entry() {
        let mut table = DirectionTable::default();
        assert!(table.set_entry("backward", -PI));
        assert_eq!(table.entry("backward"), Some(-PI));
        assert!(!table.set_entry("sideways", 1.0));
        assert_eq!(DirectionTable::ENTRY_NAMES.len(), 8);
    }
}
