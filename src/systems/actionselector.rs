//! Locomotion action selection.
//!
//! [`action_selector`] is the decision layer of the animation state machine:
//!
//! | moving | run toggle | action |
//! |--------|------------|--------|
//! | no     | any        | Idle   |
//! | yes    | off        | Walk   |
//! | yes    | on         | Run    |
//!
//! Transitions are instantaneous here; [`crate::systems::crossfade`] smooths
//! them visually. An action whose clip is missing from the
//! [`AnimationLibrary`] is refused and the previous action is kept.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::{ActionName, ActionState};
use crate::components::character::Character;
use crate::error::MissingAnimationError;
use crate::events::missinganimation::MissingAnimationEvent;
use crate::resources::animationlibrary::{AnimationClip, AnimationLibrary};
use crate::resources::directiontable::DirectionKeys;
use crate::resources::input::InputState;
use crate::resources::keybindings::KeyBindings;
use crate::resources::motionconfig::MotionConfig;
use crate::resources::runtoggle::RunToggle;

/// Transition function of the Idle/Walk/Run state machine.
pub fn select_action(is_moving: bool, run_toggle: bool) -> ActionName {
    match (is_moving, run_toggle) {
        (false, _) => ActionName::Idle,
        (true, false) => ActionName::Walk,
        (true, true) => ActionName::Run,
    }
}

/// Look up the clip configured for `action`.
pub fn resolve_clip<'a>(
    library: &'a AnimationLibrary,
    config: &MotionConfig,
    action: ActionName,
) -> Result<&'a AnimationClip, MissingAnimationError> {
    let clip = config.clip_name(action);
    library.get(clip).ok_or_else(|| MissingAnimationError {
        action,
        clip: clip.to_string(),
    })
}

/// Choose the character's action from the held direction keys and the run
/// toggle.
///
/// Contract
/// - Reads [`InputState`] through [`KeyBindings`] to decide whether the
///   character is moving (opposite keys cancel).
/// - Writes [`ActionState::selected`] when the new action has a clip.
/// - Triggers [`MissingAnimationEvent`] and keeps the old action otherwise.
pub fn action_selector(
    mut query: Query<&mut ActionState, With<Character>>,
    input: Res<InputState>,
    bindings: Res<KeyBindings>,
    run_toggle: Res<RunToggle>,
    library: Res<AnimationLibrary>,
    config: Res<MotionConfig>,
    mut commands: Commands,
) {
    let is_moving = DirectionKeys::from_input(&input, &bindings).is_moving();
    let wanted = select_action(is_moving, run_toggle.enabled);

    for mut state in query.iter_mut() {
        if state.selected == wanted {
            continue;
        }
        match resolve_clip(&library, &config, wanted) {
            Ok(_) => {
                debug!("Action {} -> {}", state.selected, wanted);
                state.selected = wanted;
            }
            Err(err) => commands.trigger(MissingAnimationEvent::from(err)),
        }
    }
}
