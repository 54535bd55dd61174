//! Animation crossfade.
//!
//! [`animation_crossfader`] turns the selector's decision into a smooth
//! visual transition. When the selected action differs from what the blend is
//! heading toward, a linear fade of `fade_duration` seconds starts (see
//! [`BlendState::transition_to`](crate::components::animation::BlendState::transition_to)),
//! then every playing clock and the fade timer are advanced by the frame
//! delta.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::animation::ActionState;
use crate::components::character::Character;
use crate::resources::animationlibrary::AnimationLibrary;
use crate::resources::motionconfig::MotionConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::actionselector::resolve_clip;

/// Start transitions toward newly selected actions and advance playback.
pub fn animation_crossfader(
    mut query: Query<&mut ActionState, With<Character>>,
    library: Res<AnimationLibrary>,
    config: Res<MotionConfig>,
    time: Res<WorldTime>,
) {
    for mut state in query.iter_mut() {
        let selected = state.selected;
        if state.blend.target() != selected {
            match resolve_clip(&library, &config, selected) {
                Ok(clip) => {
                    let from = state.blend.target();
                    state
                        .blend
                        .transition_to(selected, clip.clone(), config.fade_duration);
                    debug!(
                        "Crossfading {} -> {} over {}s",
                        from, selected, config.fade_duration
                    );
                }
                Err(err) => {
                    // The selector only stores actions it could resolve.
                    warn!("{}", err);
                    state.selected = state.blend.target();
                }
            }
        }
        state.blend.advance(time.delta, config.fade_duration);
    }
}
