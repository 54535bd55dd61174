//! Animation playback and crossfade state for the character.
//!
//! The character plays one of three [`ActionName`]s. The decision of which one
//! is made by [`crate::systems::actionselector`] and stored in
//! [`ActionState::selected`]; the visual transition toward it is tracked by
//! [`BlendState`] and advanced by [`crate::systems::crossfade`].
//!
//! A blend is either `Steady` (one track at weight 1) or `Blending` (two tracks
//! whose weights always sum to 1, moving linearly over the fade duration).

use std::fmt;

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Component;

use crate::resources::animationlibrary::AnimationClip;

/// Slack when deciding a fade has run its course, so accumulated frame deltas
/// that land a hair short of the duration still finish on time.
const FADE_EPSILON: f32 = 1e-5;

/// Locomotion actions the controller can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionName {
    Idle,
    Walk,
    Run,
}

impl ActionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionName::Idle => "Idle",
            ActionName::Walk => "Walk",
            ActionName::Run => "Run",
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One playing action: the clip it uses and its own playback clock.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionTrack {
    pub action: ActionName,
    pub clip: AnimationClip,
    /// Seconds into the clip.
    pub time: f32,
}

impl ActionTrack {
    /// Start `clip` from time 0.
    pub fn new(action: ActionName, clip: AnimationClip) -> Self {
        Self {
            action,
            clip,
            time: 0.0,
        }
    }

    /// Advance the playback clock, wrapping for looped clips and holding the
    /// last frame otherwise.
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
        let duration = self.clip.duration;
        if duration <= 0.0 {
            self.time = 0.0;
        } else if self.clip.looped {
            self.time = self.time.rem_euclid(duration);
        } else {
            self.time = self.time.min(duration);
        }
    }
}

/// Influence of one action in the current pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionWeight {
    pub action: ActionName,
    pub weight: f32,
}

/// Crossfade state between the outgoing and incoming action.
#[derive(Debug, Clone, PartialEq)]
pub enum BlendState {
    /// A single action at full weight.
    Steady(ActionTrack),
    /// `from` fades from `from_start_weight` to 0 while `to` takes the
    /// complement, over the configured fade duration.
    Blending {
        from: ActionTrack,
        to: ActionTrack,
        from_start_weight: f32,
        elapsed: f32,
    },
}

impl BlendState {
    /// Action the blend is heading toward (the only one once steady).
    pub fn target(&self) -> ActionName {
        match self {
            BlendState::Steady(track) => track.action,
            BlendState::Blending { to, .. } => to.action,
        }
    }

    /// Action being faded out, if a transition is in flight.
    pub fn previous(&self) -> Option<ActionName> {
        match self {
            BlendState::Steady(_) => None,
            BlendState::Blending { from, .. } => Some(from.action),
        }
    }

    /// Seconds since the current transition began; 0 when steady.
    pub fn elapsed(&self) -> f32 {
        match self {
            BlendState::Steady(_) => 0.0,
            BlendState::Blending { elapsed, .. } => *elapsed,
        }
    }

    pub fn is_blending(&self) -> bool {
        matches!(self, BlendState::Blending { .. })
    }

    /// Track of `action` if it currently contributes to the pose.
    pub fn track(&self, action: ActionName) -> Option<&ActionTrack> {
        match self {
            BlendState::Steady(track) => (track.action == action).then_some(track),
            BlendState::Blending { from, to, .. } => {
                if to.action == action {
                    Some(to)
                } else if from.action == action {
                    Some(from)
                } else {
                    None
                }
            }
        }
    }

    fn fading_weight(from_start_weight: f32, elapsed: f32, fade_duration: f32) -> f32 {
        if fade_duration <= 0.0 {
            return 0.0;
        }
        let progress = (elapsed / fade_duration).clamp(0.0, 1.0);
        from_start_weight * (1.0 - progress)
    }

    /// Current weights, outgoing action first.
    pub fn weights(&self, fade_duration: f32) -> ArrayVec<ActionWeight, 2> {
        let mut weights = ArrayVec::new();
        match self {
            BlendState::Steady(track) => weights.push(ActionWeight {
                action: track.action,
                weight: 1.0,
            }),
            BlendState::Blending {
                from,
                to,
                from_start_weight,
                elapsed,
            } => {
                let from_weight = Self::fading_weight(*from_start_weight, *elapsed, fade_duration);
                weights.push(ActionWeight {
                    action: from.action,
                    weight: from_weight,
                });
                weights.push(ActionWeight {
                    action: to.action,
                    weight: 1.0 - from_weight,
                });
            }
        }
        weights
    }

    /// Weight of `action` in the current pose (0 if it does not contribute).
    pub fn weight_of(&self, action: ActionName, fade_duration: f32) -> f32 {
        self.weights(fade_duration)
            .iter()
            .filter(|w| w.action == action)
            .map(|w| w.weight)
            .sum()
    }

    /// Begin a transition toward `action`.
    ///
    /// Returns false, leaving the state untouched, when `action` is already
    /// the target. Mid-blend, the outgoing track is dropped and the in-flight
    /// target fades out from the weight it had reached. An action that was
    /// fading out keeps its playback clock when requested again, rather than
    /// restarting at time 0, and fades back in from the weight it still had,
    /// so reversing a transition never pops the pose.
    pub fn transition_to(
        &mut self,
        action: ActionName,
        clip: AnimationClip,
        fade_duration: f32,
    ) -> bool {
        if self.target() == action {
            return false;
        }
        let placeholder = BlendState::Steady(ActionTrack::new(action, clip.clone()));
        let current = std::mem::replace(self, placeholder);
        let (outgoing, outgoing_weight, incoming) = match current {
            BlendState::Steady(track) => (track, 1.0, ActionTrack::new(action, clip)),
            BlendState::Blending {
                from,
                to,
                from_start_weight,
                elapsed,
            } => {
                let to_weight =
                    1.0 - Self::fading_weight(from_start_weight, elapsed, fade_duration);
                let incoming = if from.action == action {
                    from
                } else {
                    ActionTrack::new(action, clip)
                };
                (to, to_weight, incoming)
            }
        };
        *self = if fade_duration <= 0.0 {
            BlendState::Steady(incoming)
        } else {
            BlendState::Blending {
                from: outgoing,
                to: incoming,
                from_start_weight: outgoing_weight,
                elapsed: 0.0,
            }
        };
        true
    }

    /// Advance every playing clock and the fade timer; collapse to `Steady`
    /// once the fade has run its full duration.
    pub fn advance(&mut self, dt: f32, fade_duration: f32) {
        let finished = match self {
            BlendState::Steady(track) => {
                track.advance(dt);
                false
            }
            BlendState::Blending {
                from, to, elapsed, ..
            } => {
                from.advance(dt);
                to.advance(dt);
                *elapsed += dt;
                *elapsed + FADE_EPSILON >= fade_duration
            }
        };
        if finished {
            if let BlendState::Blending { to, .. } = self {
                let to = to.clone();
                *self = BlendState::Steady(to);
            }
        }
    }
}

/// Per-character animation state: the action chosen by the selector and the
/// crossfade that realises it.
#[derive(Component, Debug, Clone)]
pub struct ActionState {
    pub selected: ActionName,
    pub blend: BlendState,
}

impl ActionState {
    /// Start steady on `action`.
    pub fn new(action: ActionName, clip: AnimationClip) -> Self {
        Self {
            selected: action,
            blend: BlendState::Steady(ActionTrack::new(action, clip)),
        }
    }

    /// Action currently being shown (or blended toward).
    pub fn active(&self) -> ActionName {
        self.blend.target()
    }
}
