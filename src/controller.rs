//! Character controls: the host-facing entry point.
//!
//! [`CharacterControls`] owns a private ECS world holding the character
//! entity, its configuration, the camera reference and the animation library,
//! plus a chained schedule of the locomotion systems. The host calls
//! [`update`](CharacterControls::update) once per rendered frame and reads the
//! resulting transform, blend weights and camera back afterwards.
//!
//! # Example
//!
//! ```no_run
//! use ecowalk::controller::CharacterControls;
//! use ecowalk::resources::animationlibrary::{AnimationLibrary, ClipDescriptor};
//! use ecowalk::resources::camerarig::CameraRig;
//! use ecowalk::resources::input::InputState;
//! use ecowalk::resources::motionconfig::MotionConfig;
//! use raylib::prelude::Vector3;
//!
//! let library = AnimationLibrary::from_clips(
//!     vec![
//!         ClipDescriptor::new("Idle", 2.0),
//!         ClipDescriptor::new("Walk", 1.0),
//!         ClipDescriptor::new("Run", 0.7),
//!     ],
//!     "TPose",
//! )
//! .unwrap();
//! let origin = Vector3 { x: 0.0, y: 0.0, z: 0.0 };
//! let camera = CameraRig::new(Vector3 { x: 0.0, y: 5.0, z: -5.0 }, origin);
//! let mut controls =
//!     CharacterControls::new(MotionConfig::new(), library, camera, Default::default()).unwrap();
//!
//! let input = InputState::new().with_pressed("w");
//! controls.update(1.0 / 60.0, &input);
//! let position = controls.current_position();
//! ```

use arrayvec::ArrayVec;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::Vector3;

use crate::components::animation::{ActionName, ActionState, ActionWeight, BlendState};
use crate::components::character::Character;
use crate::components::movementintent::MovementIntent;
use crate::components::transform::Transform3D;
use crate::error::ControlsError;
use crate::events::missinganimation::missing_animation_observer;
use crate::events::switchrun::{SwitchRunEvent, switch_run_observer};
use crate::resources::animationlibrary::AnimationLibrary;
use crate::resources::camerarig::CameraRig;
use crate::resources::input::InputState;
use crate::resources::missinganimations::MissingAnimations;
use crate::resources::motionconfig::MotionConfig;
use crate::resources::runtoggle::RunToggle;
use crate::resources::worldtime::WorldTime;
use crate::systems::actionselector::{action_selector, resolve_clip};
use crate::systems::camerafollow::camera_follow;
use crate::systems::crossfade::animation_crossfader;
use crate::systems::movementresolver::movement_resolver;
use crate::systems::orientation::orientation_smoother;
use crate::systems::time::update_world_time;
use crate::systems::velocity::velocity_integrator;

const DEFAULT_MODEL_KEY: &str = "character";

/// Locomotion and animation controller for the single player character.
pub struct CharacterControls {
    world: World,
    schedule: Schedule,
    character: Entity,
}

impl CharacterControls {
    /// Build the controller, starting Idle at `start`.
    ///
    /// Fails if the library has no clip for the Idle action; every later
    /// missing clip is handled at runtime by keeping the previous action.
    pub fn new(
        config: MotionConfig,
        library: AnimationLibrary,
        camera: CameraRig,
        start: Transform3D,
    ) -> Result<Self, ControlsError> {
        let idle_clip = resolve_clip(&library, &config, ActionName::Idle)?.clone();
        let model_key = library.model().unwrap_or(DEFAULT_MODEL_KEY).to_string();
        let bearing = camera.bearing_to(start.position).unwrap_or(start.yaw);

        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_max_delta(config.max_frame_delta));
        world.insert_resource(InputState::default());
        world.insert_resource(RunToggle::default());
        world.insert_resource(MissingAnimations::default());
        world.insert_resource(config.bindings.clone());
        world.insert_resource(config.directions);
        world.insert_resource(camera);
        world.insert_resource(library);

        info!(
            "Character controls ready: model '{}', walk {} u/s, run {} u/s, fade {}s",
            model_key,
            config.walk_speed,
            config.run_speed(),
            config.fade_duration
        );
        world.insert_resource(config);

        world.spawn(Observer::new(switch_run_observer));
        world.spawn(Observer::new(missing_animation_observer));
        // Ensure the observers are registered before any system triggers events.
        world.flush();

        let character = world
            .spawn((
                Character::new(model_key),
                start,
                MovementIntent::new(bearing),
                ActionState::new(ActionName::Idle, idle_clip),
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                action_selector,
                animation_crossfader,
                movement_resolver,
                orientation_smoother,
                velocity_integrator,
                camera_follow,
            )
                .chain(),
        );

        Ok(Self {
            world,
            schedule,
            character,
        })
    }

    /// Advance the controller by one frame.
    ///
    /// `delta` is the raw frame time in seconds; it is clamped to the
    /// configured maximum. Must be called exactly once per rendered frame.
    pub fn update(&mut self, delta: f32, input: &InputState) {
        self.world.resource_mut::<InputState>().clone_from(input);
        update_world_time(&mut self.world, delta);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// Flip the walk/run preference. Takes effect on the next
    /// [`update`](Self::update).
    pub fn switch_run_toggle(&mut self) {
        self.world.trigger(SwitchRunEvent {});
    }

    pub fn run_toggle(&self) -> bool {
        self.world.resource::<RunToggle>().enabled
    }

    /// Character position as of the most recent update.
    pub fn current_position(&self) -> Vector3 {
        self.transform().position
    }

    /// Character yaw in radians.
    pub fn facing(&self) -> f32 {
        self.transform().yaw
    }

    pub fn transform(&self) -> Transform3D {
        self.world
            .get::<Transform3D>(self.character)
            .copied()
            .unwrap_or_default()
    }

    /// Action the animation is showing or blending toward.
    pub fn active_action(&self) -> ActionName {
        self.action_state()
            .map(ActionState::active)
            .unwrap_or(ActionName::Idle)
    }

    /// Action chosen by the selector this frame.
    pub fn selected_action(&self) -> ActionName {
        self.action_state()
            .map(|state| state.selected)
            .unwrap_or(ActionName::Idle)
    }

    pub fn blend(&self) -> Option<&BlendState> {
        self.action_state().map(|state| &state.blend)
    }

    /// Per-action weights of the current pose, outgoing action first.
    pub fn blend_weights(&self) -> ArrayVec<ActionWeight, 2> {
        let fade = self.config().fade_duration;
        self.blend()
            .map(|blend| blend.weights(fade))
            .unwrap_or_default()
    }

    /// Weight of a single action in the current pose.
    pub fn weight_of(&self, action: ActionName) -> f32 {
        let fade = self.config().fade_duration;
        self.blend()
            .map(|blend| blend.weight_of(action, fade))
            .unwrap_or(0.0)
    }

    pub fn movement(&self) -> Option<MovementIntent> {
        self.world.get::<MovementIntent>(self.character).copied()
    }

    pub fn is_moving(&self) -> bool {
        self.movement().is_some_and(|intent| intent.is_moving)
    }

    pub fn camera(&self) -> CameraRig {
        *self.world.resource::<CameraRig>()
    }

    /// Move the camera, e.g. after the host's orbit controls changed it.
    pub fn set_camera_position(&mut self, position: Vector3) {
        self.world.resource_mut::<CameraRig>().position = position;
    }

    pub fn config(&self) -> &MotionConfig {
        self.world.resource::<MotionConfig>()
    }

    /// Clips requested so far that the library does not have.
    pub fn missing_animations(&self) -> &MissingAnimations {
        self.world.resource::<MissingAnimations>()
    }

    /// Model key of the character, for the render layer.
    pub fn model_key(&self) -> &str {
        self.world
            .get::<Character>(self.character)
            .map(|c| &*c.model_key)
            .unwrap_or(DEFAULT_MODEL_KEY)
    }

    /// Timing of the last update (clamped delta, elapsed, frame count).
    pub fn time(&self) -> WorldTime {
        *self.world.resource::<WorldTime>()
    }

    fn action_state(&self) -> Option<&ActionState> {
        self.world.get::<ActionState>(self.character)
    }
}
