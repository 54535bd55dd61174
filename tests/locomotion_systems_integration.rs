//! Locomotion system tests on a hand-built `World`, one system at a time.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;

use ecowalk::components::animation::{ActionName, ActionState};
use ecowalk::components::character::Character;
use ecowalk::components::movementintent::MovementIntent;
use ecowalk::components::transform::Transform3D;
use ecowalk::events::missinganimation::missing_animation_observer;
use ecowalk::events::switchrun::{SwitchRunEvent, switch_run_observer};
use ecowalk::resources::animationlibrary::{AnimationLibrary, ClipDescriptor};
use ecowalk::resources::camerarig::CameraRig;
use ecowalk::resources::directiontable::DirectionTable;
use ecowalk::resources::input::InputState;
use ecowalk::resources::keybindings::{Direction, KeyBindings};
use ecowalk::resources::missinganimations::MissingAnimations;
use ecowalk::resources::motionconfig::MotionConfig;
use ecowalk::resources::runtoggle::RunToggle;
use ecowalk::resources::worldtime::WorldTime;
use ecowalk::systems::actionselector::action_selector;
use ecowalk::systems::camerafollow::camera_follow;
use ecowalk::systems::crossfade::animation_crossfader;
use ecowalk::systems::movementresolver::movement_resolver;
use ecowalk::systems::orientation::orientation_smoother;
use ecowalk::systems::time::update_world_time;
use ecowalk::systems::velocity::velocity_integrator;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn library(names: &[&str]) -> AnimationLibrary {
    AnimationLibrary::from_clips(names.iter().map(|n| ClipDescriptor::new(*n, 1.0)), "TPose")
        .unwrap()
}

fn make_world(delta: f32) -> World {
    let config = MotionConfig::new();
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        max_delta: config.max_frame_delta,
        frame_count: 0,
    });
    world.insert_resource(InputState::default());
    world.insert_resource(RunToggle::default());
    world.insert_resource(MissingAnimations::default());
    world.insert_resource(config.bindings.clone());
    world.insert_resource(config.directions);
    world.insert_resource(CameraRig::new(
        Vector3 {
            x: 0.0,
            y: 5.0,
            z: -5.0,
        },
        Vector3 {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        },
    ));
    world.insert_resource(library(&["Idle", "Walk", "Run"]));
    world.insert_resource(config);
    world
}

fn spawn_character(world: &mut World, transform: Transform3D) -> Entity {
    let idle = world
        .resource::<AnimationLibrary>()
        .get("Idle")
        .unwrap()
        .clone();
    world
        .spawn((
            Character::new("soldier"),
            transform,
            MovementIntent::new(0.0),
            ActionState::new(ActionName::Idle, idle),
        ))
        .id()
}

fn press(world: &mut World, keys: &[&str]) {
    let mut input = world.resource_mut::<InputState>();
    input.clear();
    for key in keys {
        input.press(key);
    }
}

fn tick_selector(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((action_selector, animation_crossfader).chain());
    schedule.run(world);
}

fn tick_movement(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            action_selector,
            movement_resolver,
            orientation_smoother,
            velocity_integrator,
            camera_follow,
        )
            .chain(),
    );
    schedule.run(world);
}

#[test]
fn selector_picks_walk_then_run() {
    let mut world = make_world(0.1);
    let entity = spawn_character(&mut world, Transform3D::default());

    press(&mut world, &["w"]);
    tick_selector(&mut world);
    assert_eq!(world.get::<ActionState>(entity).unwrap().selected, ActionName::Walk);

    world.resource_mut::<RunToggle>().switch();
    tick_selector(&mut world);
    let state = world.get::<ActionState>(entity).unwrap();
    assert_eq!(state.selected, ActionName::Run);
    assert_eq!(state.active(), ActionName::Run);
}

#[test]
fn selector_reports_missing_clip_through_observer() {
    let mut world = make_world(0.1);
    world.insert_resource(library(&["Idle", "Walk"]));
    world.spawn(Observer::new(missing_animation_observer));
    world.flush();
    let entity = spawn_character(&mut world, Transform3D::default());

    world.resource_mut::<RunToggle>().enabled = true;
    press(&mut world, &["w"]);
    tick_selector(&mut world);

    let state = world.get::<ActionState>(entity).unwrap();
    assert_eq!(state.selected, ActionName::Idle);
    assert_eq!(state.active(), ActionName::Idle);
    assert!(world.resource::<MissingAnimations>().contains("Run"));
}

#[test]
fn switch_run_event_flips_toggle() {
    let mut world = make_world(0.1);
    world.spawn(Observer::new(switch_run_observer));
    world.flush();

    world.trigger(SwitchRunEvent {});
    assert!(world.resource::<RunToggle>().enabled);
    world.trigger(SwitchRunEvent {});
    assert!(!world.resource::<RunToggle>().enabled);
}

#[test]
fn crossfade_retarget_mid_blend_keeps_weights_continuous() {
    let mut world = make_world(0.05);
    let entity = spawn_character(&mut world, Transform3D::default());
    let fade = world.resource::<MotionConfig>().fade_duration;

    // Idle -> Walk, halfway through the fade.
    press(&mut world, &["w"]);
    tick_selector(&mut world);
    tick_selector(&mut world);
    let walk_weight = world
        .get::<ActionState>(entity)
        .unwrap()
        .blend
        .weight_of(ActionName::Walk, fade);
    assert!(approx_eq(walk_weight, 0.5));

    // Walk -> Run before the first fade completes.
    world.resource_mut::<RunToggle>().enabled = true;
    tick_selector(&mut world);
    let blend = &world.get::<ActionState>(entity).unwrap().blend;
    assert_eq!(blend.previous(), Some(ActionName::Walk));
    assert_eq!(blend.target(), ActionName::Run);
    // Walk fades out from the 0.5 it had reached.
    assert!(approx_eq(blend.weight_of(ActionName::Walk, fade), 0.5 * 0.75));
    assert!(approx_eq(blend.weight_of(ActionName::Idle, fade), 0.0));
    let sum: f32 = blend.weights(fade).iter().map(|w| w.weight).sum();
    assert!(approx_eq(sum, 1.0));
}

#[test]
fn resolver_uses_configured_direction_table() {
    let mut world = make_world(0.1);
    let entity = spawn_character(&mut world, Transform3D::default());
    let mut table = DirectionTable::default();
    table.set_entry("forward_left", FRAC_PI_4 / 2.0);
    world.insert_resource(table);

    press(&mut world, &["w", "a"]);
    tick_movement(&mut world);

    let intent = world.get::<MovementIntent>(entity).unwrap();
    assert!(intent.is_moving);
    assert!(approx_eq(intent.heading, FRAC_PI_4 / 2.0));
}

#[test]
fn rebound_keys_drive_movement() {
    let mut world = make_world(0.1);
    let entity = spawn_character(&mut world, Transform3D::default());
    world
        .resource_mut::<KeyBindings>()
        .rebind(Direction::Forward, ["i"]);

    press(&mut world, &["w"]);
    tick_movement(&mut world);
    assert!(!world.get::<MovementIntent>(entity).unwrap().is_moving);

    press(&mut world, &["I"]);
    tick_movement(&mut world);
    assert!(world.get::<MovementIntent>(entity).unwrap().is_moving);
    assert!(approx_eq(world.get::<Transform3D>(entity).unwrap().position.z, 0.2));
}

#[test]
fn orientation_turns_through_the_seam() {
    let mut world = make_world(0.1);
    world.resource_mut::<MotionConfig>().turn_rate = 3.0;
    // Facing 170°, asked to face -170°: 20° away through ±180°.
    let start = Transform3D::new(0.0, 0.0, 0.0).with_yaw(170f32.to_radians());
    let entity = spawn_character(&mut world, start);
    {
        let mut intent = world.get_mut::<MovementIntent>(entity).unwrap();
        intent.heading = (-170f32).to_radians();
        intent.is_moving = true;
    }

    let mut schedule = Schedule::default();
    schedule.add_systems(orientation_smoother);
    schedule.run(&mut world);

    let yaw = world.get::<Transform3D>(entity).unwrap().yaw;
    // Stepped 0.3 rad the short way, across +π.
    let expected = 170f32.to_radians() + 0.3 - 2.0 * PI;
    assert!(approx_eq(yaw, expected));
}

#[test]
fn orientation_untouched_when_not_moving() {
    let mut world = make_world(0.1);
    let entity = spawn_character(&mut world, Transform3D::default().with_yaw(1.0));

    tick_movement(&mut world);

    let transform = world.get::<Transform3D>(entity).unwrap();
    assert!(approx_eq(transform.yaw, 1.0));
    assert!(approx_eq(transform.position.z, 0.0));
}

#[test]
fn velocity_follows_smoothed_facing_not_heading() {
    let mut world = make_world(0.1);
    world.resource_mut::<MotionConfig>().turn_rate = 1.0;
    let entity = spawn_character(&mut world, Transform3D::default());

    // Strafe right: heading -π/2, but the body only turns 0.1 rad this frame.
    press(&mut world, &["d"]);
    tick_movement(&mut world);

    let transform = *world.get::<Transform3D>(entity).unwrap();
    assert!(approx_eq(transform.yaw, -0.1));
    let step = 2.0 * 0.1;
    assert!(approx_eq(transform.position.x, step * (-0.1f32).sin()));
    assert!(approx_eq(transform.position.z, step * (-0.1f32).cos()));
    let intent = world.get::<MovementIntent>(entity).unwrap();
    assert!(approx_eq(intent.heading, -FRAC_PI_2));
}

#[test]
fn camera_follow_translates_by_step() {
    let mut world = make_world(0.1);
    let entity = spawn_character(&mut world, Transform3D::default());

    press(&mut world, &["w"]);
    tick_movement(&mut world);

    let pos = world.get::<Transform3D>(entity).unwrap().position;
    let rig = *world.resource::<CameraRig>();
    assert!(approx_eq(rig.position.z, -5.0 + pos.z));
    assert!(approx_eq(rig.target.z, pos.z));
}

#[test]
fn world_time_clamps_and_counts() {
    let mut world = make_world(0.0);

    update_world_time(&mut world, 0.25);
    update_world_time(&mut world, 0.05);
    update_world_time(&mut world, f32::INFINITY);

    let time = *world.resource::<WorldTime>();
    assert!(approx_eq(time.delta, 0.0));
    assert!(approx_eq(time.elapsed, 0.15));
    assert_eq!(time.frame_count, 3);
}

#[test]
fn bundled_manifest_and_config_load() {
    let root = env!("CARGO_MANIFEST_DIR");
    let mut config = MotionConfig::with_path(format!("{root}/config.ini"));
    config.load_from_file().unwrap();
    let defaults = MotionConfig::new();
    assert!(approx_eq(config.walk_speed, defaults.walk_speed));
    assert!(approx_eq(config.run_multiplier, defaults.run_multiplier));
    assert!(approx_eq(config.fade_duration, defaults.fade_duration));
    assert_eq!(config.bindings, defaults.bindings);
    for name in DirectionTable::ENTRY_NAMES {
        let loaded = config.directions.entry(name).unwrap();
        let default = defaults.directions.entry(name).unwrap();
        assert!(approx_eq(loaded, default), "{name}");
    }

    let library =
        AnimationLibrary::load_manifest(format!("{root}/assets/clips.json"), &config.reserved_pose)
            .unwrap();
    assert_eq!(library.names(), vec!["Idle", "Run", "Walk"]);
    assert_eq!(library.model(), Some("models/Soldier.glb"));
}
