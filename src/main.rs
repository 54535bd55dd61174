//! Ecowalk demo entry point.
//!
//! A small third-person walking scene written in Rust using:
//! - **raylib** for windowing, input, and drawing
//! - **bevy_ecs** (inside [`CharacterControls`]) for the locomotion systems
//!
//! The character is drawn as a box with a facing marker, tinted by the action
//! that dominates the current animation blend. Three boards stand in the scene
//! and entering one's trigger radius is logged.
//!
//! # Controls
//!
//! - `W A S D` / arrow keys: move relative to the camera
//! - `Shift`: toggle walk/run
//! - `Q` / `E`: orbit the camera around the character
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini --clips assets/clips.json
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use clap::Parser;
use ecowalk::components::animation::ActionName;
use ecowalk::components::transform::Transform3D;
use ecowalk::controller::CharacterControls;
use ecowalk::resources::animationlibrary::AnimationLibrary;
use ecowalk::resources::camerarig::CameraRig;
use ecowalk::resources::input::InputState;
use ecowalk::resources::motionconfig::MotionConfig;
use raylib::prelude::*;

const WINDOW_WIDTH: i32 = 1280;
const WINDOW_HEIGHT: i32 = 720;
const BOARD_TRIGGER_RADIUS: f32 = 2.0;
/// Camera orbit speed in radians per second.
const ORBIT_SPEED: f32 = 1.5;

/// Raylib keys forwarded to the controller, with their identifiers.
const KEY_MAP: [(KeyboardKey, &str); 8] = [
    (KeyboardKey::KEY_W, "w"),
    (KeyboardKey::KEY_A, "a"),
    (KeyboardKey::KEY_S, "s"),
    (KeyboardKey::KEY_D, "d"),
    (KeyboardKey::KEY_UP, "arrowup"),
    (KeyboardKey::KEY_DOWN, "arrowdown"),
    (KeyboardKey::KEY_LEFT, "arrowleft"),
    (KeyboardKey::KEY_RIGHT, "arrowright"),
];

/// Ecowalk character controls demo
#[derive(Parser)]
#[command(version, about = "Third-person walk/run locomotion demo")]
struct Cli {
    /// Motion configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Animation clip manifest (JSON).
    #[arg(long, value_name = "PATH", default_value = "assets/clips.json")]
    clips: PathBuf,

    /// Write the default configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,
}

/// Interactive board in the scene.
struct Board {
    name: &'static str,
    position: Vector3,
    color: Color,
    inside: bool,
}

impl Board {
    fn new(name: &'static str, x: f32, z: f32, color: Color) -> Self {
        Self {
            name,
            position: Vector3 { x, y: 0.0, z },
            color,
            inside: false,
        }
    }

    fn horizontal_distance(&self, point: Vector3) -> f32 {
        let dx = point.x - self.position.x;
        let dz = point.z - self.position.z;
        (dx * dx + dz * dz).sqrt()
    }
}

fn action_color(action: ActionName) -> Color {
    match action {
        ActionName::Idle => Color::SKYBLUE,
        ActionName::Walk => Color::LIME,
        ActionName::Run => Color::ORANGE,
    }
}

/// Rotate the camera position about the vertical axis through `pivot`.
fn orbit(position: Vector3, pivot: Vector3, angle: f32) -> Vector3 {
    let (sin, cos) = angle.sin_cos();
    let dx = position.x - pivot.x;
    let dz = position.z - pivot.z;
    Vector3 {
        x: pivot.x + dx * cos + dz * sin,
        y: position.y,
        z: pivot.z - dx * sin + dz * cos,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write the default configuration and quit (no window needed)
    if let Some(path) = cli.write_default_config {
        if let Err(e) = MotionConfig::with_path(path.clone()).save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Default config written to {}", path.display());
        return;
    }

    log::info!("Hello, world! This is Ecowalk!");

    let mut config = MotionConfig::with_path(cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}, using defaults", e);
    }

    let library = match AnimationLibrary::load_manifest(&cli.clips, &config.reserved_pose) {
        Ok(library) => library,
        Err(e) => {
            log::error!("Failed to load animation clips: {}", e);
            std::process::exit(1);
        }
    };

    let start = Transform3D::default();
    let camera = CameraRig::new(
        Vector3 {
            x: 0.0,
            y: 5.0,
            z: 5.0,
        },
        start.position,
    );
    let mut controls = match CharacterControls::new(config, library, camera, start) {
        Ok(controls) => controls,
        Err(e) => {
            log::error!("Failed to create character controls: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Steering model '{}'", controls.model_key());

    let mut boards = [
        Board::new("leaderboard", 0.0, -5.0, Color::GOLD),
        Board::new("task", 18.0, -25.0, Color::MAROON),
        Board::new("rewards", 0.0, -15.0, Color::PURPLE),
    ];

    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .resizable()
        .title("Ecowalk")
        .build();
    rl.set_target_fps(120);
    // Disable ESC to exit
    rl.set_exit_key(None);

    let mut input = InputState::new();

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        for (key, id) in KEY_MAP {
            input.set_key(id, rl.is_key_down(key));
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT_SHIFT)
            || rl.is_key_pressed(KeyboardKey::KEY_RIGHT_SHIFT)
        {
            controls.switch_run_toggle();
        }

        let mut orbit_dir = 0.0;
        if rl.is_key_down(KeyboardKey::KEY_Q) {
            orbit_dir -= 1.0;
        }
        if rl.is_key_down(KeyboardKey::KEY_E) {
            orbit_dir += 1.0;
        }
        if orbit_dir != 0.0 {
            let rig = controls.camera();
            let pivot = controls.current_position();
            let angle = orbit_dir * ORBIT_SPEED * dt.min(controls.config().max_frame_delta);
            controls.set_camera_position(orbit(rig.position, pivot, angle));
        }

        controls.update(dt, &input);

        let position = controls.current_position();
        for board in boards.iter_mut() {
            let inside = board.horizontal_distance(position) < BOARD_TRIGGER_RADIUS;
            if inside && !board.inside {
                log::info!("Entered {} board area", board.name);
            } else if !inside && board.inside {
                log::info!("Left {} board area", board.name);
            }
            board.inside = inside;
        }

        // --------------- Render ---------------
        let rig = controls.camera();
        let camera = Camera3D::perspective(
            rig.position,
            rig.target,
            Vector3 {
                x: 0.0,
                y: 1.0,
                z: 0.0,
            },
            45.0,
        );
        let dominant = controls
            .blend_weights()
            .iter()
            .max_by(|a, b| a.weight.total_cmp(&b.weight))
            .map(|w| w.action)
            .unwrap_or(ActionName::Idle);
        let forward = controls.transform().forward();

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::RAYWHITE);
        {
            let mut d3 = d.begin_mode3D(camera);
            d3.draw_grid(60, 1.0);
            for board in boards.iter() {
                let center = Vector3 {
                    x: board.position.x,
                    y: 1.0,
                    z: board.position.z,
                };
                d3.draw_cube(center, 3.0, 2.0, 0.2, board.color);
                d3.draw_cube_wires(center, 3.0, 2.0, 0.2, Color::DARKGRAY);
            }
            let body = Vector3 {
                x: position.x,
                y: position.y + 0.9,
                z: position.z,
            };
            d3.draw_cube(body, 0.6, 1.8, 0.6, action_color(dominant));
            d3.draw_cube_wires(body, 0.6, 1.8, 0.6, Color::BLACK);
            let nose = Vector3 {
                x: body.x + forward.x * 0.8,
                y: body.y,
                z: body.z + forward.z * 0.8,
            };
            d3.draw_line3D(body, nose, Color::RED);
        }

        let weights: Vec<String> = controls
            .blend_weights()
            .iter()
            .map(|w| format!("{} {:.2}", w.action, w.weight))
            .collect();
        d.draw_text(
            &format!(
                "action: {}  run: {}  blend: {}",
                controls.active_action(),
                if controls.run_toggle() { "on" } else { "off" },
                weights.join(" / ")
            ),
            10,
            10,
            20,
            Color::DARKGRAY,
        );
        d.draw_text(
            &format!(
                "pos: ({:.2}, {:.2})  yaw: {:.1} deg",
                position.x,
                position.z,
                controls.facing().to_degrees()
            ),
            10,
            36,
            20,
            Color::DARKGRAY,
        );
        d.draw_fps(WINDOW_WIDTH - 100, 10);
    }
}
