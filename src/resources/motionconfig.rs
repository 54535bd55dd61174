//! Motion configuration resource.
//!
//! Tunables for the locomotion controller, loaded from an INI configuration
//! file. Defaults are safe to start with; missing keys keep their defaults and
//! out-of-range values are reported and ignored.
//!
//! # Configuration File Format
//!
//! ```ini
//! [motion]
//! walk_speed = 2.0
//! run_multiplier = 2.5
//! turn_rate = 12.0
//! max_frame_delta = 0.1
//!
//! [animation]
//! fade_duration = 0.2
//! idle_clip = Idle
//! walk_clip = Walk
//! run_clip = Run
//! reserved_pose = TPose
//!
//! [camera]
//! follow = true
//!
//! [keys]
//! forward = w, arrowup
//! backward = s, arrowdown
//! left = a, arrowleft
//! right = d, arrowright
//!
//! ; offsets in degrees, relative to the camera bearing
//! [directions]
//! forward = 0
//! forward_left = 45
//! backward = 180
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};

use crate::components::animation::ActionName;
use crate::resources::directiontable::DirectionTable;
use crate::resources::keybindings::{Direction, KeyBindings};

/// Default safe values for startup
const DEFAULT_WALK_SPEED: f32 = 2.0;
const DEFAULT_RUN_MULTIPLIER: f32 = 2.5;
const DEFAULT_TURN_RATE: f32 = 12.0;
const DEFAULT_FADE_DURATION: f32 = 0.2;
const DEFAULT_MAX_FRAME_DELTA: f32 = 0.1;
const DEFAULT_RESERVED_POSE: &str = "TPose";
const DEFAULT_CAMERA_FOLLOW: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Locomotion tunables. Immutable once handed to the controller.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MotionConfig {
    /// Walking speed in world units per second.
    pub walk_speed: f32,
    /// Speed factor applied while running. Always > 1.
    pub run_multiplier: f32,
    /// Maximum turning speed in radians per second.
    pub turn_rate: f32,
    /// Crossfade length in seconds.
    pub fade_duration: f32,
    /// Upper bound for a single frame's delta, in seconds.
    pub max_frame_delta: f32,
    /// Clip played for [`ActionName::Idle`].
    pub idle_clip: String,
    /// Clip played for [`ActionName::Walk`].
    pub walk_clip: String,
    /// Clip played for [`ActionName::Run`].
    pub run_clip: String,
    /// Calibration pose excluded from the animation library.
    pub reserved_pose: String,
    /// Move the camera along with the character.
    pub camera_follow: bool,
    pub bindings: KeyBindings,
    pub directions: DirectionTable,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            walk_speed: DEFAULT_WALK_SPEED,
            run_multiplier: DEFAULT_RUN_MULTIPLIER,
            turn_rate: DEFAULT_TURN_RATE,
            fade_duration: DEFAULT_FADE_DURATION,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            idle_clip: ActionName::Idle.as_str().to_string(),
            walk_clip: ActionName::Walk.as_str().to_string(),
            run_clip: ActionName::Run.as_str().to_string(),
            reserved_pose: DEFAULT_RESERVED_POSE.to_string(),
            camera_follow: DEFAULT_CAMERA_FOLLOW,
            bindings: KeyBindings::default(),
            directions: DirectionTable::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Clip name configured for `action`.
    pub fn clip_name(&self, action: ActionName) -> &str {
        match action {
            ActionName::Idle => &self.idle_clip,
            ActionName::Walk => &self.walk_clip,
            ActionName::Run => &self.run_clip,
        }
    }

    /// Running speed in world units per second.
    pub fn run_speed(&self) -> f32 {
        self.walk_speed * self.run_multiplier
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [motion] section
        if let Some(v) = read_f32(config, "motion", "walk_speed") {
            accept(&mut self.walk_speed, v, v > 0.0, "motion.walk_speed");
        }
        if let Some(v) = read_f32(config, "motion", "run_multiplier") {
            accept(&mut self.run_multiplier, v, v > 1.0, "motion.run_multiplier");
        }
        if let Some(v) = read_f32(config, "motion", "turn_rate") {
            accept(&mut self.turn_rate, v, v > 0.0, "motion.turn_rate");
        }
        if let Some(v) = read_f32(config, "motion", "max_frame_delta") {
            accept(&mut self.max_frame_delta, v, v > 0.0, "motion.max_frame_delta");
        }

        // [animation] section
        if let Some(v) = read_f32(config, "animation", "fade_duration") {
            accept(&mut self.fade_duration, v, v >= 0.0, "animation.fade_duration");
        }
        for (key, slot) in [
            ("idle_clip", &mut self.idle_clip),
            ("walk_clip", &mut self.walk_clip),
            ("run_clip", &mut self.run_clip),
            ("reserved_pose", &mut self.reserved_pose),
        ] {
            if let Some(name) = config.get("animation", key) {
                let name = name.trim();
                if !name.is_empty() {
                    *slot = name.to_string();
                }
            }
        }

        // [camera] section
        match config.getbool("camera", "follow") {
            Ok(Some(follow)) => self.camera_follow = follow,
            Ok(None) => {}
            Err(e) => warn!("Ignoring camera.follow: {}", e),
        }

        // [keys] section
        for direction in Direction::ALL {
            if let Some(keys) = config.get("keys", direction.config_key()) {
                self.bindings.rebind(direction, keys.split(','));
            }
        }

        // [directions] section, degrees
        for name in DirectionTable::ENTRY_NAMES {
            if let Some(degrees) = read_f32(config, "directions", name) {
                self.directions.set_entry(name, degrees.to_radians());
            }
        }

        info!(
            "Loaded motion config: walk={} u/s, run x{}, turn={} rad/s, fade={}s, clips={}/{}/{}",
            self.walk_speed,
            self.run_multiplier,
            self.turn_rate,
            self.fade_duration,
            self.idle_clip,
            self.walk_clip,
            self.run_clip
        );
    }

    fn to_ini(&self) -> Ini {
        let mut config = Ini::new();

        // [motion] section
        config.set("motion", "walk_speed", Some(self.walk_speed.to_string()));
        config.set("motion", "run_multiplier", Some(self.run_multiplier.to_string()));
        config.set("motion", "turn_rate", Some(self.turn_rate.to_string()));
        config.set("motion", "max_frame_delta", Some(self.max_frame_delta.to_string()));

        // [animation] section
        config.set("animation", "fade_duration", Some(self.fade_duration.to_string()));
        config.set("animation", "idle_clip", Some(self.idle_clip.clone()));
        config.set("animation", "walk_clip", Some(self.walk_clip.clone()));
        config.set("animation", "run_clip", Some(self.run_clip.clone()));
        config.set("animation", "reserved_pose", Some(self.reserved_pose.clone()));

        // [camera] section
        config.set("camera", "follow", Some(self.camera_follow.to_string()));

        // [keys] section
        for direction in Direction::ALL {
            let keys = self.bindings.keys(direction).join(", ");
            config.set("keys", direction.config_key(), Some(keys));
        }

        // [directions] section
        for name in DirectionTable::ENTRY_NAMES {
            if let Some(radians) = self.directions.entry(name) {
                config.set("directions", name, Some(radians.to_degrees().to_string()));
            }
        }

        config
    }

    /// Render the configuration as INI text.
    pub fn to_ini_string(&self) -> String {
        self.to_ini().writes()
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

fn read_f32(config: &Ini, section: &str, key: &str) -> Option<f32> {
    match config.getfloat(section, key) {
        Ok(value) => value.map(|v| v as f32),
        Err(e) => {
            warn!("Ignoring {}.{}: {}", section, key, e);
            None
        }
    }
}

fn accept(slot: &mut f32, value: f32, valid: bool, name: &str) {
    if valid && value.is_finite() {
        *slot = value;
    } else {
        warn!("Ignoring out-of-range {} = {}, keeping {}", name, value, slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_defaults() {
        let config = MotionConfig::new();
        assert_eq!(config.walk_speed, 2.0);
        assert_eq!(config.run_multiplier, 2.5);
        assert_eq!(config.turn_rate, 12.0);
        assert_eq!(config.fade_duration, 0.2);
        assert_eq!(config.clip_name(ActionName::Idle), "Idle");
        assert_eq!(config.clip_name(ActionName::Walk), "Walk");
        assert_eq!(config.clip_name(ActionName::Run), "Run");
        assert_eq!(config.reserved_pose, "TPose");
        assert!(config.camera_follow);
        assert!((config.run_speed() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_overrides_and_keeps_missing() {
        let mut config = MotionConfig::new();
        config
            .load_from_str(
                "[motion]\nwalk_speed = 3.5\n\n[animation]\nwalk_clip = Walking\nrun_clip = Running\n",
            )
            .unwrap();
        assert_eq!(config.walk_speed, 3.5);
        assert_eq!(config.run_multiplier, 2.5);
        assert_eq!(config.clip_name(ActionName::Walk), "Walking");
        assert_eq!(config.clip_name(ActionName::Run), "Running");
        assert_eq!(config.clip_name(ActionName::Idle), "Idle");
    }

    #[test]
    fn test_out_of_range_values_are_ignored() {
        let mut config = MotionConfig::new();
        config
            .load_from_str("[motion]\nwalk_speed = -1\nrun_multiplier = 0.5\nturn_rate = abc\n")
            .unwrap();
        assert_eq!(config.walk_speed, 2.0);
        assert_eq!(config.run_multiplier, 2.5);
        assert_eq!(config.turn_rate, 12.0);
    }

    #[test]
    fn test_keys_and_directions_sections() {
        let mut config = MotionConfig::new();
        config
            .load_from_str("[keys]\nforward = z, i\n\n[directions]\nbackward = -90\n\n[camera]\nfollow = false\n")
            .unwrap();
        assert_eq!(config.bindings.keys(Direction::Forward), ["z", "i"]);
        assert!((config.directions.backward + PI / 2.0).abs() < 1e-5);
        assert!(!config.camera_follow);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = MotionConfig::with_path("/nonexistent/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config, MotionConfig::with_path("/nonexistent/config.ini"));
    }

    #[test]
    fn test_ini_text_reloads_to_same_values() {
        let mut original = MotionConfig::new();
        original.walk_speed = 1.5;
        original.run_clip = "Sprint".to_string();
        let text = original.to_ini_string();

        let mut reloaded = MotionConfig::new();
        reloaded.load_from_str(&text).unwrap();
        assert_eq!(reloaded.walk_speed, 1.5);
        assert_eq!(reloaded.run_clip, "Sprint");
        assert_eq!(reloaded.bindings, original.bindings);
        assert!((reloaded.directions.backward_left - original.directions.backward_left).abs() < 1e-5);
    }
}
