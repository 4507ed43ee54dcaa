//! Game settings and preferences
//!
//! Key bindings, the high score location and game balance, persisted as JSON
//! next to the save file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::input::KeyBinding;
use crate::platform;
use crate::sim::{PlayerSlot, TickInput};
use crate::tuning::Tuning;

/// Settings file name inside the data directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Controls ===
    pub player_one: KeyBinding,
    pub player_two: KeyBinding,
    pub pause_key: String,
    pub restart_key: String,
    pub exit_key: String,

    /// Overrides the per-user high score location
    pub save_path: Option<PathBuf>,

    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_one: KeyBinding::for_slot(PlayerSlot::One),
            player_two: KeyBinding::for_slot(PlayerSlot::Two),
            pause_key: " ".into(),
            restart_key: "r".into(),
            exit_key: "Escape".into(),
            save_path: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> PathBuf {
        platform::data_dir()
            .join(platform::APP_DIR)
            .join(SETTINGS_FILE_NAME)
    }

    /// Load settings, falling back to defaults on a missing or bad file
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Bad settings in {}: {}; using defaults", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON. Returns true on success.
    pub fn save(&self, path: &Path) -> bool {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not serialize settings: {}", err);
                return false;
            }
        };
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
            && fs::create_dir_all(dir).is_err()
        {
            log::warn!("Could not create {}", dir.display());
            return false;
        }
        match fs::write(path, json) {
            Ok(()) => {
                log::info!("Settings saved");
                true
            }
            Err(err) => {
                log::warn!("Could not write {}: {}", path.display(), err);
                false
            }
        }
    }

    /// Where high scores are kept
    pub fn save_file_path(&self) -> PathBuf {
        self.save_path
            .clone()
            .unwrap_or_else(platform::save_file_path)
    }

    /// Sample every binding for one frame
    pub fn sample_input(&self, is_down: impl Fn(&str) -> bool) -> TickInput {
        TickInput {
            players: [
                self.player_one.sample(&is_down),
                self.player_two.sample(&is_down),
            ],
            pause: is_down(&self.pause_key),
            restart: is_down(&self.restart_key),
            exit: is_down(&self.exit_key),
            idle_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "pause_key": "p", "tuning": { "columns": 30 } }"#).unwrap();
        assert_eq!(settings.pause_key, "p");
        assert_eq!(settings.restart_key, "r");
        assert_eq!(settings.player_one, KeyBinding::player_one());
        assert_eq!(settings.tuning.columns, 30);
        assert_eq!(settings.tuning.rows, 15);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("time-attack-no-such-dir/settings.json");
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("time-attack-settings-{}", std::process::id()))
            .join(SETTINGS_FILE_NAME);
        let mut settings = Settings::default();
        settings.exit_key = "q".into();
        settings.tuning.match_duration_secs = 45;
        assert!(settings.save(&path));
        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_sample_input() {
        let settings = Settings::default();
        let input = settings.sample_input(|key| matches!(key, "ArrowUp" | "d" | " "));
        assert!(input.players[0].up);
        assert!(input.players[1].right);
        assert!(input.pause);
        assert!(!input.restart);
        assert!(!input.exit);
        assert!(!input.idle_mode);
    }

    #[test]
    fn test_default_bindings_follow_seats() {
        let settings = Settings::default();
        assert_eq!(settings.player_one, KeyBinding::player_one());
        assert_eq!(settings.player_two, KeyBinding::player_two());
        assert_eq!(settings.player_two.jump, "e");
    }
}
