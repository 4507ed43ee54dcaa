//! Platform abstraction layer
//!
//! Resolves the per-user application data directory on each OS.

use std::env;
use std::path::PathBuf;

/// Folder under the data directory that holds the game's files
pub const APP_DIR: &str = "TimeAttack";
/// High score file name
pub const SAVE_FILE_NAME: &str = "TimeAttack.sav";

/// Per-user data directory, falling back to the working directory
pub fn data_dir() -> PathBuf {
    if cfg!(windows)
        && let Some(dir) = env::var_os("APPDATA")
    {
        return PathBuf::from(dir);
    }
    if let Some(dir) = env::var_os("XDG_DATA_HOME").filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }
    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    PathBuf::from(".")
}

/// Default location of the high score file
pub fn save_file_path() -> PathBuf {
    data_dir().join(APP_DIR).join(SAVE_FILE_NAME)
}
