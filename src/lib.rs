//! Time Attack - a two-player local arcade game on a tile grid
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (level grid, collisions, players, match state)
//! - `renderer`: Ordered draw calls and window title for the presentation layer
//! - `persistence`: Line-oriented high score store
//! - `platform`: Per-user data directory lookup
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod color;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use color::Color;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Window title shown while the match runs
    pub const GAME_TITLE: &str = "Time Attack!";

    /// Level grid defaults
    pub const GRID_COLUMNS: usize = 20;
    pub const GRID_ROWS: usize = 15;
    pub const TILE_LENGTH: f32 = 32.0;

    /// Match clock
    pub const MATCH_DURATION_SECS: u32 = 20;
    pub const LEAD_IN_SECS: f64 = 4.0;

    /// Minimum time between two resolved collisions of one player
    pub const COLLISION_COOLDOWN_SECS: f64 = 0.25;
    /// How long a dodge hop lasts before snapping back
    pub const DODGE_DURATION_SECS: f64 = 0.20;
    /// Upward dodge impulse as a fraction of player speed
    pub const DODGE_IMPULSE: f32 = 0.5;
    /// Minimum accumulated time between two input samples
    pub const INPUT_INTERVAL_SECS: f64 = 0.03;
    /// Velocity multiplier on the hit axis when two players collide
    pub const HIT_REBOUND: f32 = -2.0;

    /// Collectables
    pub const COLLECTABLE_COUNT: usize = 6;
    pub const RESPAWN_INTERVAL_SECS: f64 = 3.0;
    pub const MODIFIER_VALUES: [i32; 3] = [1, -1, 1];

    pub const PLAYER_LIVES: u8 = 5;
    /// Random probes before the free-cell search falls back to a scan
    pub const FREE_CELL_ATTEMPTS: u32 = 64;

    /// Fixed step used by the headless runner (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
}
