//! Data-driven game balance
//!
//! Every timing and sizing knob of a match. Defaults come from
//! [`crate::consts`]; a settings file may override any subset.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub columns: usize,
    pub rows: usize,
    /// Tile edge in pixels; also the player speed per input step
    pub tile_length: f32,
    pub match_duration_secs: u32,
    pub lead_in_secs: f64,
    pub collision_cooldown_secs: f64,
    pub dodge_duration_secs: f64,
    pub dodge_impulse: f32,
    pub input_interval_secs: f64,
    pub hit_rebound: f32,
    pub collectable_count: usize,
    pub respawn_interval_secs: f64,
    /// Values a collectable rolls from when (re)spawned
    pub modifier_values: Vec<i32>,
    pub player_lives: u8,
    pub free_cell_attempts: u32,
    /// RNG seed for collectable placement
    pub seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            rows: GRID_ROWS,
            tile_length: TILE_LENGTH,
            match_duration_secs: MATCH_DURATION_SECS,
            lead_in_secs: LEAD_IN_SECS,
            collision_cooldown_secs: COLLISION_COOLDOWN_SECS,
            dodge_duration_secs: DODGE_DURATION_SECS,
            dodge_impulse: DODGE_IMPULSE,
            input_interval_secs: INPUT_INTERVAL_SECS,
            hit_rebound: HIT_REBOUND,
            collectable_count: COLLECTABLE_COUNT,
            respawn_interval_secs: RESPAWN_INTERVAL_SECS,
            modifier_values: MODIFIER_VALUES.to_vec(),
            player_lives: PLAYER_LIVES,
            free_cell_attempts: FREE_CELL_ATTEMPTS,
            seed: 0x7A11_ACC0,
        }
    }
}

impl Tuning {
    /// Viewport size in pixels implied by the grid
    pub fn viewport_size(&self) -> (f32, f32) {
        (
            self.columns as f32 * self.tile_length,
            self.rows as f32 * self.tile_length,
        )
    }
}
