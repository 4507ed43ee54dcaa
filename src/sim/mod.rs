//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One update pass per frame, driven by the caller's clock
//! - Seeded RNG only
//! - Stable iteration order (column-major over the object grid)

pub mod arena;
pub mod collision;
pub mod entity;
pub mod level;
pub mod modifier;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

use std::fmt;

use crate::audio::SoundCue;

pub use arena::carve_arena;
pub use collision::{AxisContact, Side, axis_contact, touching};
pub use entity::{Entity, EntityId, GridPos, Kind, Passability, Role, Sprite, Texture, TextureId};
pub use level::{FrameTime, Level, Tile, UpdateContext, Viewport};
pub use modifier::ScoreModifier;
pub use player::{Player, PlayerSlot, PlayerState};
pub use rect::Rect;
pub use state::{GameEvent, MatchPhase, MatchSetup, MatchState, Scoreboard, TextureSet};
pub use tick::{PlayerInput, TickInput, tick};

/// Programming errors surfaced by the simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A grid coordinate outside the level
    OutOfBounds { column: usize, row: usize },
    /// Removal from a cell that holds nothing
    EmptyCell { column: usize, row: usize },
    /// A sound cue missing from the entity's bank
    MissingSound(SoundCue),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::OutOfBounds { column, row } => {
                write!(f, "cell ({column}, {row}) is outside the level")
            }
            SimError::EmptyCell { column, row } => {
                write!(f, "no object to remove at ({column}, {row})")
            }
            SimError::MissingSound(cue) => write!(f, "no sound registered for '{cue}'"),
        }
    }
}

impl std::error::Error for SimError {}
