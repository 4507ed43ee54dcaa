//! Keyboard bindings
//!
//! Keys are named the way browsers report `KeyboardEvent.key` ("ArrowLeft",
//! "a", " "). The presentation layer supplies an "is this key down" predicate
//! and bindings turn it into simulation input.

use serde::{Deserialize, Serialize};

use crate::sim::{PlayerInput, PlayerSlot};

/// Keys for one player's five actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub left: String,
    pub right: String,
    pub up: String,
    pub down: String,
    pub jump: String,
}

impl KeyBinding {
    /// Arrow keys, dodge on "/"
    pub fn player_one() -> Self {
        Self {
            left: "ArrowLeft".into(),
            right: "ArrowRight".into(),
            up: "ArrowUp".into(),
            down: "ArrowDown".into(),
            jump: "/".into(),
        }
    }

    /// WASD, dodge on "e"
    pub fn player_two() -> Self {
        Self {
            left: "a".into(),
            right: "d".into(),
            up: "w".into(),
            down: "s".into(),
            jump: "e".into(),
        }
    }

    pub fn for_slot(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::One => Self::player_one(),
            PlayerSlot::Two => Self::player_two(),
        }
    }

    pub fn sample(&self, is_down: impl Fn(&str) -> bool) -> PlayerInput {
        PlayerInput {
            left: is_down(&self.left),
            right: is_down(&self.right),
            up: is_down(&self.up),
            down: is_down(&self.down),
            jump: is_down(&self.jump),
        }
    }
}
