//! Flat entity record shared by everything that lives on the level grid
//!
//! There is no type hierarchy: an [`Entity`] is a [`Sprite`] plus grid
//! bookkeeping, an optional sound bank and a [`Role`] carrying the
//! kind-specific data. Kind checks compare [`Kind`] tags by value.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::SimError;
use super::modifier::ScoreModifier;
use super::player::{Player, PlayerSlot};
use super::rect::Rect;
use crate::audio::{SoundBank, SoundCue, SoundId};
use crate::color::Color;

/// Index of an entity in its level's entity table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub usize);

/// A (column, row) cell coordinate, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub column: usize,
    pub row: usize,
}

impl GridPos {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

/// Whether a sprite takes part in blocking collision resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Passability {
    #[default]
    Passable,
    Block,
}

/// Opaque texture handle from the asset layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Texture handle together with its pixel size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    pub id: TextureId,
    pub size: Vec2,
}

impl Texture {
    pub fn new(id: u32, width: f32, height: f32) -> Self {
        Self {
            id: TextureId(id),
            size: Vec2::new(width, height),
        }
    }

    /// Square texture, one tile wide
    pub fn square(id: u32, length: f32) -> Self {
        Self::new(id, length, length)
    }
}

/// Position, motion and look of anything drawn on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture: Texture,
    pub position: Vec2,
    /// Pending displacement for this update; cleared once applied
    pub velocity: Vec2,
    pub speed: f32,
    pub color: Color,
    pub passability: Passability,
}

impl Sprite {
    pub fn new(texture: Texture) -> Self {
        Self {
            texture,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            speed: 0.0,
            color: Color::WHITE,
            passability: Passability::Passable,
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.position, self.texture.size)
    }

    // Each call overwrites its axis, so opposing calls in one frame keep the last.
    pub fn move_left(&mut self) {
        self.velocity.x = -self.speed;
    }

    pub fn move_right(&mut self) {
        self.velocity.x = self.speed;
    }

    pub fn move_up(&mut self) {
        self.velocity.y = -self.speed;
    }

    pub fn move_down(&mut self) {
        self.velocity.y = self.speed;
    }

    /// Commit the pending velocity and clear it
    pub fn apply_velocity(&mut self) {
        self.position += self.velocity;
        self.velocity = Vec2::ZERO;
    }
}

/// Kind tag used for "same kind" checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Obstacle,
    Player,
    ScoreModifier,
}

impl Kind {
    /// Kinds that run per-tick behavior
    pub fn is_movable(&self) -> bool {
        matches!(self, Kind::Player)
    }
}

/// Kind-specific data
#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    /// Inert wall or pillar
    Obstacle,
    Player(Player),
    ScoreModifier(ScoreModifier),
}

impl Role {
    pub fn kind(&self) -> Kind {
        match self {
            Role::Obstacle => Kind::Obstacle,
            Role::Player(_) => Kind::Player,
            Role::ScoreModifier(_) => Kind::ScoreModifier,
        }
    }
}

/// Anything occupying a cell of the object layer
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub role: Role,
    pub sprite: Sprite,
    /// Last cell this entity was placed in; stale while displaced
    pub cell: GridPos,
    /// Not currently on the grid
    pub displaced: bool,
    pub sounds: Option<SoundBank>,
}

impl Entity {
    pub fn new(role: Role, sprite: Sprite) -> Self {
        Self {
            role,
            sprite,
            cell: GridPos::default(),
            displaced: true,
            sounds: None,
        }
    }

    pub fn obstacle(texture: Texture) -> Self {
        Self::new(Role::Obstacle, Sprite::new(texture))
    }

    pub fn player(texture: Texture, slot: PlayerSlot, speed: f32, lives: u8) -> Self {
        let mut sprite = Sprite::new(texture);
        sprite.speed = speed;
        sprite.color = slot.color();
        sprite.passability = Passability::Block;
        Self::new(Role::Player(Player::new(slot, lives)), sprite)
    }

    pub fn score_modifier(texture: Texture, modifier: i32) -> Self {
        let mut entity = Self::new(
            Role::ScoreModifier(ScoreModifier::default()),
            Sprite::new(texture),
        );
        entity.set_modifier(modifier);
        entity
    }

    pub fn with_sounds(mut self, sounds: SoundBank) -> Self {
        self.sounds = Some(sounds);
        self
    }

    pub fn kind(&self) -> Kind {
        self.role.kind()
    }

    pub fn as_player(&self) -> Option<&Player> {
        match &self.role {
            Role::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match &mut self.role {
            Role::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn modifier(&self) -> Option<i32> {
        match &self.role {
            Role::ScoreModifier(item) => Some(item.value),
            _ => None,
        }
    }

    /// Set a collectable's value and recolor it. No-op on other kinds.
    pub fn set_modifier(&mut self, value: i32) {
        if let Role::ScoreModifier(item) = &mut self.role {
            item.value = value;
            self.sprite.color = ScoreModifier::color_for(value);
        }
    }

    /// Resolve a sound cue through this entity's bank
    pub fn play(&self, cue: SoundCue) -> Result<SoundId, SimError> {
        match &self.sounds {
            Some(bank) => bank.play(cue),
            None => Err(SimError::MissingSound(cue)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposing_moves_keep_last_call() {
        let mut sprite = Sprite::new(Texture::square(0, 32.0));
        sprite.speed = 32.0;
        sprite.move_left();
        sprite.move_right();
        assert_eq!(sprite.velocity, Vec2::new(32.0, 0.0));
        sprite.move_down();
        sprite.move_up();
        assert_eq!(sprite.velocity, Vec2::new(32.0, -32.0));
    }

    #[test]
    fn test_apply_velocity_resets() {
        let mut sprite = Sprite::new(Texture::square(0, 32.0));
        sprite.speed = 10.0;
        sprite.move_right();
        sprite.apply_velocity();
        assert_eq!(sprite.position, Vec2::new(10.0, 0.0));
        assert_eq!(sprite.velocity, Vec2::ZERO);
        sprite.apply_velocity();
        assert_eq!(sprite.position, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_new_entities_start_displaced() {
        let wall = Entity::obstacle(Texture::square(1, 32.0));
        assert!(wall.displaced);
        assert_eq!(wall.kind(), Kind::Obstacle);
        assert!(!wall.kind().is_movable());
    }

    #[test]
    fn test_player_entity_blocks() {
        let player = Entity::player(Texture::square(2, 32.0), PlayerSlot::Two, 32.0, 5);
        assert_eq!(player.sprite.passability, Passability::Block);
        assert_eq!(player.sprite.color, Color::BLUE);
        assert!(player.kind().is_movable());
    }

    #[test]
    fn test_play_without_bank_fails() {
        let wall = Entity::obstacle(Texture::square(1, 32.0));
        assert!(matches!(
            wall.play(SoundCue::Hit),
            Err(SimError::MissingSound(SoundCue::Hit))
        ));
    }
}
