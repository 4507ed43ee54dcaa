//! Level grid: a static tile layer under an object layer
//!
//! Both layers are dense column-major arrays of `columns * rows` cells. The
//! level also owns the entity table; the object layer stores [`EntityId`]s
//! into it. Every placement goes through the level so an entity's `cell` and
//! `displaced` flag always agree with the object layer.

use glam::Vec2;
use rand::Rng;

use super::SimError;
use super::entity::{Entity, EntityId, GridPos, Passability, Sprite, Texture};
use super::player;
use super::state::GameEvent;
use super::tick::PlayerInput;
use crate::tuning::Tuning;

/// A background cell
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub sprite: Sprite,
}

impl Tile {
    pub fn new(texture: Texture, position: Vec2, passability: Passability) -> Self {
        let mut sprite = Sprite::new(texture);
        sprite.position = position;
        sprite.passability = passability;
        Self { sprite }
    }
}

/// Visible area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Clock snapshot for one update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the process started
    pub total: f64,
    /// Seconds since the previous update
    pub elapsed: f64,
}

impl FrameTime {
    pub fn new(total: f64, elapsed: f64) -> Self {
        Self { total, elapsed }
    }
}

/// Everything an entity update may read besides the level itself
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext<'a> {
    pub time: FrameTime,
    pub viewport: Viewport,
    pub inputs: &'a [PlayerInput; 2],
    pub tuning: &'a Tuning,
}

#[derive(Debug, Clone)]
pub struct Level {
    columns: usize,
    rows: usize,
    tile_length: f32,
    tiles: Vec<Tile>,
    objects: Vec<Option<EntityId>>,
    entities: Vec<Entity>,
}

impl Level {
    /// Create a level with every tile set to `base` and an empty object layer
    pub fn new(base: Texture, columns: usize, rows: usize, tile_length: f32) -> Self {
        let mut tiles = Vec::with_capacity(columns * rows);
        for column in 0..columns {
            for row in 0..rows {
                let origin = Vec2::new(column as f32, row as f32) * tile_length;
                tiles.push(Tile::new(base, origin, Passability::Passable));
            }
        }
        Self {
            columns,
            rows,
            tile_length,
            tiles,
            objects: vec![None; columns * rows],
            entities: Vec::new(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tile_length(&self) -> f32 {
        self.tile_length
    }

    fn index(&self, pos: GridPos) -> Result<usize, SimError> {
        if pos.column >= self.columns || pos.row >= self.rows {
            return Err(SimError::OutOfBounds {
                column: pos.column,
                row: pos.row,
            });
        }
        Ok(pos.column * self.rows + pos.row)
    }

    fn pos_of(&self, index: usize) -> GridPos {
        GridPos::new(index / self.rows, index % self.rows)
    }

    /// Pixel position of a cell's top-left corner
    pub fn cell_origin(&self, pos: GridPos) -> Vec2 {
        Vec2::new(pos.column as f32, pos.row as f32) * self.tile_length
    }

    // --- tile layer ---

    pub fn tile(&self, pos: GridPos) -> Result<&Tile, SimError> {
        let i = self.index(pos)?;
        Ok(&self.tiles[i])
    }

    pub fn set_tile(
        &mut self,
        pos: GridPos,
        texture: Texture,
        passability: Passability,
    ) -> Result<(), SimError> {
        let i = self.index(pos)?;
        self.tiles[i] = Tile::new(texture, self.cell_origin(pos), passability);
        Ok(())
    }

    /// Retexture the half-open rectangle `[from, to)`
    pub fn fill_tile_range(
        &mut self,
        from: GridPos,
        to: GridPos,
        texture: Texture,
    ) -> Result<(), SimError> {
        self.check_range(from, to)?;
        for column in from.column..to.column {
            for row in from.row..to.row {
                self.set_tile(GridPos::new(column, row), texture, Passability::Passable)?;
            }
        }
        Ok(())
    }

    fn check_range(&self, from: GridPos, to: GridPos) -> Result<(), SimError> {
        if to.column > self.columns || to.row > self.rows {
            return Err(SimError::OutOfBounds {
                column: to.column,
                row: to.row,
            });
        }
        if from.column < to.column && from.row < to.row {
            self.index(from)?;
        }
        Ok(())
    }

    // --- entity table ---

    /// Register an entity. It stays displaced until placed.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.entities.push(entity);
        EntityId(self.entities.len() - 1)
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    pub fn entity_mut(&mut self, id: EntityId) -> &mut Entity {
        &mut self.entities[id.0]
    }

    // --- object layer ---

    pub fn object_at(&self, pos: GridPos) -> Result<Option<EntityId>, SimError> {
        let i = self.index(pos)?;
        Ok(self.objects[i])
    }

    /// Put an entity into a cell, overwriting whatever was there.
    ///
    /// An evicted occupant is marked displaced, and the entity's previous
    /// cell is cleared, so no entity is ever referenced by two cells.
    pub fn set_object(
        &mut self,
        pos: GridPos,
        id: EntityId,
        passability: Passability,
    ) -> Result<(), SimError> {
        let i = self.index(pos)?;

        if let Some(previous) = self.objects[i].filter(|&occupant| occupant != id) {
            self.entities[previous.0].displaced = true;
        }

        let origin = self.cell_origin(pos);
        let entity = &self.entities[id.0];
        if !entity.displaced && entity.cell != pos {
            let old = self.index(entity.cell)?;
            if self.objects[old] == Some(id) {
                self.objects[old] = None;
            }
        }

        let entity = &mut self.entities[id.0];
        entity.cell = pos;
        entity.displaced = false;
        entity.sprite.passability = passability;
        entity.sprite.position = origin;
        self.objects[i] = Some(id);
        Ok(())
    }

    /// Fill the half-open rectangle `[from, to)` with fresh obstacles
    pub fn fill_object_range(
        &mut self,
        from: GridPos,
        to: GridPos,
        texture: Texture,
        passability: Passability,
    ) -> Result<(), SimError> {
        self.check_range(from, to)?;
        for column in from.column..to.column {
            for row in from.row..to.row {
                let id = self.spawn(Entity::obstacle(texture));
                self.set_object(GridPos::new(column, row), id, passability)?;
            }
        }
        Ok(())
    }

    /// Take an entity off the grid, leaving it displaced
    pub fn remove_object(&mut self, pos: GridPos) -> Result<EntityId, SimError> {
        let i = self.index(pos)?;
        let id = self.objects[i].take().ok_or(SimError::EmptyCell {
            column: pos.column,
            row: pos.row,
        })?;
        self.entities[id.0].displaced = true;
        Ok(id)
    }

    /// Occupied cells in column-major order
    pub fn live_objects(&self) -> Vec<EntityId> {
        self.objects.iter().flatten().copied().collect()
    }

    /// Pick an empty cell: random probes first, then a linear scan.
    /// Returns `None` only when every cell is occupied.
    pub fn random_free_cell<R: Rng + ?Sized>(&self, rng: &mut R, attempts: u32) -> Option<GridPos> {
        if self.objects.is_empty() {
            return None;
        }
        for _ in 0..attempts {
            let pos = GridPos::new(
                rng.random_range(0..self.columns),
                rng.random_range(0..self.rows),
            );
            if self.objects[pos.column * self.rows + pos.row].is_none() {
                return Some(pos);
            }
        }
        self.objects
            .iter()
            .position(Option::is_none)
            .map(|i| self.pos_of(i))
    }

    /// Advance every entity on the grid by one tick.
    ///
    /// The set of live objects is captured once up front and shared by every
    /// entity's update. Entities are updated in grid order against the live
    /// table, so a player updated later in the tick sees earlier players at
    /// their already-moved positions.
    pub fn update(
        &mut self,
        ctx: &UpdateContext<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), SimError> {
        let live = self.live_objects();
        // Tiles are static backdrop and have nothing to advance.
        for &id in &live {
            if self.entity(id).kind().is_movable() {
                player::update(self, id, &live, ctx, events)?;
            }
        }
        Ok(())
    }

    /// Sprites in paint order: all tiles, then all placed objects
    pub fn draw_order(&self) -> impl Iterator<Item = &Sprite> + '_ {
        let tiles = self.tiles.iter().map(|tile| &tile.sprite);
        let objects = self
            .objects
            .iter()
            .flatten()
            .map(|id| &self.entities[id.0].sprite);
        tiles.chain(objects)
    }
}
