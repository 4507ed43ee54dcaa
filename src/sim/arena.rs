//! Arena layout
//!
//! Outer walls with a four-cell doorway centred on each side, so players can
//! wrap through the edges, plus a 2x2 pillar near each corner.

use super::SimError;
use super::entity::{GridPos, Passability, Texture};
use super::level::Level;

/// Width of each doorway in cells
const DOOR_WIDTH: usize = 4;
const PILLAR: usize = 2;
/// Smallest grid that fits doorways and pillars without them touching
const MIN_SIDE: usize = 10;

/// Fill the object layer with walls and pillars. Grids smaller than 10x10
/// are left open.
pub fn carve_arena(level: &mut Level, wall: Texture) -> Result<(), SimError> {
    let (columns, rows) = (level.columns(), level.rows());
    if columns < MIN_SIDE || rows < MIN_SIDE {
        log::debug!("Grid {}x{} too small for walls, leaving it open", columns, rows);
        return Ok(());
    }

    let door_column = columns / 2 - DOOR_WIDTH / 2;
    let door_row = rows / 2 - DOOR_WIDTH / 2;
    let block = Passability::Block;

    // Top and bottom walls, split by the doorway
    for row in [0, rows - 1] {
        level.fill_object_range(
            GridPos::new(0, row),
            GridPos::new(door_column, row + 1),
            wall,
            block,
        )?;
        level.fill_object_range(
            GridPos::new(door_column + DOOR_WIDTH, row),
            GridPos::new(columns, row + 1),
            wall,
            block,
        )?;
    }
    // Left and right walls, between the corners
    for column in [0, columns - 1] {
        level.fill_object_range(
            GridPos::new(column, 1),
            GridPos::new(column + 1, door_row),
            wall,
            block,
        )?;
        level.fill_object_range(
            GridPos::new(column, door_row + DOOR_WIDTH),
            GridPos::new(column + 1, rows - 1),
            wall,
            block,
        )?;
    }

    let (near_column, near_row) = (columns / 5, rows / 5);
    let (far_column, far_row) = (columns - near_column - PILLAR, rows - near_row - PILLAR);
    for (column, row) in [
        (near_column, near_row),
        (far_column, near_row),
        (near_column, far_row),
        (far_column, far_row),
    ] {
        level.fill_object_range(
            GridPos::new(column, row),
            GridPos::new(column + PILLAR, row + PILLAR),
            wall,
            block,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carved(columns: usize, rows: usize) -> Level {
        let mut level = Level::new(Texture::square(0, 32.0), columns, rows, 32.0);
        carve_arena(&mut level, Texture::square(1, 32.0)).unwrap();
        level
    }

    fn occupied(level: &Level, column: usize, row: usize) -> bool {
        level.object_at(GridPos::new(column, row)).unwrap().is_some()
    }

    #[test]
    fn test_default_arena_layout() {
        let level = carved(20, 15);
        // 2 * 16 horizontal, 2 * 9 vertical, 4 pillars of 4
        assert_eq!(level.live_objects().len(), 66);

        assert!(occupied(&level, 0, 0));
        assert!(occupied(&level, 19, 14));
        // Doorways
        for column in 8..12 {
            assert!(!occupied(&level, column, 0));
            assert!(!occupied(&level, column, 14));
        }
        for row in 5..9 {
            assert!(!occupied(&level, 0, row));
            assert!(!occupied(&level, 19, row));
        }
        // Pillars
        assert!(occupied(&level, 4, 3));
        assert!(occupied(&level, 5, 4));
        assert!(occupied(&level, 14, 10));
        assert!(occupied(&level, 15, 11));
        // Spawn cells stay clear
        assert!(!occupied(&level, 8, 7));
        assert!(!occupied(&level, 11, 7));
    }

    #[test]
    fn test_walls_block() {
        let level = carved(20, 15);
        for id in level.live_objects() {
            assert_eq!(level.entity(id).sprite.passability, Passability::Block);
        }
    }

    #[test]
    fn test_small_grid_left_open() {
        let level = carved(6, 6);
        assert!(level.live_objects().is_empty());
    }
}
