//! Tile grid and solid geometry
//!
//! A level is a rectangular grid of `u8` cells. Cell value 0 is empty; any
//! nonzero value is solid. Solids are pre-baked into a rect list at
//! construction so the per-tick collision loops never touch the grid.

use serde::{Deserialize, Serialize};

use crate::consts::{FALLBACK_FLOOR_INSET, TILE_SIZE};
use crate::sim::body::Aabb;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Row-major tile grid; `grid[row][col]`, nonzero = solid
    pub grid: Vec<Vec<u8>>,
    pub tile_size: i32,
    /// Baked solid rects in row-major scan order
    pub solids: Vec<Aabb>,
    pub width_tiles: usize,
    pub height_tiles: usize,
}

impl Level {
    pub fn new(grid: Vec<Vec<u8>>) -> Self {
        Self::with_tile_size(grid, TILE_SIZE)
    }

    pub fn with_tile_size(grid: Vec<Vec<u8>>, tile_size: i32) -> Self {
        let height_tiles = grid.len();
        let width_tiles = grid.first().map_or(0, |row| row.len());
        let mut solids = Vec::new();
        for (row, cells) in grid.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell != 0 {
                    solids.push(Aabb::new(
                        col as i32 * tile_size,
                        row as i32 * tile_size,
                        tile_size,
                        tile_size,
                    ));
                }
            }
        }
        Self { grid, tile_size, solids, width_tiles, height_tiles }
    }

    /// All-empty grid of the given tile dimensions
    pub fn empty(width_tiles: usize, height_tiles: usize) -> Self {
        Self::new(vec![vec![0; width_tiles]; height_tiles])
    }

    #[inline]
    pub fn pixel_width(&self) -> i32 {
        self.width_tiles as i32 * self.tile_size
    }

    #[inline]
    pub fn pixel_height(&self) -> i32 {
        self.height_tiles as i32 * self.tile_size
    }

    /// Top of the implicit floor band used when the grid has no solids
    #[inline]
    pub fn floor_y(&self) -> f32 {
        (self.pixel_height() - FALLBACK_FLOOR_INSET) as f32
    }

    #[inline]
    pub fn has_solids(&self) -> bool {
        !self.solids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solids_baked_from_nonzero_cells() {
        let level = Level::new(vec![
            vec![0, 0, 0],
            vec![0, 2, 0],
            vec![1, 1, 1],
        ]);
        assert_eq!(level.solids.len(), 4);
        assert_eq!(level.solids[0], Aabb::new(TILE_SIZE, TILE_SIZE, TILE_SIZE, TILE_SIZE));
        assert_eq!(level.pixel_width(), 3 * TILE_SIZE);
        assert_eq!(level.pixel_height(), 3 * TILE_SIZE);
    }

    #[test]
    fn test_empty_level_uses_fallback_floor() {
        let level = Level::empty(20, 15);
        assert!(!level.has_solids());
        assert_eq!(level.floor_y(), (15 * TILE_SIZE - FALLBACK_FLOOR_INSET) as f32);
    }
}
