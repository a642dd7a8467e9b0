//! Grid geometry
//!
//! Pure conversions between board pixels and (row, col) tile addresses.
//! Row 0 is the top lane; column 0 is the defender's side (x = 0).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{COLS, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, ROWS};

/// A tile address on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
}

impl Tile {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the address lies on the grid
    pub fn in_bounds(&self) -> bool {
        self.row < ROWS && self.col < COLS
    }
}

/// Current board dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width: f32,
    pub height: f32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
        }
    }
}

impl Board {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Tile (width, height) in pixels
    #[inline]
    pub fn tile_size(&self) -> (f32, f32) {
        tile_size(self.width, self.height)
    }

    #[inline]
    pub fn tile_width(&self) -> f32 {
        self.width / COLS as f32
    }

    /// Tile containing a pixel, or `None` if the point is off the grid
    pub fn to_tile(&self, x: f32, y: f32) -> Option<Tile> {
        let (tile_w, tile_h) = self.tile_size();
        let row = lane_index(y, tile_h, ROWS)?;
        let col = lane_index(x, tile_w, COLS)?;
        Some(Tile::new(row, col))
    }

    /// Column an x coordinate falls in, if any
    pub fn column_at(&self, x: f32) -> Option<usize> {
        lane_index(x, self.tile_width(), COLS)
    }

    /// Pixel center of a tile
    pub fn tile_center(&self, tile: Tile) -> Vec2 {
        debug_assert!(tile.in_bounds(), "tile {tile:?} outside grid");
        let (tile_w, tile_h) = self.tile_size();
        Vec2::new(
            tile.col as f32 * tile_w + tile_w * 0.5,
            tile.row as f32 * tile_h + tile_h * 0.5,
        )
    }

    /// Left edge x of a column
    #[inline]
    pub fn column_left(&self, col: usize) -> f32 {
        col as f32 * self.tile_width()
    }
}

/// Tile (width, height) for a board of the given size
#[inline]
pub fn tile_size(board_width: f32, board_height: f32) -> (f32, f32) {
    (board_width / COLS as f32, board_height / ROWS as f32)
}

fn lane_index(coord: f32, span: f32, count: usize) -> Option<usize> {
    if !coord.is_finite() || coord < 0.0 {
        return None;
    }
    let index = (coord / span).floor() as usize;
    (index < count).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_size_default_board() {
        let board = Board::default();
        let (w, h) = board.tile_size();
        assert!((w - 1200.0 / 9.0).abs() < 1e-4);
        assert!((h - 140.0).abs() < 1e-4);
    }

    #[test]
    fn test_to_tile_and_center_agree() {
        let board = Board::new(900.0, 500.0);
        let center = board.tile_center(Tile::new(2, 3));
        assert_eq!(center, Vec2::new(350.0, 250.0));
        assert_eq!(board.to_tile(center.x, center.y), Some(Tile::new(2, 3)));
    }

    #[test]
    fn test_off_grid_points() {
        let board = Board::new(900.0, 500.0);
        assert_eq!(board.to_tile(-1.0, 10.0), None);
        assert_eq!(board.to_tile(900.0, 10.0), None);
        assert_eq!(board.column_at(960.0), None);
        assert_eq!(board.column_at(0.0), Some(0));
        assert_eq!(board.column_at(899.9), Some(8));
    }
}
