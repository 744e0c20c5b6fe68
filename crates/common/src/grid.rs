use glam::UVec2;
use serde::{Deserialize, Serialize};

use crate::error::TilemapError;
use crate::types::Tile;

/// Read access to a 2D grid of tiles.
///
/// Renderers borrow the grid for the duration of a frame; they never copy it.
pub trait TileGrid {
    /// Grid extent as (columns, rows).
    fn tile_count(&self) -> UVec2;

    /// Tile at `pos`, or `None` when `pos` lies outside the grid.
    fn get(&self, pos: UVec2) -> Option<Tile>;
}

impl<G: TileGrid + ?Sized> TileGrid for &G {
    fn tile_count(&self) -> UVec2 {
        (**self).tile_count()
    }

    fn get(&self, pos: UVec2) -> Option<Tile> {
        (**self).get(pos)
    }
}

/// Row-major tile storage with a fixed extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseTileGrid {
    size: UVec2,
    tiles: Vec<Tile>,
}

impl DenseTileGrid {
    /// Create a grid of `size` tiles, all set to `Tile::default()`.
    pub fn new(size: UVec2) -> Self {
        Self {
            size,
            tiles: vec![Tile::default(); size.x as usize * size.y as usize],
        }
    }

    /// Wrap existing row-major tile data.
    pub fn from_tiles(size: UVec2, tiles: Vec<Tile>) -> Result<Self, TilemapError> {
        let expected = size.x as usize * size.y as usize;
        if tiles.len() != expected {
            return Err(TilemapError::GridSizeMismatch {
                size,
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self { size, tiles })
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Overwrite the tile at `pos`. Returns false if `pos` is out of bounds.
    pub fn set(&mut self, pos: UVec2, tile: Tile) -> bool {
        match self.offset(pos) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Set every cell to `tile`.
    pub fn fill(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    fn offset(&self, pos: UVec2) -> Option<usize> {
        if pos.x < self.size.x && pos.y < self.size.y {
            Some(pos.y as usize * self.size.x as usize + pos.x as usize)
        } else {
            None
        }
    }
}

impl TileGrid for DenseTileGrid {
    fn tile_count(&self) -> UVec2 {
        self.size
    }

    fn get(&self, pos: UVec2) -> Option<Tile> {
        self.offset(pos).map(|i| self.tiles[i])
    }
}
