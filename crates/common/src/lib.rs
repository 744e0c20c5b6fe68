//! Shared types for tilemap rendering: tile records, tilesets, grid storage,
//! placement transforms and alignment math.
//!
//! # Invariants
//! - Tile sizes are strictly positive and finite once constructed.
//! - Grid storage is row-major and always holds `columns * rows` tiles.
//! - Rows grow along the local +Y axis; "top" is the smaller Y coordinate.

mod error;
mod grid;
mod rect;
mod tileset;
mod types;

pub use error::TilemapError;
pub use grid::{DenseTileGrid, TileGrid};
pub use rect::{Alignment, Rect, align_rect};
pub use tileset::{TileInfo, TileSize, Tileset};
pub use types::{Color, MaterialHandle, Tile, TilemapTransform, rotate_scale};

pub fn crate_info() -> &'static str {
    "tilemap-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
