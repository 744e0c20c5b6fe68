use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::TilemapError;
use crate::rect::Rect;
use crate::types::MaterialHandle;

/// World-space size of one tile. Both components are positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec2", into = "Vec2")]
pub struct TileSize(Vec2);

impl TileSize {
    pub fn new(width: f32, height: f32) -> Result<Self, TilemapError> {
        Self::try_from(Vec2::new(width, height))
    }

    pub fn as_vec2(self) -> Vec2 {
        self.0
    }

    pub fn width(self) -> f32 {
        self.0.x
    }

    pub fn height(self) -> f32 {
        self.0.y
    }
}

impl TryFrom<Vec2> for TileSize {
    type Error = TilemapError;

    fn try_from(size: Vec2) -> Result<Self, Self::Error> {
        if size.is_finite() && size.x > 0.0 && size.y > 0.0 {
            Ok(Self(size))
        } else {
            Err(TilemapError::InvalidTileSize {
                width: size.x,
                height: size.y,
            })
        }
    }
}

impl From<TileSize> for Vec2 {
    fn from(size: TileSize) -> Self {
        size.0
    }
}

/// Shared metadata for every tile that references the same tileset index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileInfo {
    /// Texture region in normalized coordinates.
    pub tex_coord: Rect,
    /// The tile contributes no pixels and is never submitted.
    pub is_visually_empty: bool,
    /// Base depth nudge shared by all uses of this tile, in tiles.
    pub depth_offset: i32,
    /// Upright tile: its leading edge sorts one row closer than its body.
    pub is_vertical: bool,
}

impl Default for TileInfo {
    fn default() -> Self {
        Self {
            tex_coord: Rect::UNIT,
            is_visually_empty: false,
            depth_offset: 0,
            is_vertical: false,
        }
    }
}

/// Tile metadata plus the size and material all of its tiles share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tileset {
    pub tile_size: TileSize,
    pub material: MaterialHandle,
    pub tiles: Vec<TileInfo>,
}

impl Tileset {
    pub fn new(tile_size: TileSize, material: MaterialHandle, tiles: Vec<TileInfo>) -> Self {
        Self {
            tile_size,
            material,
            tiles,
        }
    }

    /// One tile per cell of a regular `columns` x `rows` texture atlas, in
    /// row-major order.
    pub fn from_atlas(
        tile_size: TileSize,
        material: MaterialHandle,
        columns: u32,
        rows: u32,
    ) -> Result<Self, TilemapError> {
        if columns == 0 || rows == 0 {
            return Err(TilemapError::EmptyAtlas { columns, rows });
        }
        let cell_w = 1.0 / columns as f32;
        let cell_h = 1.0 / rows as f32;
        let tiles = (0..rows)
            .flat_map(|row| (0..columns).map(move |col| (col, row)))
            .map(|(col, row)| TileInfo {
                tex_coord: Rect::new(col as f32 * cell_w, row as f32 * cell_h, cell_w, cell_h),
                ..TileInfo::default()
            })
            .collect();
        Ok(Self::new(tile_size, material, tiles))
    }

    pub fn get(&self, index: u32) -> Option<&TileInfo> {
        self.tiles.get(index as usize)
    }

    pub fn get_mut(&mut self, index: u32) -> Option<&mut TileInfo> {
        self.tiles.get_mut(index as usize)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
