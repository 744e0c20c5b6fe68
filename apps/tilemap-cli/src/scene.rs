use std::path::Path;

use anyhow::Context;
use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};
use tilemap_common::{DenseTileGrid, MaterialHandle, Tile, TileSize, TilemapTransform, Tileset};
use tilemap_cull::Camera;
use tilemap_render::RenderParams;

/// Everything needed to render one tilemap from the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub camera: Camera,
    pub transform: TilemapTransform,
    pub params: RenderParams,
    pub map: MapConfig,
}

/// Procedural tilemap: tile `(x, y)` uses index `(x + y * stride) % atlas cells`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub size: UVec2,
    pub tile_size: Vec2,
    pub atlas: UVec2,
    pub material: MaterialHandle,
    pub stride: u32,
    /// Tileset indices that draw nothing.
    pub empty_tiles: Vec<u32>,
    /// Tileset indices drawn as upright tiles.
    pub vertical_tiles: Vec<u32>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: UVec2::new(64, 64),
            tile_size: Vec2::new(16.0, 16.0),
            atlas: UVec2::new(8, 8),
            material: MaterialHandle(1),
            stride: 3,
            empty_tiles: vec![0],
            vertical_tiles: Vec::new(),
        }
    }
}

impl Scene {
    /// Load a scene from a YAML file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing scene {}", path.display()))
    }

    pub fn build_map(&self) -> anyhow::Result<(DenseTileGrid, Tileset)> {
        let map = &self.map;
        let tile_size = TileSize::try_from(map.tile_size).context("invalid map.tile_size")?;
        let mut tileset = Tileset::from_atlas(tile_size, map.material, map.atlas.x, map.atlas.y)
            .context("invalid map.atlas")?;

        for &index in &map.empty_tiles {
            if let Some(info) = tileset.get_mut(index) {
                info.is_visually_empty = true;
            } else {
                tracing::warn!(index, "empty_tiles entry outside the atlas");
            }
        }
        for &index in &map.vertical_tiles {
            if let Some(info) = tileset.get_mut(index) {
                info.is_vertical = true;
            } else {
                tracing::warn!(index, "vertical_tiles entry outside the atlas");
            }
        }

        let cells = tileset.len() as u64;
        let tiles = (0..map.size.y)
            .flat_map(|y| (0..map.size.x).map(move |x| (x, y)))
            .map(|(x, y)| {
                let index = (x as u64 + y as u64 * map.stride as u64) % cells;
                Tile::new(index as u32)
            })
            .collect();
        let grid = DenseTileGrid::from_tiles(map.size, tiles)?;

        tracing::debug!(size = ?map.size, tileset = tileset.len(), "built scene map");
        Ok((grid, tileset))
    }
}
