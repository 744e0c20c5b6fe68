use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};
use tilemap_common::{Alignment, Color, Tile, TileInfo, TilemapTransform, align_rect};

/// How tile depth offsets are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileDepthMode {
    /// Every tile shares the renderer's depth offset.
    #[default]
    Flat,
    /// Rows sort by their position within the tilemap.
    Local,
    /// Rows sort by their world Y, so separate tilemaps interleave.
    World,
}

/// What a position outside the tilemap resolves to when picking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TilePickMode {
    /// Outside positions pick nothing.
    #[default]
    Reject,
    /// Outside positions pick the nearest edge tile.
    Clamp,
    /// Indices are returned as computed, possibly out of range.
    Free,
}

/// Per-renderer settings, loadable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    pub color_tint: Color,
    /// Anchor of the tilemap rect relative to its transform.
    pub origin: Alignment,
    /// Depth offset shared by the whole tilemap.
    pub depth_offset: f32,
    /// Extra depth offset, in tiles.
    pub tile_depth_offset: i32,
    /// Depth units per world unit of row height.
    pub tile_depth_scale: f32,
    pub tile_depth_mode: TileDepthMode,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            color_tint: Color::WHITE,
            origin: Alignment::TopLeft,
            depth_offset: 0.0,
            tile_depth_offset: 0,
            tile_depth_scale: 0.01,
            tile_depth_mode: TileDepthMode::Flat,
        }
    }
}

/// Depth terms resolved once per frame, so the per-tile loop never branches
/// on the depth mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DepthModel {
    /// Depth delta between consecutive rows. Zero in flat mode.
    pub depth_per_tile: f32,
    /// Depth of row zero before per-tile offsets.
    pub base_offset: f32,
}

impl DepthModel {
    pub fn resolve(
        params: &RenderParams,
        tile_size: Vec2,
        tile_count: UVec2,
        transform: &TilemapTransform,
    ) -> Self {
        let (depth_per_tile, origin_rows) = match params.tile_depth_mode {
            TileDepthMode::Flat => (0.0, 0.0),
            TileDepthMode::Local => (
                -tile_size.y * transform.scale * params.tile_depth_scale,
                origin_rows(params.origin, tile_size, tile_count),
            ),
            TileDepthMode::World => (
                -tile_size.y * transform.scale * params.tile_depth_scale,
                origin_rows(params.origin, tile_size, tile_count)
                    + transform.position.y / tile_size.y,
            ),
        };
        Self {
            depth_per_tile,
            base_offset: params.depth_offset
                + params.tile_depth_offset as f32 * depth_per_tile
                + origin_rows * depth_per_tile,
        }
    }

    /// Depth of every tile in grid row `row`, before per-tile offsets.
    pub fn row_offset(&self, row: u32) -> f32 {
        self.base_offset + row as f32 * self.depth_per_tile
    }

    /// Depth of a tile's trailing edge (vertices 1 and 2).
    pub fn tile_offset(&self, row_offset: f32, tile: Tile, info: &TileInfo) -> f32 {
        let tiles = tile.depth_offset as f32 + info.depth_offset as f32;
        row_offset + tiles * self.depth_per_tile
    }

    /// Depth of a tile's leading edge (vertices 0 and 3). Vertical tiles
    /// sort one row ahead there.
    pub fn leading_edge_offset(&self, tile_offset: f32, info: &TileInfo) -> f32 {
        if info.is_vertical {
            tile_offset + self.depth_per_tile
        } else {
            tile_offset
        }
    }
}

/// Rows between the tilemap's top edge and its transform origin.
fn origin_rows(origin: Alignment, tile_size: Vec2, tile_count: UVec2) -> f32 {
    let height = tile_count.y as f32 * tile_size.y;
    align_rect(origin, 0.0, 0.0, 0.0, height).y / tile_size.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const TILE: Vec2 = Vec2::splat(16.0);
    const COUNT: UVec2 = UVec2::new(10, 10);

    fn params(mode: TileDepthMode) -> RenderParams {
        RenderParams {
            tile_depth_mode: mode,
            ..RenderParams::default()
        }
    }

    #[test]
    fn defaults() {
        let p = RenderParams::default();
        assert_eq!(p.tile_depth_mode, TileDepthMode::Flat);
        assert_eq!(p.origin, Alignment::TopLeft);
        assert_eq!(p.tile_depth_scale, 0.01);
        assert_eq!(TilePickMode::default(), TilePickMode::Reject);
    }

    #[test]
    fn flat_mode_ignores_rows() {
        let mut p = params(TileDepthMode::Flat);
        p.depth_offset = 4.0;
        p.tile_depth_offset = 7;
        let model = DepthModel::resolve(&p, TILE, COUNT, &TilemapTransform::default());
        assert_eq!(model.depth_per_tile, 0.0);
        assert_eq!(model.row_offset(0), 4.0);
        assert_eq!(model.row_offset(9), 4.0);
    }

    #[test]
    fn local_mode_rows_move_toward_viewer() {
        let model = DepthModel::resolve(
            &params(TileDepthMode::Local),
            TILE,
            COUNT,
            &TilemapTransform::default(),
        );
        assert!((model.depth_per_tile + 0.16).abs() < 1e-6);
        for row in 0..9 {
            assert!(model.row_offset(row + 1) < model.row_offset(row));
        }
    }

    #[test]
    fn local_mode_scales_with_tilemap() {
        let transform = TilemapTransform {
            scale: 2.0,
            ..TilemapTransform::default()
        };
        let model = DepthModel::resolve(&params(TileDepthMode::Local), TILE, COUNT, &transform);
        assert!((model.depth_per_tile + 0.32).abs() < 1e-6);
    }

    #[test]
    fn centered_origin_shifts_by_half_the_rows() {
        let transform = TilemapTransform::default();
        let top_left = DepthModel::resolve(&params(TileDepthMode::Local), TILE, COUNT, &transform);
        let mut centered = params(TileDepthMode::Local);
        centered.origin = Alignment::Center;
        let centered = DepthModel::resolve(&centered, TILE, COUNT, &transform);

        assert_eq!(top_left.base_offset, 0.0);
        // Five rows above the origin, each -0.16 deep.
        assert!((centered.base_offset - 0.8).abs() < 1e-5);
        assert!((centered.row_offset(5) - 0.0).abs() < 1e-5);
    }

    #[test]
    fn world_mode_adds_world_rows() {
        let transform = TilemapTransform::from_position(Vec3::new(0.0, 160.0, 0.0));
        let local = DepthModel::resolve(&params(TileDepthMode::Local), TILE, COUNT, &transform);
        let world = DepthModel::resolve(&params(TileDepthMode::World), TILE, COUNT, &transform);
        assert_eq!(local.depth_per_tile, world.depth_per_tile);
        assert!((world.base_offset - local.base_offset + 1.6).abs() < 1e-5);
    }

    #[test]
    fn tile_offsets_and_vertical_edge() {
        let model = DepthModel {
            depth_per_tile: -0.5,
            base_offset: 1.0,
        };
        let tile = Tile::new(0).with_depth_offset(2);
        let info = TileInfo {
            depth_offset: 1,
            is_vertical: true,
            ..TileInfo::default()
        };
        let trailing = model.tile_offset(model.row_offset(2), tile, &info);
        assert_eq!(trailing, 1.0 - 1.0 - 1.5);
        assert_eq!(model.leading_edge_offset(trailing, &info), trailing - 0.5);

        let flat = TileInfo::default();
        assert_eq!(model.leading_edge_offset(trailing, &flat), trailing);
    }
}
