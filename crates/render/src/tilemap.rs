use glam::{UVec2, Vec2};
use tilemap_common::{Alignment, Rect, TileGrid, TilemapTransform, Tileset, align_rect};
use tilemap_cull::CullingInput;

/// Borrowed view of everything needed to draw one tilemap for one frame.
pub struct TilemapView<'a, G: ?Sized> {
    pub grid: &'a G,
    pub tileset: &'a Tileset,
    pub transform: TilemapTransform,
}

impl<G: ?Sized> Clone for TilemapView<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized> Copy for TilemapView<'_, G> {}

impl<'a, G: TileGrid + ?Sized> TilemapView<'a, G> {
    pub fn new(grid: &'a G, tileset: &'a Tileset, transform: TilemapTransform) -> Self {
        Self {
            grid,
            tileset,
            transform,
        }
    }

    pub fn tile_count(&self) -> UVec2 {
        self.grid.tile_count()
    }

    pub fn tile_size(&self) -> Vec2 {
        self.tileset.tile_size.as_vec2()
    }

    /// Unscaled, unrotated rect of the whole tilemap, anchored at `origin`.
    pub fn local_rect(&self, origin: Alignment) -> Rect {
        let size = self.tile_count().as_vec2() * self.tile_size();
        align_rect(origin, 0.0, 0.0, size.x, size.y)
    }

    /// Placement snapshot for culling. The culled grid starts at the world
    /// position of the local rect's top-left corner.
    pub fn culling_input(&self, origin: Alignment) -> CullingInput {
        let top_left = self.transform.transform_vector(self.local_rect(origin).top_left());
        CullingInput {
            tilemap_pos: self.transform.position + top_left.extend(0.0),
            tilemap_scale: self.transform.scale,
            tilemap_angle: self.transform.angle,
            tile_size: self.tile_size(),
            tile_count: self.tile_count(),
        }
    }
}
