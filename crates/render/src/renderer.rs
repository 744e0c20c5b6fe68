use glam::{IVec2, UVec2, Vec2};
use serde::{Deserialize, Serialize};
use tilemap_common::{Rect, TileGrid};
use tilemap_cull::{CameraQuery, CullingResult, cull};

use crate::generator::QuadGenerator;
use crate::params::{DepthModel, RenderParams, TilePickMode};
use crate::sink::QuadSink;
use crate::tilemap::TilemapView;
use crate::vertex::Vertex;

/// Per-frame numbers from one tilemap render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameStats {
    pub visible_start: UVec2,
    pub visible_count: UVec2,
    /// Cells inside the culled window.
    pub visited_tiles: usize,
    /// Quads submitted. Empty and stale cells are not counted.
    pub emitted_quads: usize,
    pub stale_tiles: usize,
    pub vertex_count: usize,
    /// Vertices the reusable buffer holds without reallocating.
    pub buffer_capacity: usize,
}

impl std::fmt::Display for FrameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tiles: window=({}, {})+({}, {}) visited={} emitted={} stale={} vertices={} capacity={}",
            self.visible_start.x,
            self.visible_start.y,
            self.visible_count.x,
            self.visible_count.y,
            self.visited_tiles,
            self.emitted_quads,
            self.stale_tiles,
            self.vertex_count,
            self.buffer_capacity
        )
    }
}

/// Draws tilemaps as a single culled batch per frame.
///
/// One renderer owns one vertex buffer. Renderers that draw in parallel must
/// each have their own instance.
#[derive(Debug, Clone, Default)]
pub struct TilemapRenderer {
    pub params: RenderParams,
    generator: QuadGenerator,
}

impl TilemapRenderer {
    pub fn new(params: RenderParams) -> Self {
        Self {
            params,
            generator: QuadGenerator::new(),
        }
    }

    /// Vertices generated by the last `render` call.
    pub fn vertices(&self) -> &[Vertex] {
        self.generator.vertices()
    }

    /// Visible tile window of `tilemap` as seen through `camera`.
    pub fn cull<C, G>(&self, camera: &C, tilemap: &TilemapView<'_, G>) -> CullingResult
    where
        C: CameraQuery + ?Sized,
        G: TileGrid + ?Sized,
    {
        cull(camera, &tilemap.culling_input(self.params.origin))
    }

    /// Cull, generate and submit one frame of `tilemap`.
    ///
    /// `sink` receives exactly one submission, even when nothing is visible.
    pub fn render<C, G, S>(
        &mut self,
        camera: &C,
        tilemap: &TilemapView<'_, G>,
        sink: &mut S,
    ) -> FrameStats
    where
        C: CameraQuery + ?Sized,
        G: TileGrid + ?Sized,
        S: QuadSink + ?Sized,
    {
        let _span = tracing::trace_span!("tilemap_render").entered();

        let culling = self.cull(camera, tilemap);
        let output = self.generator.generate(tilemap, &culling, &self.params);
        let vertices = self.generator.vertices();

        sink.record_counts(output.quads, vertices.len());
        sink.submit_quads(tilemap.tileset.material, vertices, output.quads);

        let stats = FrameStats {
            visible_start: culling.visible_start,
            visible_count: culling.visible_count,
            visited_tiles: output.visited,
            emitted_quads: output.quads,
            stale_tiles: output.stale,
            vertex_count: vertices.len(),
            buffer_capacity: self.generator.buffer().capacity(),
        };
        tracing::trace!(
            visited = stats.visited_tiles,
            emitted = stats.emitted_quads,
            vertices = stats.vertex_count,
            "tilemap render complete"
        );
        stats
    }

    /// Local rect of `tilemap` under this renderer's origin alignment.
    pub fn local_rect<G: TileGrid + ?Sized>(&self, tilemap: &TilemapView<'_, G>) -> Rect {
        tilemap.local_rect(self.params.origin)
    }

    /// Tile under local position `pos`.
    ///
    /// `Reject` yields `None` outside `[0, tile_count)`; `Clamp` snaps to the
    /// nearest edge tile (`None` only for an empty grid); `Free` returns the
    /// raw, possibly negative index.
    pub fn tile_at_local_position<G: TileGrid + ?Sized>(
        &self,
        tilemap: &TilemapView<'_, G>,
        pos: Vec2,
        mode: TilePickMode,
    ) -> Option<IVec2> {
        let rect = self.local_rect(tilemap);
        if mode == TilePickMode::Reject && !rect.contains(pos) {
            return None;
        }

        let tile = ((pos - rect.top_left()) / tilemap.tile_size())
            .floor()
            .as_ivec2();
        if mode == TilePickMode::Free {
            return Some(tile);
        }

        let count = tilemap.tile_count();
        if count.x == 0 || count.y == 0 {
            return None;
        }
        Some(tile.clamp(IVec2::ZERO, count.as_ivec2() - IVec2::ONE))
    }

    /// Local position of the top-left corner of `tile`.
    pub fn local_position_at_tile<G: TileGrid + ?Sized>(
        &self,
        tilemap: &TilemapView<'_, G>,
        tile: IVec2,
    ) -> Vec2 {
        self.local_rect(tilemap).top_left() + tile.as_vec2() * tilemap.tile_size()
    }

    /// Depth offset the batch path assigns to `tile`'s trailing edge.
    ///
    /// Cells outside the grid or with stale indices report their row depth
    /// without per-tile offsets.
    pub fn depth_offset_at_tile<G: TileGrid + ?Sized>(
        &self,
        tilemap: &TilemapView<'_, G>,
        tile: UVec2,
    ) -> f32 {
        let depth = DepthModel::resolve(
            &self.params,
            tilemap.tile_size(),
            tilemap.tile_count(),
            &tilemap.transform,
        );
        let row_offset = depth.row_offset(tile.y);
        let content = tilemap
            .grid
            .get(tile)
            .and_then(|t| tilemap.tileset.get(t.index).map(|info| (t, info)));
        match content {
            Some((t, info)) => depth.tile_offset(row_offset, t, info),
            None => row_offset,
        }
    }
}
