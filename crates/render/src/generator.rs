use glam::{UVec2, Vec3};
use tilemap_common::TileGrid;
use tilemap_cull::CullingResult;

use crate::params::{DepthModel, RenderParams};
use crate::tilemap::TilemapView;
use crate::vertex::{Vertex, VertexBuffer};

/// Turns a culled tile window into one batch of quads.
///
/// Owns its vertex buffer; the buffer keeps its largest size across frames.
#[derive(Debug, Clone, Default)]
pub struct QuadGenerator {
    vertices: VertexBuffer,
}

/// Counts from one `generate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerateOutput {
    /// Cells inside the culled window.
    pub visited: usize,
    /// Quads written to the buffer.
    pub quads: usize,
    /// Cells skipped because their tile index is outside the tileset.
    pub stale: usize,
}

impl QuadGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices written by the last `generate` call.
    pub fn vertices(&self) -> &[Vertex] {
        self.vertices.as_slice()
    }

    pub fn buffer(&self) -> &VertexBuffer {
        &self.vertices
    }

    /// Walk the visible window row by row and emit a quad for every tile
    /// with visible content.
    ///
    /// Quad winding: 0 = origin corner, 1 = +row, 2 = +row +column,
    /// 3 = +column. Vertices 0 and 3 form the edge nearest the previous row.
    pub fn generate<G: TileGrid + ?Sized>(
        &mut self,
        tilemap: &TilemapView<'_, G>,
        culling: &CullingResult,
        params: &RenderParams,
    ) -> GenerateOutput {
        let tileset = tilemap.tileset;
        let tile_size = tilemap.tile_size();
        let depth = DepthModel::resolve(
            params,
            tile_size,
            tilemap.tile_count(),
            &tilemap.transform,
        );
        let x_step: Vec3 = (culling.x_axis_world * tile_size.x).extend(0.0);
        let y_step: Vec3 = (culling.y_axis_world * tile_size.y).extend(0.0);
        let color = params.color_tint.to_array();

        let start = culling.visible_start;
        let end = culling.visible_end();
        let mut output = GenerateOutput {
            visited: culling.cell_count(),
            ..GenerateOutput::default()
        };

        self.vertices.clear();
        self.vertices.ensure_capacity(output.visited * 4);

        for y in start.y..end.y {
            let row_offset = depth.row_offset(y);
            let mut render_pos =
                culling.render_origin_world + y_step * (y - start.y) as f32;

            for x in start.x..end.x {
                let pos = render_pos;
                render_pos += x_step;

                let Some(tile) = tilemap.grid.get(UVec2::new(x, y)) else {
                    continue;
                };
                let Some(info) = tileset.get(tile.index) else {
                    output.stale += 1;
                    continue;
                };
                if info.is_visually_empty {
                    continue;
                }

                let trailing = depth.tile_offset(row_offset, tile, info);
                let leading = depth.leading_edge_offset(trailing, info);
                let uv = info.tex_coord;
                let corner = |position: Vec3, depth_offset: f32, u: f32, v: f32| Vertex {
                    position: position.to_array(),
                    depth_offset,
                    tex_coord: [u, v],
                    color,
                };

                self.vertices.push_quad([
                    corner(pos, leading, uv.left(), uv.top()),
                    corner(pos + y_step, trailing, uv.left(), uv.bottom()),
                    corner(pos + x_step + y_step, trailing, uv.right(), uv.bottom()),
                    corner(pos + x_step, leading, uv.right(), uv.top()),
                ]);
                output.quads += 1;
            }
        }

        if output.stale > 0 {
            tracing::debug!(
                stale = output.stale,
                tileset_len = tileset.len(),
                "skipped tiles with out-of-range indices"
            );
        }
        debug_assert!(output.quads <= output.visited);
        debug_assert_eq!(self.vertices.len(), output.quads * 4);

        output
    }
}
