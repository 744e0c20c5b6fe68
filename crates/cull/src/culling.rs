use std::f32::consts::TAU;

use glam::{I64Vec2, UVec2, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tilemap_common::rotate_scale;

use crate::camera::CameraQuery;

/// Projection scales at or below this are treated as "too far to draw".
pub const MIN_PROJECTION_SCALE: f32 = 1e-9;

/// Extra tiles per axis added to the visible window. Covers the centering
/// off-by-one, rounding at grid edges and diagonal coverage under rotation.
pub const SAFETY_MARGIN_TILES: i64 = 3;

/// Snapshot of a tilemap's placement, taken once per culling call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CullingInput {
    /// World position of the grid's (0, 0) tile corner.
    pub tilemap_pos: Vec3,
    pub tilemap_scale: f32,
    pub tilemap_angle: f32,
    pub tile_size: Vec2,
    pub tile_count: UVec2,
}

/// The visible tile window and the world-space frame to render it in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CullingResult {
    pub visible_start: UVec2,
    pub visible_count: UVec2,
    /// World position of the `visible_start` tile corner.
    pub render_origin_world: Vec3,
    /// One tile column step in world space, before multiplying by tile width.
    pub x_axis_world: Vec2,
    /// One tile row step in world space, before multiplying by tile height.
    pub y_axis_world: Vec2,
}

impl CullingResult {
    fn empty(origin: Vec3, x_axis_world: Vec2, y_axis_world: Vec2) -> Self {
        Self {
            visible_start: UVec2::ZERO,
            visible_count: UVec2::ZERO,
            render_origin_world: origin,
            x_axis_world,
            y_axis_world,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.visible_count.x == 0 || self.visible_count.y == 0
    }

    /// One past the last visible tile on each axis.
    pub fn visible_end(&self) -> UVec2 {
        self.visible_start + self.visible_count
    }

    /// Number of cells inside the visible window.
    pub fn cell_count(&self) -> usize {
        self.visible_count.x as usize * self.visible_count.y as usize
    }

    pub fn contains(&self, tile: UVec2) -> bool {
        tile.cmpge(self.visible_start).all() && tile.cmplt(self.visible_end()).all()
    }
}

/// Bounding box, in pixels, of a `target_size` viewport seen at
/// `visual_angle` relative to the tile grid.
pub fn footprint_size(target_size: Vec2, visual_angle: f32) -> Vec2 {
    // Whole turns must reduce to exactly zero, or ceil() downstream flips.
    let (sin, cos) = visual_angle.rem_euclid(TAU).sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Vec2::new(
        target_size.y * sin + target_size.x * cos,
        target_size.x * sin + target_size.y * cos,
    )
}

/// Tiles per axis needed to cover a pixel `footprint`, including the safety
/// margin.
pub fn target_visible_tile_count(
    footprint: Vec2,
    projection_scale: f32,
    tile_size: Vec2,
    tilemap_scale: f32,
) -> UVec2 {
    target_count(footprint, projection_scale, tile_size, tilemap_scale)
        .clamp(I64Vec2::ZERO, I64Vec2::splat(u32::MAX as i64))
        .as_uvec2()
}

fn target_count(footprint: Vec2, projection_scale: f32, tile_size: Vec2, tilemap_scale: f32) -> I64Vec2 {
    let local_bounds = footprint / projection_scale;
    let tile_extent = tile_size.min_element() * tilemap_scale;
    // Float-to-int casts saturate; keep the margin from wrapping past i64::MAX.
    (local_bounds / tile_extent)
        .ceil()
        .as_i64vec2()
        .saturating_add(I64Vec2::splat(SAFETY_MARGIN_TILES))
}

/// Compute the window of tiles that can be visible through `camera`.
///
/// Works entirely in the tilemap's own grid space: the view center is
/// projected onto the grid axes to find the center tile, and the rotated
/// viewport's bounding box sizes the window around it.
pub fn cull<C: CameraQuery + ?Sized>(camera: &C, input: &CullingInput) -> CullingResult {
    let z = input.tilemap_pos.z;
    let scale_at_depth = camera.scale_at_depth(z);

    // Too small (or behind the camera) to render even a single tile.
    if scale_at_depth.is_nan() || scale_at_depth <= MIN_PROJECTION_SCALE {
        tracing::trace!(scale_at_depth, "tilemap culled: degenerate projection");
        return CullingResult::empty(input.tilemap_pos, Vec2::ZERO, Vec2::ZERO);
    }
    let degenerate = input.tile_size.is_nan()
        || input.tile_size.min_element() <= 0.0
        || input.tilemap_scale.is_nan()
        || input.tilemap_scale <= 0.0;
    if degenerate {
        tracing::debug!(
            tile_size = ?input.tile_size,
            tilemap_scale = input.tilemap_scale,
            "tilemap culled: degenerate tile size or scale"
        );
        return CullingResult::empty(input.tilemap_pos, Vec2::ZERO, Vec2::ZERO);
    }

    let x_axis_world = rotate_scale(Vec2::X, input.tilemap_angle, input.tilemap_scale);
    let y_axis_world = rotate_scale(Vec2::Y, input.tilemap_angle, input.tilemap_scale);

    let center_tile = {
        let view_center = camera.world_pos_at(camera.target_size() * 0.5, z);
        let offset = (view_center - input.tilemap_pos).truncate();
        let local = Vec2::new(
            offset.dot(x_axis_world.normalize()),
            offset.dot(y_axis_world.normalize()),
        ) / input.tilemap_scale;
        (local / input.tile_size).floor().as_i64vec2()
    };

    let footprint = footprint_size(
        camera.target_size(),
        input.tilemap_angle - camera.viewer_angle(),
    );
    let target = target_count(footprint, scale_at_depth, input.tile_size, input.tilemap_scale);

    let tile_count = input.tile_count.as_i64vec2();
    let start = center_tile.saturating_sub(target / 2).max(I64Vec2::ZERO);
    let end = center_tile.saturating_add(target / 2).min(tile_count);
    let count = end.saturating_sub(start).clamp(I64Vec2::ZERO, tile_count);

    if count.x == 0 || count.y == 0 {
        tracing::trace!(?center_tile, ?target, "tilemap culled: window outside grid");
        return CullingResult::empty(input.tilemap_pos, x_axis_world, y_axis_world);
    }

    // A non-empty count implies start < end <= tile_count.
    let visible_start = start.as_uvec2();
    let visible_count = count.as_uvec2();
    let render_origin_world = input.tilemap_pos
        + (x_axis_world * input.tile_size.x * visible_start.x as f32
            + y_axis_world * input.tile_size.y * visible_start.y as f32)
            .extend(0.0);

    tracing::trace!(?visible_start, ?visible_count, "tilemap culled");

    CullingResult {
        visible_start,
        visible_count,
        render_origin_world,
        x_axis_world,
        y_axis_world,
    }
}
