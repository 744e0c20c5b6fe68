//! Culling: maps a camera and a tilemap placement to the sub-rectangle of
//! tiles that can be visible, plus the world-space origin and step axes to
//! render it with.
//!
//! # Invariants
//! - Culling is a pure function of its inputs; it holds no state.
//! - `visible_start + visible_count <= tile_count` on both axes.
//! - Degenerate projections and empty windows produce a zero-count result,
//!   never an error.

mod camera;
mod culling;

pub use camera::{Camera, CameraQuery, Projection};
pub use culling::{
    CullingInput, CullingResult, MIN_PROJECTION_SCALE, SAFETY_MARGIN_TILES, cull, footprint_size,
    target_visible_tile_count,
};

pub fn crate_info() -> &'static str {
    "tilemap-cull v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("cull"));
    }
}
