use glam::UVec2;

/// Errors raised when tilemap data is constructed with violated preconditions.
///
/// Rendering itself never fails; these only surface while building grids and
/// tilesets.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TilemapError {
    #[error("tile size must be positive and finite, got {width}x{height}")]
    InvalidTileSize { width: f32, height: f32 },
    #[error("grid of {size} tiles needs {expected} entries, got {actual}")]
    GridSizeMismatch {
        size: UVec2,
        expected: usize,
        actual: usize,
    },
    #[error("atlas must have at least one column and one row, got {columns}x{rows}")]
    EmptyAtlas { columns: u32, rows: u32 },
}
