use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A handle referencing the material a tile batch is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MaterialHandle(pub u64);

/// Content of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    /// Index into the tileset.
    pub index: u32,
    /// Author-supplied depth nudge, in tiles.
    pub depth_offset: i32,
}

impl Tile {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            depth_offset: 0,
        }
    }

    pub fn with_depth_offset(mut self, depth_offset: i32) -> Self {
        self.depth_offset = depth_offset;
        self
    }
}

/// Linear RGBA color applied uniformly to every vertex of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Placement of a tilemap in the world: position, uniform scale, rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilemapTransform {
    pub position: Vec3,
    pub scale: f32,
    /// Rotation around the view axis, in radians.
    pub angle: f32,
}

impl Default for TilemapTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
            angle: 0.0,
        }
    }
}

impl TilemapTransform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Map a local-space vector into world space, ignoring translation.
    pub fn transform_vector(&self, local: Vec2) -> Vec2 {
        rotate_scale(local, self.angle, self.scale)
    }
}

/// Rotate `v` by `angle` radians, then scale it uniformly.
pub fn rotate_scale(v: Vec2, angle: f32, scale: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v) * scale
}
