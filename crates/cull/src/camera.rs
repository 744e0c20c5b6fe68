use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// What culling needs to know about the viewer.
pub trait CameraQuery {
    /// Uniform projection scale (pixels per world unit) at depth `z`.
    fn scale_at_depth(&self, z: f32) -> f32;

    /// World position shown at viewport `pixel`, on the plane at depth `z`.
    fn world_pos_at(&self, pixel: Vec2, z: f32) -> Vec3;

    /// Viewport size in pixels.
    fn target_size(&self) -> Vec2;

    /// Viewer rotation around the view axis, in radians.
    fn viewer_angle(&self) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    /// Scale is `zoom` at every depth.
    Orthographic,
    /// Scale falls off with distance: `zoom * focus_dist / (z - camera.z)`.
    #[default]
    Perspective,
}

/// 2D camera looking down +Z with rotation, zoom and parallax depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Vec3,
    pub angle: f32,
    pub zoom: f32,
    /// Distance at which perspective scale equals `zoom`.
    pub focus_dist: f32,
    /// Planes at or closer than this are behind the camera.
    pub near: f32,
    pub target_size: Vec2,
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -500.0),
            angle: 0.0,
            zoom: 1.0,
            focus_dist: 500.0,
            near: 50.0,
            target_size: Vec2::new(800.0, 600.0),
            projection: Projection::Perspective,
        }
    }
}

impl Camera {
    /// Orthographic camera at the origin with unit zoom.
    pub fn orthographic(target_size: Vec2) -> Self {
        Self {
            position: Vec3::ZERO,
            target_size,
            projection: Projection::Orthographic,
            ..Self::default()
        }
    }

    /// Move in view space, so "right" follows the camera's rotation.
    pub fn pan(&mut self, delta: Vec2) {
        let world = Vec2::from_angle(self.angle).rotate(delta);
        self.position += world.extend(0.0);
    }

    pub fn rotate(&mut self, delta: f32) {
        self.angle += delta;
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).max(f32::EPSILON);
    }

    /// Viewport pixel that shows `world`. Inverse of `world_pos_at` for the
    /// plane at `world.z`.
    pub fn pixel_at(&self, world: Vec3) -> Vec2 {
        let scale = self.scale_at_depth(world.z);
        let offset = (world - self.position).truncate();
        let view = Vec2::from_angle(-self.angle).rotate(offset) * scale;
        view + self.target_size * 0.5
    }
}

impl CameraQuery for Camera {
    fn scale_at_depth(&self, z: f32) -> f32 {
        match self.projection {
            Projection::Orthographic => self.zoom,
            Projection::Perspective => {
                let depth = z - self.position.z;
                if depth <= self.near {
                    0.0
                } else {
                    self.zoom * self.focus_dist / depth
                }
            }
        }
    }

    fn world_pos_at(&self, pixel: Vec2, z: f32) -> Vec3 {
        let scale = self.scale_at_depth(z);
        if scale <= f32::EPSILON {
            return self.position.truncate().extend(z);
        }
        let view = (pixel - self.target_size * 0.5) / scale;
        let offset = Vec2::from_angle(self.angle).rotate(view);
        (self.position.truncate() + offset).extend(z)
    }

    fn target_size(&self) -> Vec2 {
        self.target_size
    }

    fn viewer_angle(&self) -> f32 {
        self.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn default_camera_sees_origin_plane_at_unit_scale() {
        let cam = Camera::default();
        assert_eq!(cam.scale_at_depth(0.0), 1.0);
        assert_eq!(cam.scale_at_depth(500.0), 0.5);
    }

    #[test]
    fn perspective_scale_is_zero_behind_near_plane() {
        let cam = Camera::default();
        assert_eq!(cam.scale_at_depth(-500.0), 0.0);
        assert_eq!(cam.scale_at_depth(-460.0), 0.0);
        assert_eq!(cam.scale_at_depth(-1000.0), 0.0);
    }

    #[test]
    fn orthographic_scale_ignores_depth() {
        let mut cam = Camera::orthographic(Vec2::new(320.0, 240.0));
        cam.zoom = 2.0;
        assert_eq!(cam.scale_at_depth(-1000.0), 2.0);
        assert_eq!(cam.scale_at_depth(1000.0), 2.0);
    }

    #[test]
    fn view_center_maps_to_camera_position() {
        let mut cam = Camera::orthographic(Vec2::new(320.0, 240.0));
        cam.position = Vec3::new(10.0, -20.0, 0.0);
        cam.angle = 1.2;
        let center = cam.world_pos_at(cam.target_size * 0.5, 7.0);
        assert_eq!(center, Vec3::new(10.0, -20.0, 7.0));
    }

    #[test]
    fn world_pos_follows_rotation_and_zoom() {
        let mut cam = Camera::orthographic(Vec2::new(100.0, 100.0));
        cam.zoom = 2.0;
        cam.angle = FRAC_PI_2;
        // 20 pixels right of center is 10 world units along the rotated X axis.
        let p = cam.world_pos_at(Vec2::new(70.0, 50.0), 0.0);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 10.0, 0.0), 1e-5));
    }

    #[test]
    fn pixel_at_inverts_world_pos_at() {
        let mut cam = Camera::default();
        cam.position = Vec3::new(30.0, 40.0, -500.0);
        cam.angle = 0.7;
        cam.zoom = 1.5;
        let pixel = Vec2::new(123.0, 456.0);
        let world = cam.world_pos_at(pixel, 100.0);
        assert!(cam.pixel_at(world).abs_diff_eq(pixel, 1e-3));
    }

    #[test]
    fn pan_moves_in_view_space() {
        let mut cam = Camera::orthographic(Vec2::splat(100.0));
        cam.rotate(FRAC_PI_2);
        cam.pan(Vec2::new(5.0, 0.0));
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 5.0, 0.0), 1e-5));
    }

    #[test]
    fn zoom_never_reaches_zero() {
        let mut cam = Camera::default();
        cam.zoom_by(0.0);
        assert!(cam.zoom > 0.0);
    }
}
