use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with a top-left corner and a size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const UNIT: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Half-open containment: left and top edges are inside, right and
    /// bottom edges are not.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Anchor point a rectangle is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Alignment {
    /// Position of the anchor inside a rect, as a fraction of its size.
    pub fn anchor(self) -> Vec2 {
        match self {
            Self::TopLeft => Vec2::new(0.0, 0.0),
            Self::Top => Vec2::new(0.5, 0.0),
            Self::TopRight => Vec2::new(1.0, 0.0),
            Self::Left => Vec2::new(0.0, 0.5),
            Self::Center => Vec2::new(0.5, 0.5),
            Self::Right => Vec2::new(1.0, 0.5),
            Self::BottomLeft => Vec2::new(0.0, 1.0),
            Self::Bottom => Vec2::new(0.5, 1.0),
            Self::BottomRight => Vec2::new(1.0, 1.0),
        }
    }
}

/// Build a `w` x `h` rect whose `alignment` anchor sits at `(x, y)`.
pub fn align_rect(alignment: Alignment, x: f32, y: f32, w: f32, h: f32) -> Rect {
    let anchor = alignment.anchor();
    Rect::new(x - w * anchor.x, y - h * anchor.y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_alignment_is_identity() {
        let r = align_rect(Alignment::TopLeft, 5.0, 6.0, 10.0, 20.0);
        assert_eq!(r, Rect::new(5.0, 6.0, 10.0, 20.0));
    }

    #[test]
    fn center_alignment_straddles_anchor() {
        let r = align_rect(Alignment::Center, 0.0, 0.0, 160.0, 80.0);
        assert_eq!(r.top_left(), Vec2::new(-80.0, -40.0));
        assert_eq!(r.right(), 80.0);
        assert_eq!(r.bottom(), 40.0);
    }

    #[test]
    fn bottom_right_alignment() {
        let r = align_rect(Alignment::BottomRight, 0.0, 0.0, 4.0, 2.0);
        assert_eq!(r.top_left(), Vec2::new(-4.0, -2.0));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(9.99, 9.99)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
        assert!(!r.contains(Vec2::new(5.0, 10.0)));
        assert!(!r.contains(Vec2::new(10.1, 5.0)));
        assert!(!r.contains(Vec2::new(5.0, -0.1)));
    }
}
