//! Axis-aligned rectangle value type
//!
//! Containment and intersection treat edges as inclusive, matching the hit-testing
//! behaviour used for pointer input.

use serde::{Deserialize, Serialize};

use super::math::Vec2;

/// Axis-aligned rectangle stored as top-left corner plus extent
///
/// `w` and `h` may be negative transiently (e.g. while dragging a selection), but
/// [`Rect::contains`] and [`Rect::intersects`] assume non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge (window space has y pointing down)
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle at the origin with the given size
    pub const fn from_size(w: f32, h: f32) -> Self {
        Self::new(0.0, 0.0, w, h)
    }

    /// Create a rectangle spanning two opposite corners, in any order
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self::new(min_x, min_y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Smallest rectangle containing every point, or `None` for an empty iterator
    pub fn bounding(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (Vec2::new(min.x.min(p.x), min.y.min(p.y)), Vec2::new(max.x.max(p.x), max.y.max(p.y)))
        });
        Some(Self::from_corners(min, max))
    }

    /// Left edge
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Top edge
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Top-left corner
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.left(), self.top())
    }

    /// Top-right corner
    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.top())
    }

    /// Bottom-left corner
    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.left(), self.bottom())
    }

    /// Bottom-right corner
    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    /// All four corners, clockwise from the top-left
    pub fn corners(&self) -> [Vec2; 4] {
        [self.top_left(), self.top_right(), self.bottom_right(), self.bottom_left()]
    }

    /// Centre point
    pub fn centre(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Extent as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Check if this rectangle contains a point (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left() && point.x <= self.right() &&
        point.y >= self.top() && point.y <= self.bottom()
    }

    /// Check if this rectangle intersects another (touching edges count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() <= other.right() && self.right() >= other.left() &&
        self.top() <= other.bottom() && self.bottom() >= other.top()
    }

    /// Overlapping region of two rectangles, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let min = Vec2::new(self.left().max(other.left()), self.top().max(other.top()));
        let max = Vec2::new(self.right().min(other.right()), self.bottom().min(other.bottom()));
        Some(Rect::from_corners(min, max))
    }

    /// Copy of this rectangle moved by an offset
    pub fn shifted(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Copy of this rectangle with every coordinate scaled about the origin
    pub fn scaled(&self, sx: f32, sy: f32) -> Rect {
        Rect::new(self.x * sx, self.y * sy, self.w * sx, self.h * sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point() {
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);

        // Point inside
        assert!(rect.contains(Vec2::new(150.0, 150.0)));

        // Point on edge
        assert!(rect.contains(Vec2::new(100.0, 100.0)));
        assert!(rect.contains(Vec2::new(300.0, 200.0)));

        // Point outside
        assert!(!rect.contains(Vec2::new(50.0, 50.0)));
        assert!(!rect.contains(Vec2::new(350.0, 250.0)));
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(1.0, 1.0, 2.0, 2.0);
        let c = Rect::new(5.0, 5.0, 2.0, 2.0);
        let touching = Rect::new(2.0, 0.0, 1.0, 1.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.intersects(&touching));
        assert_eq!(a.intersection(&b), Some(Rect::new(1.0, 1.0, 1.0, 1.0)));
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_corners_and_centre() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);

        assert_eq!(rect.top_left(), Vec2::new(10.0, 20.0));
        assert_eq!(rect.bottom_right(), Vec2::new(40.0, 60.0));
        assert_eq!(rect.centre(), Vec2::new(25.0, 40.0));
        assert_eq!(Rect::from_corners(rect.bottom_right(), rect.top_left()), rect);
    }

    #[test]
    fn test_bounding_and_shift_scale() {
        let points = [Vec2::new(3.0, -1.0), Vec2::new(-2.0, 4.0), Vec2::new(0.0, 0.0)];
        assert_eq!(Rect::bounding(points), Some(Rect::new(-2.0, -1.0, 5.0, 5.0)));
        assert_eq!(Rect::bounding(std::iter::empty()), None);

        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(rect.shifted(1.0, -2.0), Rect::new(2.0, 0.0, 3.0, 4.0));
        assert_eq!(rect.scaled(2.0, 0.5), Rect::new(2.0, 1.0, 6.0, 2.0));
    }
}
