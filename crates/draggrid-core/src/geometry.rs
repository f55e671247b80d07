#![forbid(unsafe_code)]

//! Geometric primitives.

use serde::{Deserialize, Serialize};

/// A point in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to another point.
    #[inline]
    pub const fn distance_squared(self, other: Point) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }
}

/// An axis-aligned rectangle in surface pixels.
///
/// Uses surface coordinates (origin at top-left). Coordinates are signed so
/// that a dragged tile can hang past the left or top edge of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Create a rectangle from its edges. `right`/`bottom` are exclusive.
    #[inline]
    pub const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Left edge (inclusive). Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Top edge (inclusive). Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn top_right(&self) -> Point {
        Point::new(self.right(), self.y)
    }

    #[inline]
    pub const fn bottom_left(&self) -> Point {
        Point::new(self.x, self.bottom())
    }

    #[inline]
    pub const fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Area in square pixels. Empty rectangles have zero area.
    #[inline]
    pub const fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if `other` lies entirely inside this rectangle.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        !other.is_empty()
            && other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// True if the two rectangles share a region of positive area.
    ///
    /// Rectangles that only touch along an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection_opt(other).is_some()
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns an empty rectangle if the rectangles don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Create a new rectangle that is the union of this rectangle and another.
    ///
    /// The result is the smallest rectangle that contains both. An empty
    /// operand is ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Rect::from_edges(x, y, right, bottom)
    }

    /// Create a new rectangle inside the current one with the given margin.
    pub fn inner(&self, margin: Sides) -> Rect {
        let x = self.x.saturating_add(margin.left);
        let y = self.y.saturating_add(margin.top);
        let width = (self.width - margin.horizontal_sum()).max(0);
        let height = (self.height - margin.vertical_sum()).max(0);

        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Translate by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Shrink (or grow) around the center by `scale`.
    ///
    /// Each side moves inward by `size * (1 - scale) / 2`, rounded to the
    /// nearest pixel, so the result stays centered.
    #[must_use]
    pub fn scaled(&self, scale: f32) -> Rect {
        let dw = (self.width as f32 * (1.0 - scale) * 0.5).round() as i32;
        let dh = (self.height as f32 * (1.0 - scale) * 0.5).round() as i32;
        Rect::from_edges(
            self.x + dw,
            self.y + dh,
            self.right() - dw,
            self.bottom() - dh,
        )
    }
}

/// Sides for padding/margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Sides {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Sides {
    /// Create new sides with equal values.
    pub const fn all(val: i32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with specific values.
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub const fn horizontal_sum(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn vertical_sum(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}

impl From<i32> for Sides {
    fn from(val: i32) -> Self {
        Self::all(val)
    }
}

impl From<(i32, i32)> for Sides {
    fn from((vertical, horizontal): (i32, i32)) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect, Sides};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 8));
    }

    #[test]
    fn rect_intersection_overlaps() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(2, 2, 4, 4);
        assert_eq!(a.intersection(&b), Rect::new(2, 2, 2, 2));
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 50, 50);
        let b = Rect::new(50, 0, 50, 50);
        assert!(!a.intersects(&b));
        assert_eq!(a.intersection(&b), Rect::default());
    }

    #[test]
    fn negative_origin_intersection() {
        let a = Rect::new(-30, -10, 40, 40);
        let b = Rect::new(0, 0, 200, 200);
        assert_eq!(a.intersection(&b), Rect::new(0, 0, 10, 30));
    }

    #[test]
    fn rect_inner_reduces() {
        let rect = Rect::new(0, 0, 10, 10);
        let inner = rect.inner(Sides::new(1, 2, 3, 4));
        assert_eq!(inner, Rect::new(4, 1, 4, 6));
    }

    #[test]
    fn inner_never_goes_negative() {
        let rect = Rect::new(0, 0, 4, 4);
        let inner = rect.inner(Sides::all(3));
        assert!(inner.is_empty());
        assert_eq!(inner.area(), 0);
    }

    #[test]
    fn union_ignores_empty_operand() {
        let a = Rect::new(5, 5, 10, 10);
        assert_eq!(a.union(&Rect::default()), a);
        assert_eq!(Rect::default().union(&a), a);
        assert_eq!(
            a.union(&Rect::new(20, 0, 5, 5)),
            Rect::from_edges(5, 0, 25, 15)
        );
    }

    #[test]
    fn scaled_shrinks_around_center() {
        let rect = Rect::new(0, 150, 100, 50);
        assert_eq!(rect.scaled(0.8), Rect::new(10, 155, 80, 40));
        assert_eq!(rect.scaled(1.0), rect);
    }

    #[test]
    fn offset_moves_origin_only() {
        let rect = Rect::new(10, 10, 20, 30);
        assert_eq!(rect.offset(-15, 5), Rect::new(-5, 15, 20, 30));
    }

    #[test]
    fn corner_points() {
        let rect = Rect::new(1, 2, 3, 4);
        assert_eq!(rect.top_left(), Point::new(1, 2));
        assert_eq!(rect.top_right(), Point::new(4, 2));
        assert_eq!(rect.bottom_left(), Point::new(1, 6));
        assert_eq!(rect.bottom_right(), Point::new(4, 6));
        assert_eq!(Point::new(0, 0).distance_squared(Point::new(3, 4)), 25);
    }

    #[test]
    fn sides_conversions() {
        assert_eq!(Sides::all(3), Sides::from(3));
        assert_eq!(Sides::from((1, 2)), Sides::new(1, 2, 1, 2));
        assert_eq!(Sides::new(1, 2, 3, 4).horizontal_sum(), 6);
        assert_eq!(Sides::new(1, 2, 3, 4).vertical_sum(), 4);
    }
}
