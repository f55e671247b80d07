#![forbid(unsafe_code)]

//! Axis-aligned rectangle-set algebra.
//!
//! A [`Region`] is a set of pairwise-disjoint [`Rect`]s. It supports the
//! operations the occupancy engine needs: union, intersection and difference
//! with a rectangle, bounds, and the "is this exactly one rectangle" test.
//!
//! # Invariants
//!
//! 1. Stored pieces never overlap and are never empty.
//! 2. `area()` is the exact covered area (sum of the pieces).
//! 3. `is_rect()` is true iff the covered area equals the area of the bounds,
//!    regardless of how the region happens to be fragmented internally.

use crate::geometry::Rect;

/// A set of pixels described by disjoint rectangles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    rects: Vec<Rect>,
}

impl Region {
    /// Create an empty region.
    #[must_use]
    pub const fn new() -> Self {
        Self { rects: Vec::new() }
    }

    /// Create a region covering exactly `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let mut region = Self::new();
        if !rect.is_empty() {
            region.rects.push(rect);
        }
        region
    }

    /// True if the region covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// The disjoint pieces of this region.
    #[inline]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Total covered area.
    pub fn area(&self) -> i64 {
        self.rects.iter().map(Rect::area).sum()
    }

    /// Smallest rectangle containing the whole region (empty rect if empty).
    pub fn bounds(&self) -> Rect {
        self.rects
            .iter()
            .fold(Rect::default(), |acc, rect| acc.union(rect))
    }

    /// True if the region is non-empty and covers exactly one rectangle.
    pub fn is_rect(&self) -> bool {
        !self.is_empty() && self.area() == self.bounds().area()
    }

    /// True if `rect` cannot possibly intersect this region.
    pub fn quick_reject(&self, rect: &Rect) -> bool {
        self.is_empty() || !self.bounds().intersects(rect)
    }

    /// True if any piece shares positive area with `rect`.
    pub fn intersects(&self, rect: &Rect) -> bool {
        self.rects.iter().any(|piece| piece.intersects(rect))
    }

    /// Replace the contents with `rect`.
    pub fn set(&mut self, rect: Rect) {
        self.rects.clear();
        if !rect.is_empty() {
            self.rects.push(rect);
        }
    }

    /// Remove every pixel.
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Add `rect` to the region.
    pub fn union_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let mut fresh = vec![rect];
        for existing in &self.rects {
            fresh = fresh
                .into_iter()
                .flat_map(|piece| subtract(piece, existing))
                .collect();
            if fresh.is_empty() {
                return;
            }
        }
        self.rects.extend(fresh);
    }

    /// Keep only the pixels inside `rect`.
    pub fn intersect_rect(&mut self, rect: Rect) {
        self.rects = self
            .rects
            .iter()
            .filter_map(|piece| piece.intersection_opt(&rect))
            .collect();
    }

    /// Remove the pixels inside `rect`.
    pub fn subtract_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        self.rects = self
            .rects
            .iter()
            .flat_map(|piece| subtract(*piece, &rect))
            .collect();
    }

    /// Remove every pixel covered by `other`.
    pub fn subtract_region(&mut self, other: &Region) {
        for rect in &other.rects {
            self.subtract_rect(*rect);
        }
    }

    /// A copy of this region clipped to `rect`.
    #[must_use]
    pub fn clipped(&self, rect: Rect) -> Region {
        let mut out = self.clone();
        out.intersect_rect(rect);
        out
    }
}

impl FromIterator<Rect> for Region {
    fn from_iter<I: IntoIterator<Item = Rect>>(iter: I) -> Self {
        let mut region = Region::new();
        for rect in iter {
            region.union_rect(rect);
        }
        region
    }
}

/// `piece \ cut`, as at most four disjoint bands.
fn subtract(piece: Rect, cut: &Rect) -> Vec<Rect> {
    let Some(hole) = piece.intersection_opt(cut) else {
        return vec![piece];
    };
    let candidates = [
        // Band above the hole, full width.
        Rect::from_edges(piece.left(), piece.top(), piece.right(), hole.top()),
        // Band below the hole, full width.
        Rect::from_edges(piece.left(), hole.bottom(), piece.right(), piece.bottom()),
        // Left of the hole, hole height.
        Rect::from_edges(piece.left(), hole.top(), hole.left(), hole.bottom()),
        // Right of the hole, hole height.
        Rect::from_edges(hole.right(), hole.top(), piece.right(), hole.bottom()),
    ];
    candidates.into_iter().filter(|r| !r.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Region {
        Region::from_rect(Rect::new(0, 0, 200, 200))
    }

    #[test]
    fn empty_rect_makes_empty_region() {
        assert!(Region::from_rect(Rect::new(0, 0, 0, 10)).is_empty());
        assert!(!Region::new().is_rect());
    }

    #[test]
    fn subtract_center_leaves_frame() {
        let mut region = grid();
        region.subtract_rect(Rect::new(50, 50, 100, 100));
        assert_eq!(region.rects().len(), 4);
        assert_eq!(region.area(), 200 * 200 - 100 * 100);
        assert_eq!(region.bounds(), Rect::new(0, 0, 200, 200));
        assert!(!region.is_rect());
    }

    #[test]
    fn subtract_edge_band_stays_rect() {
        let mut region = grid();
        region.subtract_rect(Rect::new(0, 0, 200, 50));
        assert!(region.is_rect());
        assert_eq!(region.bounds(), Rect::new(0, 50, 200, 150));
    }

    #[test]
    fn subtract_disjoint_is_noop() {
        let mut region = grid();
        region.subtract_rect(Rect::new(300, 300, 10, 10));
        assert_eq!(region, grid());
    }

    #[test]
    fn fragmented_rectangle_still_reports_rect() {
        let mut region = Region::new();
        region.union_rect(Rect::new(0, 0, 50, 50));
        region.union_rect(Rect::new(50, 0, 50, 50));
        assert_eq!(region.rects().len(), 2);
        assert!(region.is_rect());
        assert_eq!(region.bounds(), Rect::new(0, 0, 100, 50));
    }

    #[test]
    fn union_overlap_counts_once() {
        let region: Region = [Rect::new(0, 0, 10, 10), Rect::new(5, 5, 10, 10)]
            .into_iter()
            .collect();
        assert_eq!(region.area(), 100 + 100 - 25);
        assert!(!region.is_rect());
    }

    #[test]
    fn union_contained_rect_is_noop() {
        let mut region = grid();
        region.union_rect(Rect::new(10, 10, 10, 10));
        assert_eq!(region.rects().len(), 1);
    }

    #[test]
    fn intersect_clips_pieces() {
        let mut region = grid();
        region.subtract_rect(Rect::new(50, 0, 50, 200));
        region.intersect_rect(Rect::new(25, 25, 100, 50));
        assert_eq!(region.area(), 25 * 50 + 25 * 50);
        assert!(!region.is_rect());
    }

    #[test]
    fn quick_reject_uses_bounds() {
        let region = grid();
        assert!(region.quick_reject(&Rect::new(-100, 0, 50, 50)));
        assert!(!region.quick_reject(&Rect::new(-10, 0, 50, 50)));
        assert!(Region::new().quick_reject(&Rect::new(0, 0, 1, 1)));
    }

    #[test]
    fn subtract_region_removes_all_pieces() {
        let mut region = grid();
        let holes: Region = [Rect::new(0, 0, 50, 50), Rect::new(150, 150, 50, 50)]
            .into_iter()
            .collect();
        region.subtract_region(&holes);
        assert_eq!(region.area(), 200 * 200 - 2 * 2500);
        assert!(!region.intersects(&Rect::new(0, 0, 50, 50)));
        assert!(region.intersects(&Rect::new(40, 40, 20, 20)));
    }
}
