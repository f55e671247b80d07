#![forbid(unsafe_code)]

//! Cell lattice laid over the surface.
//!
//! A [`CellGrid`] is a regular lattice of square cells. Cells are stored
//! row-major, so a [`CellId`] is simply the cell's index, and each cell
//! carries links to its four neighbors. The lattice is rebuilt from scratch
//! whenever the surface size changes; cells that would not fit completely
//! are not created, and the leftover space is distributed by [`Gravity`].
//!
//! # Invariants
//!
//! 1. Cell rects are pairwise disjoint and all have the same side length.
//! 2. `columns * rows == cells().len()`.
//! 3. Neighbor links are symmetric: if `a.right == b` then `b.left == a`.
//! 4. [`CellGrid::region`] is exactly the union of all cell rects.

use std::cmp::Ordering;
use std::fmt;

use bitflags::bitflags;
use draggrid_core::geometry::{Point, Rect, Sides};
use serde::{Deserialize, Serialize};

use crate::tile::Span;

/// Lattice coordinate of a cell.
///
/// Ordering is row-major: top row first, left to right within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellCoord {
    pub col: u16,
    pub row: u16,
}

impl CellCoord {
    #[must_use]
    pub const fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }
}

impl Ord for CellCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl PartialOrd for CellCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Index of a cell in its grid. Only meaningful for the grid that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(usize);

impl CellId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Neighbor direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Top,
    Right,
    Bottom,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Top => 1,
            Self::Right => 2,
            Self::Bottom => 3,
        }
    }
}

/// One lattice cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub rect: Rect,
    pub coord: CellCoord,
    neighbors: [Option<CellId>; 4],
}

impl Cell {
    /// Adjacent cell in `dir`, if any.
    #[inline]
    #[must_use]
    pub const fn neighbor(&self, dir: Direction) -> Option<CellId> {
        self.neighbors[dir.slot()]
    }
}

bitflags! {
    /// Placement of the lattice inside the surface when it does not fill
    /// it exactly. One flag per axis is honored; anything else centers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Gravity: u8 {
        const START_X = 1 << 0;
        const END_X = 1 << 1;
        const CENTER_X = 1 << 2;
        const START_Y = 1 << 3;
        const END_Y = 1 << 4;
        const CENTER_Y = 1 << 5;
        const CENTER = Self::CENTER_X.bits() | Self::CENTER_Y.bits();
        const TOP_LEFT = Self::START_X.bits() | Self::START_Y.bits();
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::CENTER
    }
}

impl Gravity {
    fn offset_x(self, available: i32, used: i32) -> i32 {
        Self::axis_offset(
            self & (Self::START_X | Self::END_X | Self::CENTER_X),
            Self::START_X,
            Self::END_X,
            available,
            used,
        )
    }

    fn offset_y(self, available: i32, used: i32) -> i32 {
        Self::axis_offset(
            self & (Self::START_Y | Self::END_Y | Self::CENTER_Y),
            Self::START_Y,
            Self::END_Y,
            available,
            used,
        )
    }

    fn axis_offset(axis: Self, start: Self, end: Self, available: i32, used: i32) -> i32 {
        let slack = (available - used).max(0);
        if axis == start {
            0
        } else if axis == end {
            slack
        } else {
            slack / 2
        }
    }
}

/// How the cell side length is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellSizing {
    /// Fit this many cells along the shorter side of the padded surface.
    FitCount(u16),
    /// Fixed side length in pixels.
    Fixed(i32),
}

impl Default for CellSizing {
    fn default() -> Self {
        Self::FitCount(4)
    }
}

impl CellSizing {
    /// Resolve the side length for a content area. Returns 0 when no cell
    /// can exist.
    #[must_use]
    pub fn resolve(self, content: Rect) -> i32 {
        match self {
            Self::FitCount(0) => 0,
            Self::FitCount(count) => {
                let shorter = content.width.min(content.height).max(0);
                shorter / i32::from(count)
            }
            Self::Fixed(size) => size.max(0),
        }
    }
}

/// Side length for a `width x height` surface after `padding`.
#[must_use]
pub fn resolve_cell_size(width: i32, height: i32, padding: Sides, sizing: CellSizing) -> i32 {
    sizing.resolve(Rect::from_size(width, height).inner(padding))
}

/// Regular lattice of square cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellGrid {
    cells: Vec<Cell>,
    columns: u16,
    rows: u16,
    cell_size: i32,
    region: Rect,
}

impl CellGrid {
    /// Grid with no cells.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a lattice covering a `width x height` surface anchored at the
    /// origin.
    #[must_use]
    pub fn rebuild(width: i32, height: i32, cell_size: i32, gravity: Gravity) -> Self {
        Self::rebuild_within(Rect::from_size(width, height), cell_size, gravity)
    }

    /// Build a lattice inside `bounds`. Only whole cells are created.
    #[must_use]
    pub fn rebuild_within(bounds: Rect, cell_size: i32, gravity: Gravity) -> Self {
        if cell_size <= 0 || bounds.is_empty() {
            return Self::empty();
        }
        let columns = (bounds.width / cell_size).min(i32::from(u16::MAX));
        let rows = (bounds.height / cell_size).min(i32::from(u16::MAX));
        if columns == 0 || rows == 0 {
            return Self::empty();
        }

        let origin_x = bounds.x + gravity.offset_x(bounds.width, columns * cell_size);
        let origin_y = bounds.y + gravity.offset_y(bounds.height, rows * cell_size);

        let mut cells: Vec<Cell> = Vec::with_capacity((columns * rows) as usize);
        for row in 0..rows {
            for col in 0..columns {
                let id = cells.len();
                let mut neighbors = [None; 4];
                if col > 0 {
                    let left = id - 1;
                    neighbors[Direction::Left.slot()] = Some(CellId(left));
                    cells[left].neighbors[Direction::Right.slot()] = Some(CellId(id));
                }
                if row > 0 {
                    let top = id - columns as usize;
                    neighbors[Direction::Top.slot()] = Some(CellId(top));
                    cells[top].neighbors[Direction::Bottom.slot()] = Some(CellId(id));
                }
                cells.push(Cell {
                    rect: Rect::new(
                        origin_x + col * cell_size,
                        origin_y + row * cell_size,
                        cell_size,
                        cell_size,
                    ),
                    coord: CellCoord::new(col as u16, row as u16),
                    neighbors,
                });
            }
        }

        Self {
            cells,
            columns: columns as u16,
            rows: rows as u16,
            cell_size,
            region: Rect::new(origin_x, origin_y, columns * cell_size, rows * cell_size),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn columns(&self) -> u16 {
        self.columns
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Union of all cell rects. Empty for an empty grid.
    #[inline]
    #[must_use]
    pub const fn region(&self) -> Rect {
        self.region
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells paired with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }

    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    #[must_use]
    pub fn id_at(&self, coord: CellCoord) -> Option<CellId> {
        if coord.col < self.columns && coord.row < self.rows {
            Some(CellId(
                coord.row as usize * self.columns as usize + coord.col as usize,
            ))
        } else {
            None
        }
    }

    #[must_use]
    pub fn cell_at(&self, coord: CellCoord) -> Option<&Cell> {
        self.id_at(coord).and_then(|id| self.cell(id))
    }

    /// Neighbor of `id` in `dir`.
    #[must_use]
    pub fn neighbor(&self, id: CellId, dir: Direction) -> Option<CellId> {
        self.cell(id).and_then(|c| c.neighbor(dir))
    }

    /// Cell containing the point.
    #[must_use]
    pub fn cell_under(&self, point: Point) -> Option<&Cell> {
        if !self.region.contains(point.x, point.y) {
            return None;
        }
        let col = (point.x - self.region.x) / self.cell_size;
        let row = (point.y - self.region.y) / self.cell_size;
        self.cell_at(CellCoord::new(col as u16, row as u16))
    }

    /// Cells whose rect overlaps `rect` with positive area.
    pub fn cells_intersecting(&self, rect: Rect) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().filter(move |c| c.rect.intersects(&rect))
    }

    /// Rectangle covered by a `span` anchored at `coord`, without margins.
    ///
    /// The rectangle may extend past the lattice when the span does not fit;
    /// `None` only when the grid is empty.
    #[must_use]
    pub fn span_rect(&self, coord: CellCoord, span: Span) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        let cs = self.cell_size;
        Some(Rect::new(
            self.region.x + i32::from(coord.col) * cs,
            self.region.y + i32::from(coord.row) * cs,
            i32::from(span.h) * cs,
            i32::from(span.v) * cs,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_surface_builds_four_by_four() {
        let grid = CellGrid::rebuild(200, 200, 50, Gravity::CENTER);
        assert_eq!((grid.columns(), grid.rows()), (4, 4));
        assert_eq!(grid.cells().len(), 16);
        assert_eq!(grid.region(), Rect::new(0, 0, 200, 200));
        let cell = grid.cell_at(CellCoord::new(2, 1)).expect("cell exists");
        assert_eq!(cell.rect, Rect::new(100, 50, 50, 50));
    }

    #[test]
    fn partial_cells_are_not_created() {
        let grid = CellGrid::rebuild(230, 120, 50, Gravity::TOP_LEFT);
        assert_eq!((grid.columns(), grid.rows()), (4, 2));
        assert_eq!(grid.region(), Rect::new(0, 0, 200, 100));
    }

    #[test]
    fn gravity_distributes_slack() {
        let centered = CellGrid::rebuild(230, 120, 50, Gravity::CENTER);
        assert_eq!(centered.region().top_left(), Point::new(15, 10));

        let end = CellGrid::rebuild(230, 120, 50, Gravity::END_X | Gravity::START_Y);
        assert_eq!(end.region().top_left(), Point::new(30, 0));

        // Conflicting flags on one axis center that axis.
        let mixed = CellGrid::rebuild(230, 120, 50, Gravity::START_X | Gravity::END_X);
        assert_eq!(mixed.region().top_left(), Point::new(15, 10));
    }

    #[test]
    fn degenerate_inputs_give_empty_grid() {
        assert!(CellGrid::rebuild(200, 200, 0, Gravity::CENTER).is_empty());
        assert!(CellGrid::rebuild(200, 200, -5, Gravity::CENTER).is_empty());
        assert!(CellGrid::rebuild(40, 200, 50, Gravity::CENTER).is_empty());
        assert!(CellGrid::rebuild(0, 0, 50, Gravity::CENTER).is_empty());
        assert_eq!(CellGrid::empty().region(), Rect::default());
    }

    #[test]
    fn neighbor_links_are_symmetric() {
        let grid = CellGrid::rebuild(150, 100, 50, Gravity::CENTER);
        for (id, cell) in grid.iter() {
            for dir in Direction::ALL {
                if let Some(other) = cell.neighbor(dir) {
                    assert_eq!(grid.neighbor(other, dir.opposite()), Some(id));
                }
            }
        }
        let corner = grid.id_at(CellCoord::new(0, 0)).expect("corner");
        assert_eq!(grid.neighbor(corner, Direction::Left), None);
        assert_eq!(grid.neighbor(corner, Direction::Top), None);
    }

    #[test]
    fn cell_under_point() {
        let grid = CellGrid::rebuild(200, 200, 50, Gravity::CENTER);
        let cell = grid.cell_under(Point::new(120, 75)).expect("inside");
        assert_eq!(cell.coord, CellCoord::new(2, 1));
        assert!(grid.cell_under(Point::new(200, 10)).is_none());
        assert!(grid.cell_under(Point::new(-1, 10)).is_none());
    }

    #[test]
    fn cells_intersecting_ignores_touching_edges() {
        let grid = CellGrid::rebuild(200, 200, 50, Gravity::CENTER);
        let hits: Vec<CellCoord> = grid
            .cells_intersecting(Rect::new(50, 50, 50, 50))
            .map(|c| c.coord)
            .collect();
        assert_eq!(hits, vec![CellCoord::new(1, 1)]);
    }

    #[test]
    fn coord_order_is_row_major() {
        let mut coords = vec![
            CellCoord::new(0, 1),
            CellCoord::new(3, 0),
            CellCoord::new(1, 1),
            CellCoord::new(0, 0),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(3, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 1),
            ]
        );
    }

    #[test]
    fn cell_size_uses_shorter_side() {
        let sizing = CellSizing::FitCount(4);
        assert_eq!(resolve_cell_size(400, 200, Sides::default(), sizing), 50);
        assert_eq!(resolve_cell_size(200, 400, Sides::default(), sizing), 50);
        assert_eq!(resolve_cell_size(220, 220, Sides::all(10), sizing), 50);
        assert_eq!(resolve_cell_size(200, 200, Sides::default(), CellSizing::FitCount(0)), 0);
        assert_eq!(resolve_cell_size(10, 10, Sides::default(), CellSizing::Fixed(64)), 64);
    }

    #[test]
    fn span_rect_may_overhang() {
        let grid = CellGrid::rebuild(200, 200, 50, Gravity::CENTER);
        let rect = grid
            .span_rect(CellCoord::new(3, 0), Span::new(2, 1))
            .expect("non-empty grid");
        assert_eq!(rect, Rect::new(150, 0, 100, 50));
        assert!(!grid.region().contains_rect(&rect));
    }
}
