#![forbid(unsafe_code)]

//! Hover resolution: which cells would a dragged tile occupy if dropped now.
//!
//! The lifted rectangle is clipped to the grid region and every cell it
//! touches is collected. The four extreme cells of that block are candidate
//! anchors. The anchor chosen is the corner whose side of the block spills
//! least past the clipped rectangle (squared distance between the two
//! corners), with ties resolved top-left, top-right, bottom-left,
//! bottom-right. From the anchor
//! the span is walked away from that corner. A walk that leaves the lattice
//! before covering the full span yields an empty hover set.

use draggrid_core::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::cell_grid::{CellCoord, CellGrid, CellId, Direction};
use crate::tile::Span;

/// Corner a hover walk is anchored at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Tie-break order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// This corner of `rect`.
    #[must_use]
    pub const fn of(self, rect: &Rect) -> Point {
        match self {
            Self::TopLeft => rect.top_left(),
            Self::TopRight => rect.top_right(),
            Self::BottomLeft => rect.bottom_left(),
            Self::BottomRight => rect.bottom_right(),
        }
    }

    /// Horizontal then vertical walk direction away from this corner.
    const fn walk(self) -> (Direction, Direction) {
        match self {
            Self::TopLeft => (Direction::Right, Direction::Bottom),
            Self::TopRight => (Direction::Left, Direction::Bottom),
            Self::BottomLeft => (Direction::Right, Direction::Top),
            Self::BottomRight => (Direction::Left, Direction::Top),
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }
}

/// Cells a drop would cover. Either empty or exactly `span.h * span.v`
/// cells, sorted row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoverSet {
    cells: Vec<CellCoord>,
    bounds: Rect,
    anchor: Option<Corner>,
}

impl HoverSet {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Union of the hovered cell rects (empty rect when empty).
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Corner the walk started from.
    #[must_use]
    pub const fn anchor(&self) -> Option<Corner> {
        self.anchor
    }

    /// Top-left hovered cell.
    #[must_use]
    pub fn top_left(&self) -> Option<CellCoord> {
        self.cells.first().copied()
    }

    /// Cell rects of the hovered set.
    pub fn rects<'g>(&'g self, grid: &'g CellGrid) -> impl Iterator<Item = Rect> + 'g {
        self.cells
            .iter()
            .filter_map(move |coord| grid.cell_at(*coord))
            .map(|cell| cell.rect)
    }
}

/// Resolves hover sets against one grid.
#[derive(Debug, Clone, Copy)]
pub struct HoverResolver<'a> {
    grid: &'a CellGrid,
}

impl<'a> HoverResolver<'a> {
    #[must_use]
    pub const fn new(grid: &'a CellGrid) -> Self {
        Self { grid }
    }

    /// Hover set for a lifted rectangle of the given span.
    #[must_use]
    pub fn resolve(&self, current: Rect, span: Span) -> HoverSet {
        let Some(bound) = self.grid.region().intersection_opt(&current) else {
            return HoverSet::empty();
        };

        let touched: Vec<(CellId, Rect)> = self
            .grid
            .iter()
            .filter(|(_, cell)| cell.rect.intersects(&bound))
            .map(|(id, cell)| (id, cell.rect))
            .collect();
        let covered = touched
            .iter()
            .fold(Rect::default(), |acc, (_, rect)| acc.union(rect));

        // Touched cells form a block, so each corner of the union belongs
        // to exactly one of them.
        let mut extremes: [Option<CellId>; 4] = [None; 4];
        for (id, rect) in &touched {
            for corner in Corner::ALL {
                if corner.of(rect) == corner.of(&covered) {
                    extremes[corner.index()] = Some(*id);
                }
            }
        }

        let chosen = Corner::ALL
            .into_iter()
            .filter_map(|corner| {
                extremes[corner.index()].map(|id| {
                    let spill = corner.of(&covered).distance_squared(corner.of(&bound));
                    (corner, id, spill)
                })
            })
            .min_by_key(|(_, _, spill)| *spill);
        let Some((corner, anchor, _)) = chosen else {
            return HoverSet::empty();
        };

        self.walk(anchor, corner, span)
    }

    fn walk(&self, anchor: CellId, corner: Corner, span: Span) -> HoverSet {
        let (across, down) = corner.walk();
        let mut cells = Vec::with_capacity(span.cells());
        let mut bounds = Rect::default();

        let mut row_start = Some(anchor);
        for _ in 0..span.v {
            let Some(start) = row_start else { break };
            let mut at = Some(start);
            for _ in 0..span.h {
                let Some(id) = at else { break };
                let Some(cell) = self.grid.cell(id) else { break };
                cells.push(cell.coord);
                bounds = bounds.union(&cell.rect);
                at = cell.neighbor(across);
            }
            row_start = self.grid.neighbor(start, down);
        }

        if cells.len() != span.cells() {
            return HoverSet::empty();
        }
        cells.sort();
        HoverSet {
            cells,
            bounds,
            anchor: Some(corner),
        }
    }
}
