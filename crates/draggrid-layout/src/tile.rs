#![forbid(unsafe_code)]

//! Tile records: identity, span, margins and placement.

use std::fmt;

use draggrid_core::geometry::{Rect, Sides};
use serde::{Deserialize, Serialize};

use crate::cell_grid::{CellCoord, CellGrid};

/// Stable identifier for tiles.
///
/// `0` is reserved/invalid so IDs are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(u64);

impl TileId {
    /// Lowest valid tile ID.
    pub const MIN: Self = Self(1);

    /// Create a new tile ID, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, TileIdError> {
        if raw == 0 {
            return Err(TileIdError::Zero);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile#{}", self.0)
    }
}

/// Rejected tile identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileIdError {
    Zero,
}

impl fmt::Display for TileIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "tile id 0 is reserved"),
        }
    }
}

impl std::error::Error for TileIdError {}

/// Footprint size of a tile in cells. Both axes are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Columns covered.
    pub h: u16,
    /// Rows covered.
    pub v: u16,
}

impl Span {
    /// One cell.
    pub const UNIT: Self = Self { h: 1, v: 1 };

    /// Create a span, clamping non-positive sizes to 1.
    #[must_use]
    pub fn new(h: i32, v: i32) -> Self {
        Self {
            h: h.clamp(1, i32::from(u16::MAX)) as u16,
            v: v.clamp(1, i32::from(u16::MAX)) as u16,
        }
    }

    /// Number of cells covered.
    #[inline]
    #[must_use]
    pub const fn cells(self) -> usize {
        self.h as usize * self.v as usize
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Engine-owned record of one tile.
///
/// `position` is the top-left cell, or `None` before the first successful
/// placement (or after the tile lost its place on a shrinking surface).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub span: Span,
    pub margins: Sides,
    pub position: Option<CellCoord>,
}

impl Tile {
    /// Unplaced tile with no margins.
    #[must_use]
    pub fn new(id: TileId, span: Span) -> Self {
        Self {
            id,
            span,
            margins: Sides::default(),
            position: None,
        }
    }

    /// Set the requested top-left cell.
    #[must_use]
    pub fn at(mut self, col: u16, row: u16) -> Self {
        self.position = Some(CellCoord::new(col, row));
        self
    }

    /// Set the margins inset from the span rectangle.
    #[must_use]
    pub fn with_margins(mut self, margins: impl Into<Sides>) -> Self {
        self.margins = margins.into();
        self
    }

    /// True if the tile has a known position.
    #[inline]
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    /// Footprint rectangle at the current position: `cell_size * span`
    /// minus margins, offset to the placed cell.
    #[must_use]
    pub fn footprint(&self, grid: &CellGrid) -> Option<Rect> {
        self.footprint_at(grid, self.position?)
    }

    /// Footprint the tile would have with its top-left at `coord`.
    #[must_use]
    pub fn footprint_at(&self, grid: &CellGrid, coord: CellCoord) -> Option<Rect> {
        grid.span_rect(coord, self.span)
            .map(|rect| rect.inner(self.margins))
    }
}
