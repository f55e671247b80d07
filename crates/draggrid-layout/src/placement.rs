#![forbid(unsafe_code)]

//! Placement search and validation.
//!
//! The search is deterministic: cells are scanned in row-major order and the
//! first cell whose span rectangle lies completely in the free region wins.

use draggrid_core::geometry::Rect;
use draggrid_core::region::Region;

use crate::cell_grid::{Cell, CellCoord, CellGrid};
use crate::occupancy::is_footprint_free;
use crate::tile::{Span, Tile};

/// Validates candidate footprints against a free region.
#[derive(Debug, Clone, Copy)]
pub struct PlacementValidator<'a> {
    grid: &'a CellGrid,
}

impl<'a> PlacementValidator<'a> {
    #[must_use]
    pub const fn new(grid: &'a CellGrid) -> Self {
        Self { grid }
    }

    /// First cell, in row-major order, whose `span` rectangle is entirely
    /// free.
    #[must_use]
    pub fn find_free_footprint(&self, span: Span, free: &Region) -> Option<&'a Cell> {
        if free.is_empty() {
            return None;
        }
        let grid = self.grid;
        grid.cells().iter().find(|cell| {
            grid.span_rect(cell.coord, span)
                .is_some_and(|rect| is_footprint_free(&rect, free))
        })
    }

    /// Accept `candidate` if it is free; otherwise fall back to the first
    /// free span rectangle for the tile.
    #[must_use]
    pub fn validate(&self, tile: &Tile, candidate: Rect, free: &Region) -> Option<Rect> {
        if is_footprint_free(&candidate, free) {
            return Some(candidate);
        }
        let cell = self.find_free_footprint(tile.span, free)?;
        self.grid.span_rect(cell.coord, tile.span)
    }

    /// Position for `tile`: its requested position when that footprint is
    /// free, else the first free cell.
    #[must_use]
    pub fn resolve_position(&self, tile: &Tile, free: &Region) -> Option<CellCoord> {
        if let Some(requested) = tile.position {
            let fits = tile
                .footprint_at(self.grid, requested)
                .is_some_and(|footprint| is_footprint_free(&footprint, free));
            if fits {
                return Some(requested);
            }
        }
        self.find_free_footprint(tile.span, free).map(|cell| cell.coord)
    }
}
