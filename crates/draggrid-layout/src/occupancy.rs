#![forbid(unsafe_code)]

//! Free-space queries over the placed tiles.
//!
//! The free region is the grid region minus every placed tile's footprint.
//! Callers pass the tiles to leave out (the dragged tile, the tile being
//! relocated) and may subtract further rectangles afterwards.

use draggrid_core::geometry::Rect;
use draggrid_core::region::Region;

use crate::cell_grid::CellGrid;
use crate::tile::{Tile, TileId};

/// Read-only view of the grid and the tiles on it.
#[derive(Debug, Clone, Copy)]
pub struct OccupancyModel<'a> {
    grid: &'a CellGrid,
    tiles: &'a [Tile],
}

impl<'a> OccupancyModel<'a> {
    #[must_use]
    pub const fn new(grid: &'a CellGrid, tiles: &'a [Tile]) -> Self {
        Self { grid, tiles }
    }

    /// Grid region minus the footprints of all placed tiles not listed in
    /// `excluding`.
    #[must_use]
    pub fn free_region(&self, excluding: &[TileId]) -> Region {
        let mut free = Region::from_rect(self.grid.region());
        for tile in self.tiles {
            if excluding.contains(&tile.id) {
                continue;
            }
            if let Some(footprint) = tile.footprint(self.grid) {
                free.subtract_rect(footprint);
            }
        }
        free
    }

    /// Footprint of a tile, if it is known and placed.
    #[must_use]
    pub fn footprint(&self, id: TileId) -> Option<Rect> {
        self.tiles
            .iter()
            .find(|t| t.id == id)
            .and_then(|t| t.footprint(self.grid))
    }

    /// Placed tiles (other than `except`) whose footprint overlaps `area`.
    pub fn tiles_overlapping<'r>(
        &'r self,
        area: &'r Region,
        except: TileId,
    ) -> impl Iterator<Item = &'a Tile> + 'r {
        let grid = self.grid;
        self.tiles.iter().filter(move |t| {
            t.id != except
                && t.footprint(grid)
                    .is_some_and(|footprint| area.intersects(&footprint))
        })
    }
}

/// True if the whole of `rect` lies inside `free`.
///
/// The intersection must form a single rectangle equal in size to `rect`.
/// An empty rectangle is never free.
#[must_use]
pub fn is_footprint_free(rect: &Rect, free: &Region) -> bool {
    if rect.is_empty() || free.quick_reject(rect) {
        return false;
    }
    let inside = free.clipped(*rect);
    inside.is_rect() && inside.area() == rect.area()
}
