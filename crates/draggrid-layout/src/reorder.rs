#![forbid(unsafe_code)]

//! Speculative displacement of tiles in the way of a drag, and its undo.
//!
//! `reorder` pushes every tile overlapping the hovered cells to the first
//! free footprint that leaves the drag's live rectangle alone. Each pushed
//! tile gets a [`DisplacedNode`] remembering where it came from, so that
//! `revert_if_possible` can put it back once the drag has moved on.

use draggrid_core::geometry::Rect;
use draggrid_core::region::Region;
use draggrid_core::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::cell_grid::{CellCoord, CellGrid};
use crate::hover::HoverSet;
use crate::node::{DisplacedNode, DragNode};
use crate::occupancy::{OccupancyModel, is_footprint_free};
use crate::placement::PlacementValidator;
use crate::tile::{Tile, TileId};

/// A tile moved out of the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Displacement {
    pub tile: TileId,
    pub from_cell: CellCoord,
    pub to_cell: CellCoord,
    pub from: Rect,
    pub to: Rect,
}

/// A displaced tile returned to its original position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reversion {
    pub tile: TileId,
    pub cell: CellCoord,
    pub to: Rect,
}

/// Displacement decisions against one grid.
#[derive(Debug, Clone, Copy)]
pub struct ReorderEngine<'a> {
    grid: &'a CellGrid,
}

impl<'a> ReorderEngine<'a> {
    #[must_use]
    pub const fn new(grid: &'a CellGrid) -> Self {
        Self { grid }
    }

    /// Move every tile overlapping `hovered` out of the drag's way.
    ///
    /// Tiles are handled in list order, each one seeing the moves made
    /// before it. A tile with nowhere to go stays put.
    pub fn reorder(
        &self,
        tiles: &mut [Tile],
        drag: &DragNode,
        hovered: &HoverSet,
        displaced: &mut Vec<DisplacedNode>,
    ) -> Vec<Displacement> {
        let hovered_area: Region = hovered.rects(self.grid).collect();
        if hovered_area.is_empty() {
            return Vec::new();
        }

        let in_the_way: Vec<TileId> = OccupancyModel::new(self.grid, tiles)
            .tiles_overlapping(&hovered_area, drag.tile)
            .map(|t| t.id)
            .collect();

        let mut moves = Vec::new();
        for id in in_the_way {
            let Some(idx) = tiles.iter().position(|t| t.id == id) else {
                continue;
            };
            let (Some(from_cell), Some(from)) = (tiles[idx].position, tiles[idx].footprint(self.grid))
            else {
                continue;
            };

            let mut free = OccupancyModel::new(self.grid, tiles).free_region(&[drag.tile, id]);
            free.subtract_rect(drag.current_rect);

            let Some(target) =
                PlacementValidator::new(self.grid).find_free_footprint(tiles[idx].span, &free)
            else {
                warn!(tile = %id, "no free footprint for displaced tile; left in place");
                continue;
            };
            let to_cell = target.coord;
            if to_cell == from_cell {
                continue;
            }

            tiles[idx].position = Some(to_cell);
            let Some(to) = tiles[idx].footprint(self.grid) else {
                continue;
            };
            record_displacement(displaced, id, from_cell, from, to_cell);
            debug!(tile = %id, from = %from_cell, to = %to_cell, "tile displaced");
            moves.push(Displacement {
                tile: id,
                from_cell,
                to_cell,
                from,
                to,
            });
        }
        moves
    }

    /// Return displaced tiles whose original footprint is free again.
    ///
    /// The hovered cells stay reserved for the drag. Besides the dragged
    /// tile, the displaced tile itself is left out of the free region, so a
    /// tile may slide back across its own proposed footprint. Records whose
    /// tile no longer exists are dropped silently.
    pub fn revert_if_possible(
        &self,
        tiles: &mut [Tile],
        drag_tile: Option<TileId>,
        hovered: &HoverSet,
        displaced: &mut Vec<DisplacedNode>,
    ) -> Vec<Reversion> {
        let hovered_area: Region = hovered.rects(self.grid).collect();
        let mut back = Vec::new();
        let mut i = 0;
        while i < displaced.len() {
            let node = displaced[i];
            let Some(idx) = tiles.iter().position(|t| t.id == node.tile) else {
                displaced.remove(i);
                continue;
            };

            let mut excluding = vec![node.tile];
            excluding.extend(drag_tile);
            let mut free = OccupancyModel::new(self.grid, tiles).free_region(&excluding);
            free.subtract_region(&hovered_area);

            if !is_footprint_free(&node.original_footprint, &free) {
                i += 1;
                continue;
            }
            tiles[idx].position = Some(node.original);
            displaced.remove(i);
            debug!(tile = %node.tile, to = %node.original, "displacement reverted");
            back.push(Reversion {
                tile: node.tile,
                cell: node.original,
                to: node.original_footprint,
            });
        }
        back
    }

    /// Return every displaced tile to its original position, with nothing
    /// reserved for the drag.
    ///
    /// Tiles come back one at a time for as long as one can. Tiles left
    /// holding each other's original cells are then moved back together,
    /// provided no other tile sits on any of their originals.
    pub fn restore_all(
        &self,
        tiles: &mut [Tile],
        drag_tile: Option<TileId>,
        displaced: &mut Vec<DisplacedNode>,
    ) -> Vec<Reversion> {
        let unreserved = HoverSet::empty();
        let mut back = Vec::new();
        loop {
            let step = self.revert_if_possible(tiles, drag_tile, &unreserved, displaced);
            if step.is_empty() {
                break;
            }
            back.extend(step);
        }
        if displaced.is_empty() {
            return back;
        }

        let mut excluding: Vec<TileId> = displaced.iter().map(|n| n.tile).collect();
        excluding.extend(drag_tile);
        let free = OccupancyModel::new(self.grid, tiles).free_region(&excluding);
        let clear = displaced.iter().enumerate().all(|(i, a)| {
            is_footprint_free(&a.original_footprint, &free)
                && displaced[i + 1..]
                    .iter()
                    .all(|b| !a.original_footprint.intersects(&b.original_footprint))
        });
        if !clear {
            warn!(remaining = displaced.len(), "displaced tiles cannot return to their originals");
            return back;
        }

        for node in displaced.drain(..) {
            let Some(tile) = tiles.iter_mut().find(|t| t.id == node.tile) else {
                continue;
            };
            tile.position = Some(node.original);
            debug!(tile = %node.tile, to = %node.original, "displacement reverted");
            back.push(Reversion {
                tile: node.tile,
                cell: node.original,
                to: node.original_footprint,
            });
        }
        back
    }
}

fn record_displacement(
    displaced: &mut Vec<DisplacedNode>,
    tile: TileId,
    from_cell: CellCoord,
    from: Rect,
    to_cell: CellCoord,
) {
    match displaced.iter().position(|n| n.tile == tile) {
        Some(at) if displaced[at].original == to_cell => {
            displaced.remove(at);
        }
        Some(at) => displaced[at].proposed = to_cell,
        None => displaced.push(DisplacedNode {
            tile,
            original: from_cell,
            original_footprint: from,
            proposed: to_cell,
        }),
    }
}
