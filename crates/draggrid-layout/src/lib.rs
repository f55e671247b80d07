#![forbid(unsafe_code)]

//! Spatial layer of the draggrid engine.
//!
//! Builds the cell lattice, answers free-space and placement queries over a
//! tile list, resolves hover sets for a dragged tile, and decides which
//! tiles to push aside (and when to bring them back). Everything here is a
//! pure function of the grid, the tile list and the caller's transient
//! drag records; the session state machine lives in the `draggrid` crate.

pub mod cell_grid;
pub mod hover;
pub mod node;
pub mod occupancy;
pub mod placement;
pub mod reorder;
pub mod tile;

pub use cell_grid::{
    Cell, CellCoord, CellGrid, CellId, CellSizing, Direction, Gravity, resolve_cell_size,
};
pub use hover::{Corner, HoverResolver, HoverSet};
pub use node::{DisplacedNode, DragNode};
pub use occupancy::{OccupancyModel, is_footprint_free};
pub use placement::PlacementValidator;
pub use reorder::{Displacement, ReorderEngine, Reversion};
pub use tile::{Span, Tile, TileId, TileIdError};
