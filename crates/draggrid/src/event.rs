#![forbid(unsafe_code)]

//! Outbound notifications.
//!
//! Every engine entry point returns the [`GridEvent`]s it produced, in the
//! order they happened. Renderers apply them to their own projection of the
//! grid; nothing in an event borrows engine state.

use draggrid_core::geometry::Rect;
use draggrid_layout::{CellCoord, TileId};
use serde::{Deserialize, Serialize};

/// Why an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    /// Pointer-down outside edit mode.
    EditModeDisabled,
    /// Pointer-down while a drag is already running.
    ActiveDragInProgress,
    /// Pointer-down on another tile while the previous drop settles.
    SessionBusy,
    /// Move, release or cancel with nothing to act on.
    NoDragInProgress,
    /// Timer handle that is no longer the pending hover timer.
    StaleTimer,
}

/// One observable change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GridEvent {
    DragStarted {
        tile: TileId,
        start_rect: Rect,
        current_rect: Rect,
    },
    HoverChanged {
        tile: TileId,
        cells: Vec<CellCoord>,
    },
    Reordered {
        tile: TileId,
        from: Rect,
        to: Rect,
    },
    Reverted {
        tile: TileId,
        to: Rect,
    },
    Dropped {
        tile: TileId,
        rect: Rect,
    },
    RemovedByFling {
        tile: TileId,
    },
    TilePlaced {
        tile: TileId,
        rect: Rect,
    },
    TileUnplaced {
        tile: TileId,
    },
    TileRemoved {
        tile: TileId,
    },
    CellClicked {
        cell: CellCoord,
    },
    EditModeChanged {
        enabled: bool,
    },
    GridRebuilt {
        columns: u16,
        rows: u16,
        cell_size: i32,
    },
    Noop {
        reason: NoopReason,
    },
}

impl GridEvent {
    /// Tile the event is about, if any.
    #[must_use]
    pub const fn tile(&self) -> Option<TileId> {
        match self {
            Self::DragStarted { tile, .. }
            | Self::HoverChanged { tile, .. }
            | Self::Reordered { tile, .. }
            | Self::Reverted { tile, .. }
            | Self::Dropped { tile, .. }
            | Self::RemovedByFling { tile }
            | Self::TilePlaced { tile, .. }
            | Self::TileUnplaced { tile }
            | Self::TileRemoved { tile } => Some(*tile),
            Self::CellClicked { .. }
            | Self::EditModeChanged { .. }
            | Self::GridRebuilt { .. }
            | Self::Noop { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Noop { .. })
    }
}
