#![forbid(unsafe_code)]

//! Drag session lifecycle.
//!
//! ```text
//! Idle -> Dragging -> Committing -> Idle   (pointer-up, settle_complete)
//!                  -> Cancelling -> Idle   (pointer-cancel, settle_complete)
//!                  -> Idle                 (fling, tile removed, resize)
//! ```
//!
//! The session only holds the transient records of one drag: the lifted
//! node, the current hover set, the tiles it pushed aside, the pending
//! hover timer and the pointer history. Geometry decisions are made by the
//! layout crate; the surface wires the two together.

use std::time::Instant;

use draggrid_core::geometry::{Point, Rect};
use draggrid_core::timer::TimerHandle;
use draggrid_core::velocity::{Velocity, VelocityTracker};
use draggrid_layout::{CellCoord, DisplacedNode, DragNode, HoverSet, TileId};
use serde::{Deserialize, Serialize};

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        tile: TileId,
    },
    /// Dropped; the renderer is settling the tile into place.
    Committing {
        tile: TileId,
    },
    /// Cancelled; the renderer is settling the tile into place.
    Cancelling {
        tile: TileId,
    },
}

impl DragState {
    /// Tile owned by the session, in any non-idle state.
    #[must_use]
    pub const fn tile(self) -> Option<TileId> {
        match self {
            Self::Idle => None,
            Self::Dragging { tile } | Self::Committing { tile } | Self::Cancelling { tile } => {
                Some(tile)
            }
        }
    }

    #[must_use]
    pub const fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    #[must_use]
    pub const fn is_settling(self) -> bool {
        matches!(self, Self::Committing { .. } | Self::Cancelling { .. })
    }
}

/// Read-only view of the lifted tile for overlay drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSnapshot {
    pub tile: TileId,
    pub start_rect: Rect,
    pub current_rect: Rect,
}

/// How a drag ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Release {
    Up,
    Cancel,
}

/// Transient state of the current interaction.
#[derive(Debug, Clone, Default)]
pub(crate) struct DragSession {
    pub(crate) state: DragState,
    pub(crate) node: Option<DragNode>,
    pub(crate) hovered: HoverSet,
    pub(crate) displaced: Vec<DisplacedNode>,
    pub(crate) hover_timer: Option<TimerHandle>,
    velocity: VelocityTracker,
    last_pointer: Option<Point>,
    /// Empty cell pressed in edit mode; released on the same cell it clicks.
    pub(crate) pressed_cell: Option<CellCoord>,
    /// Pointer-down hit nothing in edit mode; the release leaves edit mode.
    pub(crate) switch_off_armed: bool,
}

impl DragSession {
    /// Enter `Dragging` with a freshly lifted node.
    pub(crate) fn begin(&mut self, node: DragNode, hovered: HoverSet, pointer: Point, at: Instant) {
        self.state = DragState::Dragging { tile: node.tile };
        self.node = Some(node);
        self.hovered = hovered;
        self.displaced.clear();
        self.velocity.reset();
        self.velocity.record(pointer, at);
        self.last_pointer = Some(pointer);
        self.pressed_cell = None;
        self.switch_off_armed = false;
    }

    /// Follow the pointer and return the delta since the previous sample.
    pub(crate) fn track(&mut self, pointer: Point, at: Instant) -> (i32, i32) {
        let (dx, dy) = match self.last_pointer {
            Some(prev) => (pointer.x - prev.x, pointer.y - prev.y),
            None => (0, 0),
        };
        if let Some(node) = self.node.as_mut() {
            node.translate(dx, dy);
        }
        self.velocity.record(pointer, at);
        self.last_pointer = Some(pointer);
        (dx, dy)
    }

    /// Last pointer position seen during the drag.
    pub(crate) fn last_pointer(&self) -> Option<Point> {
        self.last_pointer
    }

    pub(crate) fn release_velocity(&self) -> Velocity {
        self.velocity.velocity()
    }

    /// Leave `Dragging` for the settle state matching `release`.
    /// Displacements become permanent.
    pub(crate) fn settle(&mut self, release: Release) {
        if let Some(tile) = self.state.tile() {
            self.state = match release {
                Release::Up => DragState::Committing { tile },
                Release::Cancel => DragState::Cancelling { tile },
            };
        }
        self.clear_drag();
    }

    /// Drop every transient record and return to `Idle`.
    pub(crate) fn reset(&mut self) {
        self.state = DragState::Idle;
        self.clear_drag();
        self.pressed_cell = None;
        self.switch_off_armed = false;
    }

    fn clear_drag(&mut self) {
        self.node = None;
        self.hovered = HoverSet::empty();
        self.displaced.clear();
        self.velocity.reset();
        self.last_pointer = None;
    }

    pub(crate) fn snapshot(&self) -> Option<DragSnapshot> {
        self.node.map(|node| DragSnapshot {
            tile: node.tile,
            start_rect: node.start_rect,
            current_rect: node.current_rect,
        })
    }
}
