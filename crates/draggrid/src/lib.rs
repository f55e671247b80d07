#![forbid(unsafe_code)]

//! Draggable tile-grid engine.
//!
//! A rectangular surface is divided into uniform square cells and tiles
//! spanning whole cells are placed on it. Tiles can be picked up, dragged
//! and dropped; tiles in the way are pushed aside after the pointer rests
//! for a moment, and slide back once the drag moves on.
//!
//! ```
//! use std::time::Duration;
//! use draggrid::prelude::*;
//!
//! let timer = ManualTimer::default();
//! let mut grid = DragGrid::new(DragGridConfig::default(), timer).unwrap();
//! grid.on_resize(200, 200);
//!
//! let id = TileId::new(1).unwrap();
//! grid.add_tile(Tile::new(id, Span::UNIT).at(0, 0)).unwrap();
//!
//! let t0 = grid.timer().now();
//! grid.pointer_down(Point::new(25, 25), t0);
//! grid.pointer_move(Point::new(175, 25), t0 + Duration::from_millis(300));
//! let events = grid.pointer_up(Point::new(175, 25), t0 + Duration::from_millis(400));
//! assert!(events.iter().any(|e| matches!(e, GridEvent::Dropped { .. })));
//! assert_eq!(grid.tile(id).unwrap().position, Some(CellCoord::new(3, 0)));
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod session;
pub mod surface;

// --- Core re-exports -------------------------------------------------------

pub use draggrid_core::event::PointerEvent;
pub use draggrid_core::geometry::{Point, Rect, Sides};
pub use draggrid_core::region::Region;
pub use draggrid_core::timer::{ManualTimer, TimerHandle, TimerService};

// --- Layout re-exports -----------------------------------------------------

pub use draggrid_layout::{
    Cell, CellCoord, CellGrid, CellSizing, Gravity, HoverSet, Span, Tile, TileId, TileIdError,
};

// --- Engine ----------------------------------------------------------------

pub use config::DragGridConfig;
pub use error::{ConfigError, DragGridError};
pub use event::{GridEvent, NoopReason};
pub use session::{DragSnapshot, DragState};
pub use surface::DragGrid;

/// Logging setup for hosts.
pub mod logging {
    /// Install a global JSON subscriber filtered by `RUST_LOG`.
    #[cfg(feature = "tracing-json")]
    pub fn install_json_subscriber() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        use tracing_subscriber::EnvFilter;

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init()
    }
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CellCoord, CellSizing, DragGrid, DragGridConfig, DragGridError, DragState, GridEvent,
        Gravity, ManualTimer, NoopReason, Point, PointerEvent, Rect, Sides, Span, Tile, TileId,
        TimerService,
    };
}
