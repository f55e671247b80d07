#![forbid(unsafe_code)]

//! Transient records that exist only while a drag session is open.

use draggrid_core::geometry::Rect;
use serde::{Deserialize, Serialize};

use crate::cell_grid::CellCoord;
use crate::tile::{Span, TileId};

/// The lifted tile.
///
/// `start_rect` is the footprint the tile occupied when it was picked up.
/// `current_rect` is the lifted (scaled) rectangle that follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragNode {
    pub tile: TileId,
    pub span: Span,
    pub start_position: CellCoord,
    pub start_rect: Rect,
    pub current_rect: Rect,
}

impl DragNode {
    /// Translate the lifted rectangle by a pointer delta.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.current_rect = self.current_rect.offset(dx, dy);
    }
}

/// A tile pushed aside by the current drag.
///
/// `original` is the position the tile had before the session first moved
/// it, and stays fixed however many times the tile is pushed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplacedNode {
    pub tile: TileId,
    pub original: CellCoord,
    pub original_footprint: Rect,
    pub proposed: CellCoord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_moves_only_current_rect() {
        let mut node = DragNode {
            tile: TileId::MIN,
            span: Span::UNIT,
            start_position: CellCoord::new(0, 0),
            start_rect: Rect::new(0, 0, 50, 50),
            current_rect: Rect::new(5, 5, 40, 40),
        };
        node.translate(10, -3);
        assert_eq!(node.current_rect, Rect::new(15, 2, 40, 40));
        assert_eq!(node.start_rect, Rect::new(0, 0, 50, 50));
    }
}
