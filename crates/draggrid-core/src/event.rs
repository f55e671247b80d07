#![forbid(unsafe_code)]

//! Pointer input consumed by the drag engine.
//!
//! Hosts translate their native touch/mouse stream into [`PointerEvent`]s.
//! Gesture classification (tap, long-press, scroll) stays with the host; the
//! engine only needs positions and timestamps.

use std::time::Instant;

use crate::geometry::Point;

/// One pointer sample in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer pressed at `position`.
    Down { position: Point, at: Instant },
    /// Pointer moved to `position`.
    Move { position: Point, at: Instant },
    /// Pointer released at `position`.
    Up { position: Point, at: Instant },
    /// The host aborted the pointer stream (focus loss, parent intercept).
    Cancel { at: Instant },
}

impl PointerEvent {
    /// Position, if the event carries one.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::Down { position, .. }
            | Self::Move { position, .. }
            | Self::Up { position, .. } => Some(*position),
            Self::Cancel { .. } => None,
        }
    }

    /// Timestamp of the sample.
    #[must_use]
    pub const fn at(&self) -> Instant {
        match self {
            Self::Down { at, .. }
            | Self::Move { at, .. }
            | Self::Up { at, .. }
            | Self::Cancel { at } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        let now = Instant::now();
        let down = PointerEvent::Down {
            position: Point::new(3, 4),
            at: now,
        };
        assert_eq!(down.position(), Some(Point::new(3, 4)));
        assert_eq!(down.at(), now);

        let cancel = PointerEvent::Cancel { at: now };
        assert_eq!(cancel.position(), None);
    }
}
