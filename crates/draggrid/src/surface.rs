#![forbid(unsafe_code)]

//! The drag-grid engine.
//!
//! [`DragGrid`] owns the lattice, the authoritative tile list, the current
//! drag session and a [`TimerService`]. Hosts feed it resize, tile and
//! pointer events plus fired timer handles; each call returns the
//! [`GridEvent`]s it produced.
//!
//! # Invariants
//!
//! 1. Outside `Dragging`, placed tile footprints are pairwise disjoint.
//! 2. At most one hover timer is pending, and only while `Dragging`.
//! 3. Every displaced record refers to a tile whose current position is the
//!    record's proposed cell.

use std::time::Instant;

use draggrid_core::event::PointerEvent;
use draggrid_core::geometry::{Point, Rect};
use draggrid_core::timer::{ManualTimer, TimerHandle, TimerService};
use draggrid_core::{debug, trace, warn};
use draggrid_layout::{
    Cell, CellCoord, CellGrid, DragNode, HoverResolver, OccupancyModel,
    PlacementValidator, ReorderEngine, Span, Tile, TileId, is_footprint_free, resolve_cell_size,
};

use crate::config::DragGridConfig;
use crate::error::DragGridError;
use crate::event::{GridEvent, NoopReason};
use crate::session::{DragSession, DragSnapshot, DragState, Release};

/// Draggable tile grid.
#[derive(Debug)]
pub struct DragGrid<T: TimerService = ManualTimer> {
    config: DragGridConfig,
    timer: T,
    grid: CellGrid,
    tiles: Vec<Tile>,
    session: DragSession,
    edit_mode: bool,
}

impl<T: TimerService> DragGrid<T> {
    /// Create an engine with an empty grid. Call [`on_resize`](Self::on_resize)
    /// once the surface size is known.
    pub fn new(config: DragGridConfig, timer: T) -> Result<Self, DragGridError> {
        config.validate()?;
        let edit_mode = config.edit_mode;
        Ok(Self {
            config,
            timer,
            grid: CellGrid::empty(),
            tiles: Vec::new(),
            session: DragSession::default(),
            edit_mode,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────────

    #[must_use]
    pub fn config(&self) -> &DragGridConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Tiles in insertion order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Current footprint of a tile.
    #[must_use]
    pub fn footprint(&self, id: TileId) -> Option<Rect> {
        self.tile(id).and_then(|t| t.footprint(&self.grid))
    }

    #[must_use]
    pub const fn state(&self) -> DragState {
        self.session.state
    }

    #[must_use]
    pub const fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Cells the dragged tile would cover if dropped now.
    #[must_use]
    pub fn current_hovered_cells(&self) -> &[CellCoord] {
        self.session.hovered.cells()
    }

    /// Start and live rectangles of the dragged tile.
    #[must_use]
    pub fn drag_snapshot(&self) -> Option<DragSnapshot> {
        self.session.snapshot()
    }

    /// First cell, row-major, where a `h_span x v_span` tile would fit.
    #[must_use]
    pub fn free_cell_for(&self, h_span: i32, v_span: i32) -> Option<&Cell> {
        let free = self.occupancy().free_region(&self.excluded());
        PlacementValidator::new(&self.grid).find_free_footprint(Span::new(h_span, v_span), &free)
    }

    /// True if `rect` lies entirely in free space.
    #[must_use]
    pub fn is_placement_valid(&self, rect: Rect) -> bool {
        let free = self.occupancy().free_region(&self.excluded());
        is_footprint_free(&rect, &free)
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    fn occupancy(&self) -> OccupancyModel<'_> {
        OccupancyModel::new(&self.grid, &self.tiles)
    }

    fn excluded(&self) -> Vec<TileId> {
        match self.session.state {
            DragState::Dragging { tile } => vec![tile],
            _ => Vec::new(),
        }
    }

    // ── Surface and tiles ────────────────────────────────────────────────

    /// Rebuild the lattice for a new surface size and re-seed every tile.
    ///
    /// A drag in progress is abandoned: the tile keeps its start position
    /// and is reported as dropped wherever re-seeding leaves it.
    pub fn on_resize(&mut self, width: i32, height: i32) -> Vec<GridEvent> {
        let abandoned = self.abandon_drag();

        let bounds = Rect::from_size(width, height).inner(self.config.padding);
        let cell_size =
            resolve_cell_size(width, height, self.config.padding, self.config.cell_sizing);
        self.grid = CellGrid::rebuild_within(bounds, cell_size, self.config.gravity);
        debug!(
            width,
            height,
            columns = self.grid.columns(),
            rows = self.grid.rows(),
            cell_size,
            "grid rebuilt"
        );

        let mut events = vec![GridEvent::GridRebuilt {
            columns: self.grid.columns(),
            rows: self.grid.rows(),
            cell_size: self.grid.cell_size(),
        }];
        if self.grid.is_empty() {
            warn!(width, height, cell_size, "grid collapsed to empty; placement deferred");
        } else {
            events.extend(self.reseed());
        }
        if let Some(tile) = abandoned
            && let Some(rect) = self.footprint(tile)
        {
            events.push(GridEvent::Dropped { tile, rect });
        }
        events
    }

    /// Re-validate every tile in list order against the tiles before it.
    fn reseed(&mut self) -> Vec<GridEvent> {
        let mut events = Vec::new();
        for i in 0..self.tiles.len() {
            let (earlier, rest) = self.tiles.split_at_mut(i);
            let tile = &mut rest[0];
            let free = OccupancyModel::new(&self.grid, earlier).free_region(&[]);
            let before = tile.position;
            tile.position = PlacementValidator::new(&self.grid).resolve_position(tile, &free);
            match (before, tile.position) {
                (_, Some(after)) if before != Some(after) => {
                    if let Some(rect) = tile.footprint(&self.grid) {
                        events.push(GridEvent::TilePlaced { tile: tile.id, rect });
                    }
                }
                (Some(_), None) => {
                    warn!(tile = %tile.id, "no free footprint after resize; tile unplaced");
                    events.push(GridEvent::TileUnplaced { tile: tile.id });
                }
                _ => {}
            }
        }
        events
    }

    /// Add a tile. Its requested position is kept when free, otherwise the
    /// first free footprint is used.
    pub fn add_tile(&mut self, mut tile: Tile) -> Result<Vec<GridEvent>, DragGridError> {
        if self.tile(tile.id).is_some() {
            return Err(DragGridError::DuplicateTile { tile: tile.id });
        }
        if self.grid.is_empty() {
            // Placed on the next valid resize.
            self.tiles.push(tile);
            return Ok(Vec::new());
        }

        let free = self.occupancy().free_region(&[]);
        tile.position = PlacementValidator::new(&self.grid).resolve_position(&tile, &free);
        let id = tile.id;
        let rect = tile.footprint(&self.grid);
        self.tiles.push(tile);

        Ok(match rect {
            Some(rect) => {
                debug!(tile = %id, ?rect, "tile placed");
                vec![GridEvent::TilePlaced { tile: id, rect }]
            }
            None => {
                warn!(tile = %id, "no free footprint for new tile");
                vec![GridEvent::TileUnplaced { tile: id }]
            }
        })
    }

    /// Remove a tile. Removing the session's tile ends the session.
    pub fn remove_tile(&mut self, id: TileId) -> Result<Vec<GridEvent>, DragGridError> {
        let Some(index) = self.tiles.iter().position(|t| t.id == id) else {
            return Err(DragGridError::UnknownTile { tile: id });
        };
        if self.session.state.tile() == Some(id) {
            self.cancel_hover_timer();
            self.session.reset();
        }
        self.tiles.remove(index);
        self.session.displaced.retain(|node| node.tile != id);
        debug!(tile = %id, "tile removed");
        Ok(vec![GridEvent::TileRemoved { tile: id }])
    }

    /// Toggle edit mode. Only new drags are affected.
    pub fn set_edit_mode(&mut self, enabled: bool) -> Vec<GridEvent> {
        if self.edit_mode == enabled {
            return Vec::new();
        }
        self.edit_mode = enabled;
        debug!(enabled, "edit mode changed");
        vec![GridEvent::EditModeChanged { enabled }]
    }

    /// Surface detached from its host: nothing may fire afterwards.
    pub fn on_detach(&mut self) {
        self.cancel_hover_timer();
    }

    /// The renderer finished settling a dropped tile.
    pub fn settle_complete(&mut self) -> Vec<GridEvent> {
        if self.session.state.is_settling() {
            debug!(state = ?self.session.state, "settle complete");
            self.session.reset();
            Vec::new()
        } else {
            noop(NoopReason::NoDragInProgress)
        }
    }

    // ── Pointer input ────────────────────────────────────────────────────

    /// Dispatch one pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<GridEvent> {
        match event {
            PointerEvent::Down { position, at } => self.pointer_down(position, at),
            PointerEvent::Move { position, at } => self.pointer_move(position, at),
            PointerEvent::Up { position, at } => self.pointer_up(position, at),
            PointerEvent::Cancel { at } => self.pointer_cancel(at),
        }
    }

    pub fn pointer_down(&mut self, position: Point, at: Instant) -> Vec<GridEvent> {
        let hit = self.tile_at(position);
        match self.session.state {
            DragState::Dragging { .. } => return noop(NoopReason::ActiveDragInProgress),
            DragState::Committing { tile } | DragState::Cancelling { tile } => {
                if hit != Some(tile) {
                    return noop(NoopReason::SessionBusy);
                }
                debug!(tile = %tile, "settle interrupted by re-pick");
                return self.start_drag(tile, position, at);
            }
            DragState::Idle => {}
        }

        if !self.edit_mode {
            return noop(NoopReason::EditModeDisabled);
        }
        if let Some(tile) = hit {
            return self.start_drag(tile, position, at);
        }
        self.session.pressed_cell = self.grid.cell_under(position).map(|cell| cell.coord);
        self.session.switch_off_armed = self.session.pressed_cell.is_none();
        Vec::new()
    }

    pub fn pointer_move(&mut self, position: Point, at: Instant) -> Vec<GridEvent> {
        if let Some(pressed) = self.session.pressed_cell {
            if self.grid.cell_under(position).map(|c| c.coord) != Some(pressed) {
                self.session.pressed_cell = None;
            }
            return Vec::new();
        }
        if self.session.switch_off_armed {
            return Vec::new();
        }
        let DragState::Dragging { tile } = self.session.state else {
            return noop(NoopReason::NoDragInProgress);
        };

        let (dx, dy) = self.session.track(position, at);
        let mut events = self.refresh_hover(tile);

        let threshold = self.config.stationary_threshold;
        if dx.abs() < threshold && dy.abs() < threshold {
            events.extend(self.revert());
        }
        events
    }

    pub fn pointer_up(&mut self, position: Point, at: Instant) -> Vec<GridEvent> {
        if let Some(cell) = self.session.pressed_cell.take() {
            return vec![GridEvent::CellClicked { cell }];
        }
        if self.session.switch_off_armed {
            self.session.switch_off_armed = false;
            return self.set_edit_mode(false);
        }
        if !self.session.state.is_dragging() {
            return noop(NoopReason::NoDragInProgress);
        }
        self.finish_drag(position, at, Release::Up)
    }

    pub fn pointer_cancel(&mut self, at: Instant) -> Vec<GridEvent> {
        if self.session.pressed_cell.is_some() || self.session.switch_off_armed {
            self.session.pressed_cell = None;
            self.session.switch_off_armed = false;
            return Vec::new();
        }
        if !self.session.state.is_dragging() {
            return noop(NoopReason::NoDragInProgress);
        }
        let Some(position) = self.session.last_pointer() else {
            return noop(NoopReason::NoDragInProgress);
        };
        self.finish_drag(position, at, Release::Cancel)
    }

    /// A timer handle from the [`TimerService`] fired.
    pub fn on_timer(&mut self, handle: TimerHandle) -> Vec<GridEvent> {
        if self.session.hover_timer != Some(handle) || !self.session.state.is_dragging() {
            return noop(NoopReason::StaleTimer);
        }
        self.session.hover_timer = None;
        let mut events = self.revert();
        events.extend(self.reorder());
        events
    }

    // ── Session internals ────────────────────────────────────────────────

    /// Topmost placed tile under the point.
    fn tile_at(&self, position: Point) -> Option<TileId> {
        self.tiles
            .iter()
            .rev()
            .find(|t| {
                t.footprint(&self.grid)
                    .is_some_and(|rect| rect.contains(position.x, position.y))
            })
            .map(|t| t.id)
    }

    fn start_drag(&mut self, id: TileId, pointer: Point, at: Instant) -> Vec<GridEvent> {
        let Some(tile) = self.tile(id) else {
            return noop(NoopReason::NoDragInProgress);
        };
        let (Some(start_position), Some(start_rect)) = (tile.position, tile.footprint(&self.grid))
        else {
            return noop(NoopReason::NoDragInProgress);
        };
        let node = DragNode {
            tile: id,
            span: tile.span,
            start_position,
            start_rect,
            current_rect: start_rect.scaled(self.config.lift_scale),
        };
        let hovered = HoverResolver::new(&self.grid).resolve(node.current_rect, node.span);

        self.cancel_hover_timer();
        self.session.begin(node, hovered, pointer, at);
        debug!(tile = %id, ?start_rect, "drag started");
        vec![GridEvent::DragStarted {
            tile: id,
            start_rect,
            current_rect: node.current_rect,
        }]
    }

    /// Resolve the hover set for the live rectangle and restart the hover
    /// timer when it changes.
    fn refresh_hover(&mut self, tile: TileId) -> Vec<GridEvent> {
        let Some(node) = self.session.node else {
            return Vec::new();
        };
        let hovered = HoverResolver::new(&self.grid).resolve(node.current_rect, node.span);
        trace!(tile = %tile, current = ?node.current_rect, cells = ?hovered.cells(), "hover resolved");
        if hovered.cells() == self.session.hovered.cells() {
            self.session.hovered = hovered;
            return Vec::new();
        }

        self.cancel_hover_timer();
        if !hovered.is_empty() {
            self.session.hover_timer = Some(self.timer.schedule_after(self.config.hover_delay));
        }
        let cells = hovered.cells().to_vec();
        self.session.hovered = hovered;
        vec![GridEvent::HoverChanged { tile, cells }]
    }

    fn revert(&mut self) -> Vec<GridEvent> {
        if self.session.displaced.is_empty() {
            return Vec::new();
        }
        let drag_tile = self.session.node.map(|n| n.tile);
        ReorderEngine::new(&self.grid)
            .revert_if_possible(
                &mut self.tiles,
                drag_tile,
                &self.session.hovered,
                &mut self.session.displaced,
            )
            .into_iter()
            .map(|r| GridEvent::Reverted {
                tile: r.tile,
                to: r.to,
            })
            .collect()
    }

    fn reorder(&mut self) -> Vec<GridEvent> {
        let Some(node) = self.session.node else {
            return Vec::new();
        };
        ReorderEngine::new(&self.grid)
            .reorder(
                &mut self.tiles,
                &node,
                &self.session.hovered,
                &mut self.session.displaced,
            )
            .into_iter()
            .map(|d| GridEvent::Reordered {
                tile: d.tile,
                from: d.from,
                to: d.to,
            })
            .collect()
    }

    fn finish_drag(&mut self, position: Point, at: Instant, release: Release) -> Vec<GridEvent> {
        let DragState::Dragging { tile } = self.session.state else {
            return noop(NoopReason::NoDragInProgress);
        };
        self.session.track(position, at);
        let mut events = self.refresh_hover(tile);
        self.cancel_hover_timer();

        let velocity = self.session.release_velocity();
        if release == Release::Up && velocity.y.abs() > self.config.fling_velocity {
            return self.fling(tile, events);
        }

        events.extend(self.revert());
        let Some(node) = self.session.node else {
            return events;
        };
        let position = match self.drop_target(&node) {
            Some(position) => position,
            None => {
                events.extend(self.restore_displaced(Some(tile)));
                self.fallback_position(&node)
            }
        };
        if let Some(entry) = self.tiles.iter_mut().find(|t| t.id == tile) {
            entry.position = Some(position);
        }
        let rect = self.footprint(tile).unwrap_or(node.start_rect);
        debug!(tile = %tile, cell = %position, ?release, "drag finished");
        events.push(GridEvent::Dropped { tile, rect });
        self.session.settle(release);
        events
    }

    /// True if the dragged tile's footprint at `coord` is free of every
    /// other tile.
    fn drop_fits(&self, node: &DragNode, coord: CellCoord) -> bool {
        let Some(tile) = self.tile(node.tile) else {
            return false;
        };
        let free = self.occupancy().free_region(&[node.tile]);
        tile.footprint_at(&self.grid, coord)
            .is_some_and(|rect| is_footprint_free(&rect, &free))
    }

    /// The hovered cells if free, else the start position if still free.
    fn drop_target(&self, node: &DragNode) -> Option<CellCoord> {
        let hovered = &self.session.hovered;
        if let Some(target) = hovered.top_left()
            && self.drop_fits(node, target)
        {
            return Some(target);
        }
        if !hovered.is_empty() {
            warn!(tile = %node.tile, "hovered footprint occupied; falling back to start");
        }
        self.drop_fits(node, node.start_position)
            .then_some(node.start_position)
    }

    /// Put every displaced tile back, hovered cells included.
    fn restore_displaced(&mut self, drag_tile: Option<TileId>) -> Vec<GridEvent> {
        if self.session.displaced.is_empty() {
            return Vec::new();
        }
        ReorderEngine::new(&self.grid)
            .restore_all(&mut self.tiles, drag_tile, &mut self.session.displaced)
            .into_iter()
            .map(|r| GridEvent::Reverted {
                tile: r.tile,
                to: r.to,
            })
            .collect()
    }

    /// Landing spot once displaced tiles are back: the start position,
    /// else the first free footprint.
    fn fallback_position(&self, node: &DragNode) -> CellCoord {
        if self.drop_fits(node, node.start_position) {
            return node.start_position;
        }
        let Some(tile) = self.tile(node.tile) else {
            return node.start_position;
        };
        let free = self.occupancy().free_region(&[node.tile]);
        if let Some(cell) = PlacementValidator::new(&self.grid).find_free_footprint(tile.span, &free)
        {
            warn!(tile = %node.tile, cell = %cell.coord, "start footprint taken; relocated");
            return cell.coord;
        }
        warn!(tile = %node.tile, "no free footprint on drop; tile stays at start");
        node.start_position
    }

    fn fling(&mut self, tile: TileId, mut events: Vec<GridEvent>) -> Vec<GridEvent> {
        self.tiles.retain(|t| t.id != tile);
        self.session.displaced.retain(|n| n.tile != tile);
        events.extend(self.restore_displaced(None));
        debug!(tile = %tile, "tile removed by fling");
        events.push(GridEvent::RemovedByFling { tile });
        self.session.reset();
        events
    }

    /// End a running drag without moving anything. Returns the tile.
    fn abandon_drag(&mut self) -> Option<TileId> {
        self.cancel_hover_timer();
        let DragState::Dragging { tile } = self.session.state else {
            return None;
        };
        debug!(tile = %tile, "drag abandoned");
        self.session.reset();
        Some(tile)
    }

    fn cancel_hover_timer(&mut self) {
        if let Some(handle) = self.session.hover_timer.take() {
            self.timer.cancel(handle);
        }
    }
}

fn noop(reason: NoopReason) -> Vec<GridEvent> {
    vec![GridEvent::Noop { reason }]
}
