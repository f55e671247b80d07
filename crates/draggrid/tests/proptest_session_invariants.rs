//! Property-based invariant tests for the drag session.
//!
//! Random pointer, timer and settle sequences on a 4x4 grid, either sparsely
//! filled or packed with no free cell. After every step:
//!
//! 1. Tiles other than the dragged one never overlap.
//! 2. Outside `Dragging`, every placed tile lies inside the lattice.
//! 3. At most one hover timer is pending, and none outside `Dragging`.
//! 4. The hovered set is empty or exactly as large as the dragged span.

use std::time::{Duration, Instant};

use draggrid::prelude::*;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Step {
    Down(i32, i32),
    Move(i32, i32),
    Up(i32, i32),
    Cancel,
    Wait(u64),
    Settle,
}

fn coord() -> impl Strategy<Value = i32> {
    -20i32..220
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => (coord(), coord()).prop_map(|(x, y)| Step::Down(x, y)),
        5 => (coord(), coord()).prop_map(|(x, y)| Step::Move(x, y)),
        2 => (coord(), coord()).prop_map(|(x, y)| Step::Up(x, y)),
        1 => Just(Step::Cancel),
        2 => (0u64..900).prop_map(Step::Wait),
        1 => Just(Step::Settle),
    ]
}

fn id(raw: u64) -> TileId {
    TileId::new(raw).expect("non-zero")
}

type Layout = Vec<(u64, i32, i32, u16, u16)>;

fn build(layout: &[(u64, i32, i32, u16, u16)]) -> DragGrid {
    let mut grid = DragGrid::new(DragGridConfig::default(), ManualTimer::default())
        .expect("valid config");
    grid.on_resize(200, 200);
    for &(raw, h, v, col, row) in layout {
        grid.add_tile(Tile::new(id(raw), Span::new(h, v)).at(col, row))
            .expect("unique");
    }
    grid
}

fn seeded() -> DragGrid {
    build(&[(1, 1, 1, 0, 0), (2, 2, 1, 2, 0), (3, 1, 2, 0, 2), (4, 1, 1, 3, 3)])
}

/// Tile every cell of the 4x4 grid with 1x1, 2x1 and 1x2 tiles.
///
/// Cells are visited row-major; `shapes` picks the shape for each free
/// cell, falling back to 1x1 when the wider shape does not fit.
fn packed_layout() -> impl Strategy<Value = Layout> {
    prop::collection::vec(0u8..3, 16).prop_map(|shapes| {
        const SIDE: u16 = 4;
        let mut taken = [[false; SIDE as usize]; SIDE as usize];
        let mut layout = Vec::new();
        for row in 0..SIDE {
            for col in 0..SIDE {
                let (c, r) = (usize::from(col), usize::from(row));
                if taken[r][c] {
                    continue;
                }
                let shape = shapes[r * usize::from(SIDE) + c];
                let (h, v): (u16, u16) = match shape {
                    1 if col + 1 < SIDE && !taken[r][c + 1] => (2, 1),
                    2 if row + 1 < SIDE => (1, 2),
                    _ => (1, 1),
                };
                for dr in 0..usize::from(v) {
                    for dc in 0..usize::from(h) {
                        taken[r + dr][c + dc] = true;
                    }
                }
                let raw = layout.len() as u64 + 1;
                layout.push((raw, i32::from(h), i32::from(v), col, row));
            }
        }
        layout
    })
}

/// Apply one step; `clock` is the pointer timestamp, kept monotonic.
fn apply(grid: &mut DragGrid, step: &Step, clock: &mut Instant) {
    *clock += Duration::from_millis(16);
    match *step {
        Step::Down(x, y) => {
            grid.pointer_down(Point::new(x, y), *clock);
        }
        Step::Move(x, y) => {
            grid.pointer_move(Point::new(x, y), *clock);
        }
        Step::Up(x, y) => {
            grid.pointer_up(Point::new(x, y), *clock);
        }
        Step::Cancel => {
            grid.pointer_cancel(*clock);
        }
        Step::Wait(ms) => {
            *clock += Duration::from_millis(ms);
            for handle in grid.timer_mut().advance(Duration::from_millis(ms)) {
                grid.on_timer(handle);
            }
        }
        Step::Settle => {
            grid.settle_complete();
        }
    }
}

fn check(grid: &DragGrid) -> Result<(), TestCaseError> {
    let state = grid.state();
    let dragged = match state {
        DragState::Dragging { tile } => Some(tile),
        _ => None,
    };

    let rects: Vec<Rect> = grid
        .tiles()
        .iter()
        .filter(|t| Some(t.id) != dragged)
        .filter_map(|t| t.footprint(grid.grid()))
        .collect();
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            prop_assert!(!a.intersects(b), "overlap {:?} / {:?} in {:?}", a, b, state);
        }
    }

    if dragged.is_none() {
        let region = grid.grid().region();
        for rect in &rects {
            prop_assert!(region.contains_rect(rect), "{:?} outside {:?}", rect, region);
        }
    }

    let pending = grid.timer().pending_count();
    prop_assert!(pending <= 1);
    if dragged.is_none() {
        prop_assert_eq!(pending, 0);
    }

    let hovered = grid.current_hovered_cells();
    if let Some(tile) = dragged {
        let span = grid.tile(tile).map(|t| t.span).unwrap_or(Span::UNIT);
        prop_assert!(hovered.is_empty() || hovered.len() == span.cells());
    } else {
        prop_assert!(hovered.is_empty());
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// Properties
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn invariants_hold_under_random_interaction(
        steps in prop::collection::vec(step_strategy(), 1..60),
    ) {
        let mut grid = seeded();
        let mut clock = grid.timer().now();
        check(&grid)?;
        for step in &steps {
            apply(&mut grid, step, &mut clock);
            check(&grid)?;
        }
    }

    #[test]
    fn packed_grid_never_overlaps(
        layout in packed_layout(),
        steps in prop::collection::vec(step_strategy(), 1..60),
    ) {
        let mut grid = build(&layout);
        prop_assert_eq!(grid.tiles().len(), layout.len());
        let mut clock = grid.timer().now();
        check(&grid)?;
        for step in &steps {
            apply(&mut grid, step, &mut clock);
            check(&grid)?;
        }
    }

    #[test]
    fn tiles_only_leave_by_fling(
        steps in prop::collection::vec(step_strategy(), 1..60),
    ) {
        let mut grid = seeded();
        let mut clock = grid.timer().now();
        let mut expected = grid.tiles().len();
        for step in &steps {
            let before = grid.state();
            apply(&mut grid, step, &mut clock);
            if grid.tiles().len() != expected {
                prop_assert!(before.is_dragging(), "tile vanished outside a drag");
                prop_assert_eq!(grid.tiles().len(), expected - 1);
                prop_assert_eq!(grid.state(), DragState::Idle);
                expected -= 1;
            }
        }
    }
}
