#![forbid(unsafe_code)]

//! Structured logging integration tests.
//!
//! With logging enabled:
//!   cargo test -p draggrid --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p draggrid --test tracing_tests -- silent

use std::sync::{Arc, Mutex};
use std::time::Duration;

use draggrid::prelude::*;
use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event: level, message and structured fields.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: Vec<(String, String)>,
}

/// A tracing Layer that records every event.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor {
            message: String::new(),
            fields: Vec::new(),
        };
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// Run `f` under a capturing subscriber and return what it logged.
fn with_captured_events<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn id(raw: u64) -> TileId {
    TileId::new(raw).unwrap()
}

/// One drag across a 4x4 grid that pushes a tile aside, plus a tile that
/// finds no room.
fn run_session() {
    let mut grid = DragGrid::new(DragGridConfig::default(), ManualTimer::default()).unwrap();
    grid.on_resize(200, 200);
    grid.add_tile(Tile::new(id(1), Span::UNIT).at(0, 0)).unwrap();
    grid.add_tile(Tile::new(id(2), Span::UNIT).at(3, 0)).unwrap();
    grid.add_tile(Tile::new(id(3), Span::new(4, 3)).at(0, 1)).unwrap();
    grid.add_tile(Tile::new(id(4), Span::new(4, 1))).unwrap();

    let t0 = grid.timer().now();
    grid.pointer_down(Point::new(25, 25), t0);
    grid.pointer_move(Point::new(175, 25), t0 + Duration::from_millis(200));
    for handle in grid.timer_mut().advance(Duration::from_millis(600)) {
        grid.on_timer(handle);
    }
    grid.pointer_up(Point::new(175, 25), t0 + Duration::from_millis(900));
    grid.settle_complete();
}

// ============================================================================
// Tests
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn session_transitions_are_logged() {
    let events = with_captured_events(run_session);
    let messages: Vec<&str> = events.iter().map(|e| e.message.as_str()).collect();

    for expected in [
        "grid rebuilt",
        "drag started",
        "tile displaced",
        "drag finished",
        "settle complete",
    ] {
        assert!(
            messages.contains(&expected),
            "missing {expected:?} in {messages:?}"
        );
    }
}

#[test]
#[cfg(feature = "tracing")]
fn soft_failures_warn() {
    let events = with_captured_events(run_session);
    let warning = events
        .iter()
        .find(|e| e.message == "no free footprint for new tile")
        .expect("warning for tile without room");
    assert_eq!(warning.level, tracing::Level::WARN);
    assert!(
        warning
            .fields
            .iter()
            .any(|(name, value)| name == "tile" && value == "tile#4"),
        "fields: {:?}",
        warning.fields
    );
}

#[test]
#[cfg(feature = "tracing")]
fn hover_resolution_is_traced() {
    let events = with_captured_events(run_session);
    assert!(
        events
            .iter()
            .any(|e| e.level == tracing::Level::TRACE && e.message == "hover resolved")
    );
}

#[test]
#[cfg(not(feature = "tracing"))]
fn silent_when_disabled() {
    let events = with_captured_events(run_session);
    assert!(events.is_empty(), "unexpected events: {events:?}");
}
