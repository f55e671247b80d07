#![forbid(unsafe_code)]

//! Core: geometry, region algebra, pointer events, timers and logging for the
//! draggrid tile engine.

pub mod event;
pub mod geometry;
pub mod logging;
pub mod region;
pub mod timer;
pub mod velocity;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};
