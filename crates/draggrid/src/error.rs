#![forbid(unsafe_code)]

//! Errors surfaced by the engine.
//!
//! Only caller mistakes become errors. Layout outcomes such as "no room for
//! this tile" or "drop fell back to the start position" are reported as
//! [`GridEvent`](crate::event::GridEvent)s instead.

use std::fmt;

use draggrid_layout::TileId;

/// Rejected configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidLiftScale { scale: f32 },
    InvalidFlingVelocity { velocity: f32 },
    ZeroCellCount,
    InvalidCellSize { size: i32 },
    NegativeStationaryThreshold { threshold: i32 },
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLiftScale { scale } => {
                write!(f, "lift scale must be in (0, 1], got {scale}")
            }
            Self::InvalidFlingVelocity { velocity } => {
                write!(f, "fling velocity must be finite and non-negative, got {velocity}")
            }
            Self::ZeroCellCount => write!(f, "cell count must be non-zero"),
            Self::InvalidCellSize { size } => {
                write!(f, "fixed cell size must be positive, got {size}")
            }
            Self::NegativeStationaryThreshold { threshold } => {
                write!(f, "stationary threshold must be non-negative, got {threshold}")
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::Parse(err) = self {
            return Some(err);
        }
        None
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Engine API misuse.
#[derive(Debug)]
pub enum DragGridError {
    DuplicateTile { tile: TileId },
    UnknownTile { tile: TileId },
    Config(ConfigError),
}

impl fmt::Display for DragGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTile { tile } => write!(f, "{tile} is already on the grid"),
            Self::UnknownTile { tile } => write!(f, "{tile} is not on the grid"),
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for DragGridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::Config(err) = self {
            return Some(err);
        }
        None
    }
}

impl From<ConfigError> for DragGridError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_names_the_tile() {
        let tile = TileId::new(7).expect("non-zero");
        assert_eq!(
            DragGridError::DuplicateTile { tile }.to_string(),
            "tile#7 is already on the grid"
        );
    }

    #[test]
    fn config_error_is_the_source() {
        let err = DragGridError::from(ConfigError::ZeroCellCount);
        let source = err.source().expect("wrapped");
        assert_eq!(source.to_string(), "cell count must be non-zero");
    }

    #[test]
    fn parse_error_chains_serde() {
        let parse = serde_json::from_str::<u32>("nope").expect_err("invalid json");
        let err = ConfigError::from(parse);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("invalid config json"));
    }
}
