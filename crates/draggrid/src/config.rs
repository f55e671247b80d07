#![forbid(unsafe_code)]

//! Engine configuration.

use std::time::Duration;

use draggrid_core::geometry::Sides;
use draggrid_layout::{CellSizing, Gravity};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default hover-stability interval: long-press (500ms) plus tap (100ms).
pub const DEFAULT_HOVER_DELAY: Duration = Duration::from_millis(600);

/// Default per-axis pointer delta below which a move counts as stationary.
pub const DEFAULT_STATIONARY_THRESHOLD: i32 = 5;

/// Default lift factor applied to the dragged tile's rectangle.
pub const DEFAULT_LIFT_SCALE: f32 = 0.8;

/// Default vertical release speed (px/s) that turns a drop into a fling.
pub const DEFAULT_FLING_VELOCITY: f32 = 1000.0;

/// Configuration for [`DragGrid`](crate::DragGrid).
///
/// Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragGridConfig {
    /// How the cell side length is derived from the surface.
    /// Default: fit 4 cells along the shorter side.
    pub cell_sizing: CellSizing,

    /// Placement of the lattice inside the padded surface.
    /// Default: centered on both axes.
    pub gravity: Gravity,

    /// Inset applied to the surface before the lattice is laid out.
    pub padding: Sides,

    /// How long the hovered cells must stay the same before tiles are
    /// pushed aside.
    #[serde(rename = "hover_delay_ms", with = "millis")]
    pub hover_delay: Duration,

    /// Pointer moves with both deltas below this are stationary.
    pub stationary_threshold: i32,

    /// Shrink factor for the lifted rectangle, in `(0, 1]`.
    pub lift_scale: f32,

    /// Vertical release speed above which a drop removes the tile.
    pub fling_velocity: f32,

    /// Initial edit mode. Drags only start in edit mode.
    pub edit_mode: bool,
}

impl Default for DragGridConfig {
    fn default() -> Self {
        Self {
            cell_sizing: CellSizing::default(),
            gravity: Gravity::CENTER,
            padding: Sides::default(),
            hover_delay: DEFAULT_HOVER_DELAY,
            stationary_threshold: DEFAULT_STATIONARY_THRESHOLD,
            lift_scale: DEFAULT_LIFT_SCALE,
            fling_velocity: DEFAULT_FLING_VELOCITY,
            edit_mode: true,
        }
    }
}

impl DragGridConfig {
    #[must_use]
    pub fn with_cell_sizing(mut self, sizing: CellSizing) -> Self {
        self.cell_sizing = sizing;
        self
    }

    #[must_use]
    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: impl Into<Sides>) -> Self {
        self.padding = padding.into();
        self
    }

    #[must_use]
    pub fn with_hover_delay(mut self, delay: Duration) -> Self {
        self.hover_delay = delay;
        self
    }

    #[must_use]
    pub fn with_stationary_threshold(mut self, threshold: i32) -> Self {
        self.stationary_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_lift_scale(mut self, scale: f32) -> Self {
        self.lift_scale = scale;
        self
    }

    #[must_use]
    pub fn with_fling_velocity(mut self, velocity: f32) -> Self {
        self.fling_velocity = velocity;
        self
    }

    #[must_use]
    pub fn with_edit_mode(mut self, enabled: bool) -> Self {
        self.edit_mode = enabled;
        self
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.lift_scale > 0.0 && self.lift_scale <= 1.0) {
            return Err(ConfigError::InvalidLiftScale {
                scale: self.lift_scale,
            });
        }
        if !self.fling_velocity.is_finite() || self.fling_velocity < 0.0 {
            return Err(ConfigError::InvalidFlingVelocity {
                velocity: self.fling_velocity,
            });
        }
        match self.cell_sizing {
            CellSizing::FitCount(0) => return Err(ConfigError::ZeroCellCount),
            CellSizing::Fixed(size) if size <= 0 => {
                return Err(ConfigError::InvalidCellSize { size });
            }
            _ => {}
        }
        if self.stationary_threshold < 0 {
            return Err(ConfigError::NegativeStationaryThreshold {
                threshold: self.stationary_threshold,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
