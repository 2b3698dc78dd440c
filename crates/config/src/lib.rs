//! Shared brush configuration for the sprinkler
//!
//! This crate provides the single source of truth for brush parameters
//! (shape, size, density, line angle, mirroring, templates, throttle) used by
//! the placement engine and by whichever editor host drives it.

mod error;
mod plane;

pub use error::ConfigError;
pub use plane::{PlaneAxes, WorkingPlane};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Smallest brush size (radius, side half-length, or line length)
pub const MIN_SIZE: f32 = 0.5;

/// Largest brush size
pub const MAX_SIZE: f32 = 10.0;

/// Default brush size
pub const DEFAULT_SIZE: f32 = 1.0;

/// Lowest object density
pub const MIN_DENSITY: f32 = 0.1;

/// Highest object density
pub const MAX_DENSITY: f32 = 1.0;

/// Default object density
pub const DEFAULT_DENSITY: f32 = 0.5;

/// Upper bound of the line angle in degrees (lower bound is 0)
pub const MAX_LINE_ANGLE_DEGREES: f32 = 180.0;

/// Default delay between brush applications while the pointer is held
pub const DEFAULT_SPAWN_THROTTLE_SECONDS: f32 = 0.1;

/// Shape of the brush cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum BrushShape {
    /// Single object at the cursor ("Single" in the editor UI)
    #[serde(alias = "Single")]
    Point = 0,
    #[default]
    Circle = 1,
    Square = 2,
    Line = 3,
}

impl BrushShape {
    pub const ALL: [BrushShape; 4] = [
        BrushShape::Point,
        BrushShape::Circle,
        BrushShape::Square,
        BrushShape::Line,
    ];

    /// Whether the shape covers an area (and so uses density and spacing)
    pub fn is_area(&self) -> bool {
        !matches!(self, BrushShape::Point)
    }

    /// Human-readable label for toolbars
    pub fn label(&self) -> &'static str {
        match self {
            BrushShape::Point => "Single",
            BrushShape::Circle => "Circle",
            BrushShape::Square => "Square",
            BrushShape::Line => "Line",
        }
    }
}

/// What a brush application does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrushMode {
    /// Place template instances
    #[default]
    Paint,
    /// Remove matching instances
    Erase,
}

/// Brush configuration for one tool session
///
/// `T` is the host's opaque template handle. Unassigned template slots are
/// kept as `None` so the UI can show empty rows; they are never used for
/// placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct BrushConfiguration<T> {
    /// Brush shape
    pub shape: BrushShape,
    /// Radius for circles, half side for squares, length for lines
    pub size: f32,
    /// Object density: 0.1 = sparse, 1.0 = dense
    pub density: f32,
    /// Line direction in degrees, counter-clockwise from the plane's first axis
    pub line_angle_degrees: f32,
    /// Randomly mirror half of the placed instances
    pub mirror_enabled: bool,
    /// Candidate templates, in UI order
    pub templates: Vec<Option<T>>,
    /// Minimum delay between applications while the pointer is held
    pub spawn_throttle_seconds: f32,
    /// Paint or erase
    pub mode: BrushMode,
    /// Plane the brush works in
    pub plane: WorkingPlane,
}

impl<T> Default for BrushConfiguration<T> {
    fn default() -> Self {
        Self {
            shape: BrushShape::default(),
            size: DEFAULT_SIZE,
            density: DEFAULT_DENSITY,
            line_angle_degrees: 0.0,
            mirror_enabled: false,
            templates: Vec::new(),
            spawn_throttle_seconds: DEFAULT_SPAWN_THROTTLE_SECONDS,
            mode: BrushMode::default(),
            plane: WorkingPlane::default(),
        }
    }
}

impl<T> BrushConfiguration<T> {
    /// Create a configuration with the given shape and templates, defaults elsewhere
    pub fn new(shape: BrushShape, templates: impl IntoIterator<Item = T>) -> Self {
        Self {
            shape,
            templates: templates.into_iter().map(Some).collect(),
            ..Default::default()
        }
    }

    /// Size clamped to [`MIN_SIZE`, `MAX_SIZE`]
    pub fn clamped_size(&self) -> f32 {
        clamp_or(self.size, MIN_SIZE, MAX_SIZE, DEFAULT_SIZE)
    }

    /// Density clamped to [`MIN_DENSITY`, `MAX_DENSITY`]
    pub fn clamped_density(&self) -> f32 {
        clamp_or(self.density, MIN_DENSITY, MAX_DENSITY, DEFAULT_DENSITY)
    }

    /// Line angle clamped to [0, 180] degrees
    pub fn clamped_line_angle(&self) -> f32 {
        clamp_or(self.line_angle_degrees, 0.0, MAX_LINE_ANGLE_DEGREES, 0.0)
    }

    /// Throttle in seconds, never negative
    pub fn clamped_throttle(&self) -> f32 {
        clamp_or(
            self.spawn_throttle_seconds,
            0.0,
            f32::MAX,
            DEFAULT_SPAWN_THROTTLE_SECONDS,
        )
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = clamp_or(size, MIN_SIZE, MAX_SIZE, DEFAULT_SIZE);
    }

    pub fn set_density(&mut self, density: f32) {
        self.density = clamp_or(density, MIN_DENSITY, MAX_DENSITY, DEFAULT_DENSITY);
    }

    pub fn set_line_angle(&mut self, degrees: f32) {
        self.line_angle_degrees = clamp_or(degrees, 0.0, MAX_LINE_ANGLE_DEGREES, 0.0);
    }

    /// Clamp every ranged field in place
    pub fn sanitize(&mut self) {
        self.size = self.clamped_size();
        self.density = self.clamped_density();
        self.line_angle_degrees = self.clamped_line_angle();
        self.spawn_throttle_seconds = self.clamped_throttle();
    }

    /// Assigned templates, skipping empty slots
    pub fn assigned_templates(&self) -> impl Iterator<Item = &T> {
        self.templates.iter().flatten()
    }

    /// Whether at least one template slot is assigned
    pub fn has_templates(&self) -> bool {
        self.assigned_templates().next().is_some()
    }
}

impl<T> BrushConfiguration<T>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    /// Parse a configuration from JSON, clamping out-of-range values
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Serialize the configuration as pretty JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        debug!("Loaded brush configuration from {}", path.display());
        Ok(config)
    }

    /// Save the configuration to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = self.to_json_string()?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Saved brush configuration to {}", path.display());
        Ok(())
    }
}

/// Clamp to a range, falling back to `fallback` for NaN
fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}
