//! Prefab sprinkler placement engine
//!
//! This crate provides the editor-independent core of the prefab brush:
//! - [`sampler`] - Candidate offsets for point, circle, square and line brushes
//! - [`planner`] - Spacing-aware placement planning for one brush application
//! - [`removal`] - Eraser region tests and instance selection
//! - [`templates`] - Uniform template choice and mirroring
//! - [`host`] - The [`SceneHost`] contract editors implement
//! - [`tool`] - Stroke handling and throttling that ties it all together
//!
//! Randomness is always injected as a [`rand::Rng`], so seeded generators give
//! repeatable results.

pub mod constants;
pub mod host;
pub mod planner;
pub mod removal;
pub mod sampler;
pub mod templates;
pub mod tool;
pub mod types;
pub mod warning;

pub use constants::*;
pub use host::*;
pub use planner::*;
pub use removal::*;
pub use sampler::*;
pub use templates::*;
pub use tool::*;
pub use types::*;
pub use warning::*;

pub use sprinkler_config::{
    BrushConfiguration, BrushMode, BrushShape, ConfigError, PlaneAxes, WorkingPlane,
};
