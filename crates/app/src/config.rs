//! Application configuration read from the environment

use std::path::PathBuf;

use sprinkler_config::{BrushConfiguration, BrushShape, ConfigError};
use tracing::info;

/// Environment variable holding a brush configuration JSON path
pub const CONFIG_ENV: &str = "SPRINKLER_CONFIG";

/// Environment variable holding the random seed
pub const SEED_ENV: &str = "SPRINKLER_SEED";

/// Seed used when `SPRINKLER_SEED` is unset or unparsable
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Application configuration
#[derive(Debug, Clone)]
pub struct SprinklerConfig {
    /// Brush configuration file, if any
    pub brush_path: Option<PathBuf>,
    /// Seed for the brush's random source
    pub seed: u64,
}

impl Default for SprinklerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl SprinklerConfig {
    /// Parse from `SPRINKLER_CONFIG` and `SPRINKLER_SEED`
    pub fn from_env() -> Self {
        Self {
            brush_path: std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            seed: std::env::var(SEED_ENV)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SEED),
        }
    }

    /// Load the brush configuration, or build the demo brush when no path is set
    pub fn load_brush(&self) -> Result<BrushConfiguration<String>, ConfigError> {
        match &self.brush_path {
            Some(path) => {
                info!("Loading brush configuration from {}", path.display());
                BrushConfiguration::load(path)
            }
            None => Ok(demo_brush()),
        }
    }
}

/// Circle brush over the demo catalog, including one template that fails validation
pub fn demo_brush() -> BrushConfiguration<String> {
    let mut brush = BrushConfiguration::new(
        BrushShape::Circle,
        ["grass", "flower", "rock_mesh"].map(String::from),
    );
    brush.templates.push(None);
    brush.set_size(2.0);
    brush.set_density(0.6);
    brush.mirror_enabled = true;
    brush
}
