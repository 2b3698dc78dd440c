//! Sprinkler - headless prefab brush session
//!
//! Runs a paint stroke and an erase stroke against an in-memory scene, the
//! way an editor host would drive the placement engine from pointer events.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sprinkler_config::{BrushMode, BrushShape};
use sprinkling::{BrushActionReport, SprinkleTool};
use tracing::{info, warn};

mod config;
mod scene;

use config::SprinklerConfig;
use scene::MemoryScene;

/// Simulated frame time of the host editor
const FRAME_SECONDS: f64 = 1.0 / 60.0;

/// Drag frames per stroke
const STROKE_FRAMES: usize = 90;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = SprinklerConfig::from_env();
    let brush = config.load_brush()?;
    info!(
        "Starting sprinkler: {:?} brush, size={:.1}, density={:.2}, seed={:#x}",
        brush.shape,
        brush.clamped_size(),
        brush.clamped_density(),
        config.seed
    );

    let mut scene = MemoryScene::demo();
    let mut tool = SprinkleTool::new(brush, StdRng::seed_from_u64(config.seed));

    // Paint left to right across the view
    tool.config_mut().mode = BrushMode::Paint;
    let painted = run_stroke(&mut tool, &mut scene, Vec2::new(-8.0, 0.0), Vec2::new(8.0, 0.0), 0.0);
    let placed: usize = painted.iter().map(|r| r.placed).sum();
    let mirrored = scene.objects().iter().filter(|o| o.mirrored).count();
    info!(
        "Paint stroke: {} applications placed {} objects ({} mirrored)",
        painted.len(),
        placed,
        mirrored
    );
    for (template, count) in scene.census() {
        info!("  {template}: {count}");
    }

    // Erase a vertical band through the middle
    let brush = tool.config_mut();
    brush.mode = BrushMode::Erase;
    brush.shape = BrushShape::Line;
    brush.set_size(6.0);
    brush.set_line_angle(90.0);
    let erased = run_stroke(&mut tool, &mut scene, Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), 10.0);
    let removed: usize = erased.iter().map(|r| r.removed).sum();
    info!(
        "Erase stroke: {} applications removed {} objects, {} remain",
        erased.len(),
        removed,
        scene.objects().len()
    );
    debug_assert_eq!(removed, scene.deleted().len());

    Ok(())
}

/// Drag the brush from `from` to `to` (world units) over `STROKE_FRAMES` frames.
fn run_stroke(
    tool: &mut SprinkleTool<String, StdRng>,
    scene: &mut MemoryScene,
    from: Vec2,
    to: Vec2,
    start_time: f64,
) -> Vec<BrushActionReport> {
    let camera = scene.camera;
    let mut reports = Vec::new();

    reports.extend(tool.begin_stroke(scene, camera.cursor_for(from), start_time));
    for frame in 1..=STROKE_FRAMES {
        let t = frame as f32 / STROKE_FRAMES as f32;
        let cursor = camera.cursor_for(from.lerp(to, t));
        let now = start_time + frame as f64 * FRAME_SECONDS;
        reports.extend(tool.stroke_to(scene, cursor, now));
    }
    tool.end_stroke();

    if reports.iter().any(|r| !r.warnings.is_empty()) {
        warn!("Stroke finished with warnings; see log above");
    }
    reports
}

/// Initialize logging
///
/// Console output with `RUST_LOG` support, `info` by default.
fn init_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
