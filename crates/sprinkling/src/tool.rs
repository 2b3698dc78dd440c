//! Brush tool driving placement and removal from pointer input
//!
//! This module connects:
//! - Pointer input (from the host's scene view) via `begin_stroke`,
//!   `stroke_to`, `end_stroke`
//! - Throttling, so a held pointer acts at most once per spawn interval
//! - The planner (paint mode) or removal selector (erase mode)
//! - The host, which materializes and deletes instances

use glam::{Vec2, Vec3};
use rand::Rng;
use sprinkler_config::{BrushConfiguration, BrushMode};
use tracing::{debug, warn};

use crate::constants::NEIGHBOR_SEARCH_FACTOR;
use crate::host::SceneHost;
use crate::planner::PlacementPlanner;
use crate::removal::RemovalSelector;
use crate::templates::TemplateSelector;
use crate::warning::BrushWarning;

/// Outcome of one brush application
#[derive(Debug, Clone, PartialEq)]
pub struct BrushActionReport {
    pub mode: BrushMode,
    /// World point the brush was applied at
    pub center: Vec3,
    /// Instances created
    pub placed: usize,
    /// Instances deleted
    pub removed: usize,
    pub warnings: Vec<BrushWarning>,
}

impl BrushActionReport {
    fn new(mode: BrushMode, center: Vec3, warnings: Vec<BrushWarning>) -> Self {
        Self {
            mode,
            center,
            placed: 0,
            removed: 0,
            warnings,
        }
    }
}

/// Prefab brush for one tool session
///
/// Owns the long-lived configuration and the random source. Stroke state is
/// only the pointer-down flag and the time of the last application.
pub struct SprinkleTool<T, R> {
    config: BrushConfiguration<T>,
    rng: R,
    stroke_active: bool,
    last_action_time: Option<f64>,
}

impl<T: Clone, R: Rng> SprinkleTool<T, R> {
    pub fn new(config: BrushConfiguration<T>, rng: R) -> Self {
        Self {
            config,
            rng,
            stroke_active: false,
            last_action_time: None,
        }
    }

    pub fn config(&self) -> &BrushConfiguration<T> {
        &self.config
    }

    /// Mutable configuration for UI edits between strokes
    pub fn config_mut(&mut self) -> &mut BrushConfiguration<T> {
        &mut self.config
    }

    pub fn is_stroke_active(&self) -> bool {
        self.stroke_active
    }

    /// Pointer down: start a stroke and apply the brush immediately.
    ///
    /// `now` is the host's clock in seconds. Returns `None` when the cursor
    /// does not resolve to a world point.
    pub fn begin_stroke<H>(&mut self, host: &mut H, cursor: Vec2, now: f64) -> Option<BrushActionReport>
    where
        H: SceneHost<Template = T>,
    {
        self.stroke_active = true;
        self.last_action_time = Some(now);
        self.apply_at_cursor(host, cursor)
    }

    /// Pointer drag: apply the brush if the spawn interval has elapsed.
    ///
    /// Returns `None` when no stroke is active, the call was throttled, or
    /// the cursor does not resolve to a world point.
    pub fn stroke_to<H>(&mut self, host: &mut H, cursor: Vec2, now: f64) -> Option<BrushActionReport>
    where
        H: SceneHost<Template = T>,
    {
        if !self.stroke_active {
            debug!("stroke_to: no active stroke, ignoring");
            return None;
        }

        let interval = f64::from(self.config.clamped_throttle());
        if let Some(last) = self.last_action_time {
            if now - last < interval {
                return None;
            }
        }

        self.last_action_time = Some(now);
        self.apply_at_cursor(host, cursor)
    }

    /// Pointer up.
    pub fn end_stroke(&mut self) {
        self.stroke_active = false;
        self.last_action_time = None;
    }

    fn apply_at_cursor<H>(&mut self, host: &mut H, cursor: Vec2) -> Option<BrushActionReport>
    where
        H: SceneHost<Template = T>,
    {
        let Some(center) = host.world_point(cursor) else {
            debug!(
                "No world point under cursor ({:.1}, {:.1}), skipping",
                cursor.x, cursor.y
            );
            return None;
        };
        Some(self.apply_at(host, center))
    }

    /// Apply the brush once at a world point in the configured mode.
    pub fn apply_at<H>(&mut self, host: &mut H, center: Vec3) -> BrushActionReport
    where
        H: SceneHost<Template = T>,
    {
        let report = match self.config.mode {
            BrushMode::Paint => self.paint_at(host, center),
            BrushMode::Erase => self.erase_at(host, center),
        };

        for warning in &report.warnings {
            match warning {
                BrushWarning::NoTemplates => warn!("{}", warning),
                BrushWarning::Saturated { .. } => debug!("{}", warning),
                // Already reported while validating templates
                BrushWarning::InvalidTemplates { .. } => {}
            }
        }
        report
    }

    fn paint_at<H>(&mut self, host: &mut H, center: Vec3) -> BrushActionReport
    where
        H: SceneHost<Template = T>,
    {
        let templates = TemplateSelector::from_config(&self.config, |t| host.is_template_valid(t));
        if templates.is_empty() {
            return BrushActionReport::new(BrushMode::Paint, center, templates.warnings().to_vec());
        }

        let search_radius = self.config.clamped_size() * NEIGHBOR_SEARCH_FACTOR;
        let existing: Vec<Vec3> = host
            .find_nearby_instances(center, search_radius, templates.templates())
            .iter()
            .map(|instance| instance.position)
            .collect();

        let plan = PlacementPlanner::new(&self.config).plan(center, &existing, &templates, &mut self.rng);
        for request in &plan.requests {
            host.materialize(&request.template, request.position, request.mirrored);
        }

        let mut report = BrushActionReport::new(BrushMode::Paint, center, plan.warnings);
        report.placed = plan.requests.len();
        report
    }

    fn erase_at<H>(&mut self, host: &mut H, center: Vec3) -> BrushActionReport
    where
        H: SceneHost<Template = T>,
    {
        let templates = TemplateSelector::from_config(&self.config, |t| host.is_template_valid(t));
        let mut report = BrushActionReport::new(BrushMode::Erase, center, templates.warnings().to_vec());
        if templates.is_empty() {
            return report;
        }

        let selector = RemovalSelector::from_config(&self.config);
        let candidates = host.find_nearby_instances(center, selector.search_radius(), templates.templates());
        let selected = selector.select(center, candidates);

        report.removed = selected.len();
        for instance in selected {
            host.delete(instance.handle);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExistingInstance;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sprinkler_config::BrushShape;

    /// Flat scene: cursor maps straight to the z = 0 plane, negative x misses.
    #[derive(Default)]
    struct TestScene {
        next_id: u32,
        instances: Vec<ExistingInstance<&'static str, u32>>,
        rejected_template: Option<&'static str>,
    }

    impl TestScene {
        fn spawn(&mut self, template: &'static str, position: Vec3) -> u32 {
            self.next_id += 1;
            self.instances
                .push(ExistingInstance::new(self.next_id, position, template));
            self.next_id
        }
    }

    impl SceneHost for TestScene {
        type Template = &'static str;
        type Instance = u32;

        fn world_point(&self, cursor: Vec2) -> Option<Vec3> {
            (cursor.x >= 0.0).then(|| cursor.extend(0.0))
        }

        fn find_nearby_instances(
            &self,
            center: Vec3,
            search_radius: f32,
            templates: &[&Self::Template],
        ) -> Vec<ExistingInstance<Self::Template, Self::Instance>> {
            self.instances
                .iter()
                .filter(|i| templates.contains(&&i.template))
                .filter(|i| i.position.distance(center) <= search_radius)
                .cloned()
                .collect()
        }

        fn materialize(&mut self, template: &Self::Template, position: Vec3, _mirrored: bool) -> u32 {
            self.spawn(*template, position)
        }

        fn delete(&mut self, instance: u32) {
            self.instances.retain(|i| i.handle != instance);
        }

        fn is_template_valid(&self, template: &Self::Template) -> bool {
            self.rejected_template != Some(*template)
        }
    }

    fn tool(shape: BrushShape, templates: &[&'static str]) -> SprinkleTool<&'static str, StdRng> {
        let config = BrushConfiguration::new(shape, templates.iter().copied());
        SprinkleTool::new(config, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_single_paint_places_one_instance() {
        let mut scene = TestScene::default();
        let mut tool = tool(BrushShape::Point, &["T"]);
        let report = tool.apply_at(&mut scene, Vec3::new(5.0, 5.0, 0.0));
        assert_eq!(report.placed, 1);
        assert_eq!(scene.instances.len(), 1);
        assert_eq!(scene.instances[0].position, Vec3::new(5.0, 5.0, 0.0));
    }

    #[test]
    fn test_paint_without_templates_is_noop() {
        let mut scene = TestScene::default();
        let mut tool = tool(BrushShape::Circle, &[]);
        let report = tool.apply_at(&mut scene, Vec3::ZERO);
        assert_eq!(report.placed, 0);
        assert_eq!(report.warnings, vec![BrushWarning::NoTemplates]);
        assert!(scene.instances.is_empty());
    }

    #[test]
    fn test_invalid_templates_are_never_placed() {
        let mut scene = TestScene {
            rejected_template: Some("mesh"),
            ..Default::default()
        };
        let mut tool = tool(BrushShape::Square, &["mesh", "sprite"]);
        tool.config_mut().set_density(1.0);
        let report = tool.apply_at(&mut scene, Vec3::ZERO);
        assert!(report.placed > 0);
        assert!(report.warnings.contains(&BrushWarning::InvalidTemplates { count: 1 }));
        assert!(scene.instances.iter().all(|i| i.template == "sprite"));
    }

    #[test]
    fn test_repeated_paint_respects_existing_instances() {
        let mut scene = TestScene::default();
        let mut tool = tool(BrushShape::Circle, &["T"]);
        tool.apply_at(&mut scene, Vec3::ZERO);
        let first = scene.instances.len();
        let report = tool.apply_at(&mut scene, Vec3::ZERO);
        assert_eq!(scene.instances.len(), first + report.placed);
        for placed in &scene.instances[first..] {
            for earlier in &scene.instances[..first] {
                // Lowest possible tolerance at density 0.5 is 2.65 * 0.7.
                assert!(placed.position.distance(earlier.position) >= 2.65 * 0.7 - 1e-4);
            }
        }
    }

    #[test]
    fn test_erase_circle_removes_only_matching_templates() {
        let mut scene = TestScene::default();
        scene.spawn("T", Vec3::new(0.5, 0.0, 0.0));
        scene.spawn("T", Vec3::new(5.0, 0.0, 0.0));
        scene.spawn("other", Vec3::new(0.2, 0.0, 0.0));

        let mut tool = tool(BrushShape::Circle, &["T"]);
        tool.config_mut().mode = BrushMode::Erase;
        let report = tool.apply_at(&mut scene, Vec3::ZERO);

        assert_eq!(report.removed, 1);
        let remaining: Vec<_> = scene.instances.iter().map(|i| i.position.x).collect();
        assert_eq!(remaining, vec![5.0, 0.2]);
    }

    #[test]
    fn test_erase_single_removes_closest() {
        let mut scene = TestScene::default();
        scene.spawn("T", Vec3::new(0.3, 0.0, 0.0));
        let closest = scene.spawn("T", Vec3::new(0.1, 0.0, 0.0));

        let mut tool = tool(BrushShape::Point, &["T"]);
        tool.config_mut().mode = BrushMode::Erase;
        let report = tool.apply_at(&mut scene, Vec3::ZERO);

        assert_eq!(report.removed, 1);
        assert!(scene.instances.iter().all(|i| i.handle != closest));
    }

    #[test]
    fn test_stroke_is_throttled() {
        let mut scene = TestScene::default();
        let mut tool = tool(BrushShape::Point, &["T"]);

        assert!(tool.begin_stroke(&mut scene, Vec2::new(1.0, 1.0), 10.0).is_some());
        assert!(tool.stroke_to(&mut scene, Vec2::new(2.0, 1.0), 10.05).is_none());
        assert!(tool.stroke_to(&mut scene, Vec2::new(3.0, 1.0), 10.25).is_some());
        assert!(tool.stroke_to(&mut scene, Vec2::new(4.0, 1.0), 10.3).is_none());
        tool.end_stroke();
        assert!(!tool.is_stroke_active());
        assert!(tool.stroke_to(&mut scene, Vec2::new(5.0, 1.0), 20.0).is_none());

        assert_eq!(scene.instances.len(), 2);
    }

    #[test]
    fn test_cursor_without_world_point_is_skipped() {
        let mut scene = TestScene::default();
        let mut tool = tool(BrushShape::Point, &["T"]);
        assert!(tool.begin_stroke(&mut scene, Vec2::new(-1.0, 0.0), 0.0).is_none());
        assert!(tool.is_stroke_active());
        assert!(tool.stroke_to(&mut scene, Vec2::new(1.0, 0.0), 0.2).is_some());
        assert_eq!(scene.instances.len(), 1);
    }
}
