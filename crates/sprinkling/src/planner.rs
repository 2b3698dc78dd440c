//! Placement planning for one brush application
//!
//! The planner turns a brush center into a set of placement requests:
//! - Point brushes emit a single request at the center
//! - Area brushes scatter `round(area * density * 10)` candidates and keep
//!   only those far enough from every occupied position
//!
//! Spacing is randomized per candidate so results do not look grid-like.

use glam::{Vec2, Vec3};
use rand::Rng;
use sprinkler_config::{BrushConfiguration, BrushShape};
use tracing::debug;

use crate::constants::{
    AREA_DENSITY_SCALE, ATTEMPTS_PER_OBJECT, DENSE_SPACING, SPACING_JITTER_MAX,
    SPACING_JITTER_MIN, SPARSE_SPACING,
};
use crate::sampler::SpatialSampler;
use crate::templates::TemplateSelector;
use crate::types::PlacementRequest;
use crate::warning::BrushWarning;

/// Area covered by a brush, in the units density is measured against.
///
/// Lines use their length, so density controls objects per unit of length.
pub fn brush_area(shape: BrushShape, size: f32) -> f32 {
    match shape {
        BrushShape::Point => 0.0,
        BrushShape::Circle => std::f32::consts::PI * size * size,
        BrushShape::Square => (size * 2.0) * (size * 2.0),
        BrushShape::Line => size,
    }
}

/// Number of objects an area brush tries to place.
///
/// Halves round to even, so the sparsest short line places nothing.
pub fn target_object_count(shape: BrushShape, size: f32, density: f32) -> usize {
    let count = (brush_area(shape, size) * density * AREA_DENSITY_SCALE).round_ties_even();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Base spacing between placements: sparse at low density, tight at high.
pub fn base_min_spacing(density: f32) -> f32 {
    let t = density.clamp(0.0, 1.0);
    SPARSE_SPACING + (DENSE_SPACING - SPARSE_SPACING) * t
}

/// Result of planning one brush application
#[derive(Debug, Clone)]
pub struct PlacementPlan<T> {
    /// Accepted placements, in acceptance order
    pub requests: Vec<PlacementRequest<T>>,
    /// Objects the brush aimed for (1 for point brushes)
    pub target_count: usize,
    /// Candidates drawn
    pub attempts: usize,
    /// Advisory conditions hit while planning
    pub warnings: Vec<BrushWarning>,
}

impl<T> PlacementPlan<T> {
    fn empty(warnings: Vec<BrushWarning>) -> Self {
        Self {
            requests: Vec::new(),
            target_count: 0,
            attempts: 0,
            warnings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether the attempt cap stopped planning short of the target.
    pub fn is_saturated(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, BrushWarning::Saturated { .. }))
    }
}

/// Plans placements for a brush configuration
pub struct PlacementPlanner<'a, T> {
    config: &'a BrushConfiguration<T>,
}

impl<'a, T: Clone> PlacementPlanner<'a, T> {
    pub fn new(config: &'a BrushConfiguration<T>) -> Self {
        Self { config }
    }

    /// Plan placements around `center`.
    ///
    /// `existing` holds positions of instances near the center (the host
    /// gathers those within twice the brush size). They are treated as
    /// occupied but never returned.
    pub fn plan<R: Rng>(
        &self,
        center: Vec3,
        existing: &[Vec3],
        templates: &TemplateSelector<'_, T>,
        rng: &mut R,
    ) -> PlacementPlan<T> {
        let mut warnings = templates.warnings().to_vec();
        if templates.is_empty() {
            debug!("PlacementPlanner::plan: no valid templates, skipping");
            return PlacementPlan::empty(warnings);
        }

        let shape = self.config.shape;
        if !shape.is_area() {
            return self.plan_single(center, templates, rng, warnings);
        }

        let plane = self.config.plane;
        let size = self.config.clamped_size();
        let density = self.config.clamped_density();
        let target_count = target_object_count(shape, size, density);
        let min_spacing = base_min_spacing(density);
        let max_attempts = target_count * ATTEMPTS_PER_OBJECT;
        let sampler = SpatialSampler::new(shape, size, self.config.clamped_line_angle(), min_spacing);

        let center_uv = plane.project(center);
        let mut occupied: Vec<Vec2> = existing.iter().map(|p| plane.project(*p)).collect();
        let mut requests = Vec::with_capacity(target_count);
        let mut attempts = 0;

        while requests.len() < target_count && attempts < max_attempts {
            attempts += 1;

            let offset = sampler.sample(rng);
            let tolerance = min_spacing * rng.gen_range(SPACING_JITTER_MIN..=SPACING_JITTER_MAX);
            let candidate = center_uv + offset;

            if !is_clear(candidate, &occupied, tolerance) {
                continue;
            }

            let Some(choice) = templates.choose(rng) else {
                break;
            };
            requests.push(PlacementRequest {
                template: choice.template.clone(),
                position: plane.offset_from(center, offset),
                mirrored: choice.mirrored,
                spacing: Some(tolerance),
            });
            occupied.push(candidate);
        }

        if requests.len() < target_count {
            warnings.push(BrushWarning::Saturated {
                placed: requests.len(),
                requested: target_count,
            });
        }

        debug!(
            "PlacementPlanner::plan: {:?} size={:.2} density={:.2} placed {}/{} in {} attempts ({} occupied before)",
            shape,
            size,
            density,
            requests.len(),
            target_count,
            attempts,
            existing.len()
        );

        PlacementPlan {
            requests,
            target_count,
            attempts,
            warnings,
        }
    }

    fn plan_single<R: Rng>(
        &self,
        center: Vec3,
        templates: &TemplateSelector<'_, T>,
        rng: &mut R,
        warnings: Vec<BrushWarning>,
    ) -> PlacementPlan<T> {
        let Some(choice) = templates.choose(rng) else {
            return PlacementPlan::empty(warnings);
        };
        let position = self.config.plane.offset_from(center, Vec2::ZERO);
        debug!(
            "PlacementPlanner::plan: single placement at ({:.2}, {:.2}, {:.2})",
            position.x, position.y, position.z
        );
        PlacementPlan {
            requests: vec![PlacementRequest {
                template: choice.template.clone(),
                position,
                mirrored: choice.mirrored,
                spacing: None,
            }],
            target_count: 1,
            attempts: 1,
            warnings,
        }
    }
}

/// True when `candidate` is at least `tolerance` from every occupied position.
fn is_clear(candidate: Vec2, occupied: &[Vec2], tolerance: f32) -> bool {
    occupied.iter().all(|p| p.distance(candidate) >= tolerance)
}
