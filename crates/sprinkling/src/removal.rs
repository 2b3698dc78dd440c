//! Eraser region tests
//!
//! Decides which host-supplied instances fall inside the eraser. Candidates
//! are expected to be matched against the brush's templates already.

use glam::{Vec2, Vec3};
use sprinkler_config::{BrushConfiguration, BrushShape, WorkingPlane};
use tracing::debug;

use crate::constants::{LINE_ERASE_HALF_WIDTH, POINT_ERASE_RADIUS};
use crate::sampler::line_direction;
use crate::types::ExistingInstance;

/// Selects instances inside the eraser region
#[derive(Debug, Clone, Copy)]
pub struct RemovalSelector {
    shape: BrushShape,
    size: f32,
    direction: Vec2,
    plane: WorkingPlane,
}

impl RemovalSelector {
    pub fn new(shape: BrushShape, size: f32, line_angle_degrees: f32, plane: WorkingPlane) -> Self {
        Self {
            shape,
            size,
            direction: line_direction(line_angle_degrees),
            plane,
        }
    }

    /// Selector using the clamped values of `config`.
    pub fn from_config<T>(config: &BrushConfiguration<T>) -> Self {
        Self::new(
            config.shape,
            config.clamped_size(),
            config.clamped_line_angle(),
            config.plane,
        )
    }

    /// Radius around the center that encloses the whole eraser region.
    ///
    /// Hosts use it to bound their instance query.
    pub fn search_radius(&self) -> f32 {
        match self.shape {
            BrushShape::Point => POINT_ERASE_RADIUS,
            BrushShape::Circle => self.size,
            BrushShape::Square => self.size * std::f32::consts::SQRT_2,
            BrushShape::Line => {
                let half_length = self.size * 0.5;
                (half_length * half_length + LINE_ERASE_HALF_WIDTH * LINE_ERASE_HALF_WIDTH).sqrt()
            }
        }
    }

    /// Whether `position` lies inside the eraser region around `center`.
    pub fn contains(&self, center: Vec3, position: Vec3) -> bool {
        let offset = self.plane.project(position) - self.plane.project(center);
        match self.shape {
            BrushShape::Point => offset.length() < POINT_ERASE_RADIUS,
            BrushShape::Circle => offset.length() <= self.size,
            BrushShape::Square => offset.x.abs() <= self.size && offset.y.abs() <= self.size,
            BrushShape::Line => {
                // Measured from the line's start so the projection runs over [0, size].
                let to_point = offset + self.direction * (self.size * 0.5);
                let projection = to_point.dot(self.direction);
                if !(0.0..=self.size).contains(&projection) {
                    return false;
                }
                to_point.dot(self.direction.perp()).abs() <= LINE_ERASE_HALF_WIDTH
            }
        }
    }

    /// Pick the instances to delete from `candidates`.
    ///
    /// Area shapes return every instance inside the region, in input order.
    /// The point shape returns only the closest instance within the pick radius.
    pub fn select<T, H>(
        &self,
        center: Vec3,
        candidates: impl IntoIterator<Item = ExistingInstance<T, H>>,
    ) -> Vec<ExistingInstance<T, H>> {
        let inside = candidates
            .into_iter()
            .filter(|candidate| self.contains(center, candidate.position));

        let selected: Vec<_> = if self.shape.is_area() {
            inside.collect()
        } else {
            let center_uv = self.plane.project(center);
            inside
                .min_by(|a, b| {
                    let da = self.plane.project(a.position).distance_squared(center_uv);
                    let db = self.plane.project(b.position).distance_squared(center_uv);
                    da.total_cmp(&db)
                })
                .into_iter()
                .collect()
        };

        debug!(
            "RemovalSelector::select: {:?} size={:.2} selected {}",
            self.shape,
            self.size,
            selected.len()
        );
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(id: u32, x: f32, y: f32) -> ExistingInstance<&'static str, u32> {
        ExistingInstance::new(id, Vec3::new(x, y, 0.0), "T")
    }

    fn handles(selected: &[ExistingInstance<&'static str, u32>]) -> Vec<u32> {
        selected.iter().map(|i| i.handle).collect()
    }

    fn selector(shape: BrushShape, size: f32, angle: f32) -> RemovalSelector {
        RemovalSelector::new(shape, size, angle, WorkingPlane::default())
    }

    #[test]
    fn test_empty_candidates_select_nothing() {
        for shape in BrushShape::ALL {
            let candidates: Vec<ExistingInstance<&str, u32>> = Vec::new();
            let selected = selector(shape, 2.0, 30.0).select(Vec3::ZERO, candidates);
            assert!(selected.is_empty(), "{shape:?} selected from nothing");
        }
    }

    #[test]
    fn test_point_selects_closest_within_pick_radius() {
        let candidates = vec![instance(1, 0.3, 0.0), instance(2, 0.1, 0.1), instance(3, 0.2, 0.0)];
        let selected = selector(BrushShape::Point, 5.0, 0.0).select(Vec3::ZERO, candidates);
        assert_eq!(handles(&selected), vec![2]);
    }

    #[test]
    fn test_point_ignores_instances_outside_pick_radius() {
        let candidates = vec![instance(1, 0.5, 0.0), instance(2, 3.0, 0.0)];
        let selected = selector(BrushShape::Point, 5.0, 0.0).select(Vec3::ZERO, candidates);
        assert!(selected.is_empty());
    }

    #[test]
    fn test_circle_selects_within_radius() {
        let candidates = vec![instance(1, 1.0, 1.0), instance(2, 2.0, 0.0), instance(3, 1.5, 1.5)];
        let selected = selector(BrushShape::Circle, 2.0, 0.0).select(Vec3::ZERO, candidates);
        assert_eq!(handles(&selected), vec![1, 2]);
    }

    #[test]
    fn test_square_scenario() {
        let candidates = vec![instance(1, 0.9, 0.9), instance(2, 1.1, 1.1)];
        let selected = selector(BrushShape::Square, 1.0, 0.0).select(Vec3::ZERO, candidates);
        assert_eq!(handles(&selected), vec![1]);
    }

    #[test]
    fn test_line_scenario() {
        let candidates = vec![instance(1, 1.5, 0.2), instance(2, 1.5, 0.5)];
        let selected = selector(BrushShape::Line, 4.0, 0.0).select(Vec3::ZERO, candidates);
        assert_eq!(handles(&selected), vec![1]);
    }

    #[test]
    fn test_line_respects_length_and_angle() {
        let line = selector(BrushShape::Line, 4.0, 90.0);
        assert!(line.contains(Vec3::ZERO, Vec3::new(0.1, 1.9, 0.0)));
        assert!(line.contains(Vec3::ZERO, Vec3::new(-0.2, -1.9, 0.0)));
        assert!(!line.contains(Vec3::ZERO, Vec3::new(0.0, 2.1, 0.0)));
        assert!(!line.contains(Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0)));
    }

    #[test]
    fn test_region_follows_center() {
        let square = selector(BrushShape::Square, 1.0, 0.0);
        let center = Vec3::new(10.0, 10.0, 0.0);
        assert!(square.contains(center, Vec3::new(10.9, 9.1, 0.0)));
        assert!(!square.contains(center, Vec3::new(0.9, 0.9, 0.0)));
    }

    #[test]
    fn test_depth_is_ignored() {
        let circle = selector(BrushShape::Circle, 1.0, 0.0);
        assert!(circle.contains(Vec3::ZERO, Vec3::new(0.5, 0.5, 25.0)));
    }

    #[test]
    fn test_search_radius_encloses_region() {
        let square = selector(BrushShape::Square, 1.0, 0.0);
        assert!(square.search_radius() >= Vec2::new(1.0, 1.0).length() - 1e-6);
        let line = selector(BrushShape::Line, 4.0, 45.0);
        assert!(line.search_radius() >= 2.0);
        assert_eq!(selector(BrushShape::Point, 4.0, 0.0).search_radius(), POINT_ERASE_RADIUS);
    }
}
