//! Working plane for brush math.
//!
//! All sampling and distance tests run in 2D. The working plane picks which
//! two world axes form that 2D space and what the remaining axis is pinned to.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Pair of world axes spanning the working plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaneAxes {
    /// Top-down 2D view; depth is Z.
    #[default]
    XY,
    /// Ground plane of a Y-up 3D scene; depth is Y.
    XZ,
    /// Side view; depth is X.
    YZ,
}

/// Plane the brush samples and measures in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingPlane {
    pub axes: PlaneAxes,
    /// Fixed value for the depth axis of placed positions.
    /// `None` keeps the depth of the brush center.
    pub elevation: Option<f32>,
}

impl WorkingPlane {
    pub fn new(axes: PlaneAxes) -> Self {
        Self {
            axes,
            elevation: None,
        }
    }

    pub fn with_elevation(axes: PlaneAxes, elevation: f32) -> Self {
        Self {
            axes,
            elevation: Some(elevation),
        }
    }

    /// Project a world position onto the plane's 2D coordinates.
    pub fn project(&self, point: Vec3) -> Vec2 {
        match self.axes {
            PlaneAxes::XY => Vec2::new(point.x, point.y),
            PlaneAxes::XZ => Vec2::new(point.x, point.z),
            PlaneAxes::YZ => Vec2::new(point.y, point.z),
        }
    }

    /// World coordinate along the axis perpendicular to the plane.
    pub fn depth(&self, point: Vec3) -> f32 {
        match self.axes {
            PlaneAxes::XY => point.z,
            PlaneAxes::XZ => point.y,
            PlaneAxes::YZ => point.x,
        }
    }

    /// Build a world position from plane coordinates and a depth.
    pub fn lift(&self, uv: Vec2, depth: f32) -> Vec3 {
        match self.axes {
            PlaneAxes::XY => Vec3::new(uv.x, uv.y, depth),
            PlaneAxes::XZ => Vec3::new(uv.x, depth, uv.y),
            PlaneAxes::YZ => Vec3::new(depth, uv.x, uv.y),
        }
    }

    /// World position of `offset` relative to `center`, in plane space.
    pub fn offset_from(&self, center: Vec3, offset: Vec2) -> Vec3 {
        let depth = self.elevation.unwrap_or_else(|| self.depth(center));
        self.lift(self.project(center) + offset, depth)
    }
}
