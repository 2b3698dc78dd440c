use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One object the host should materialize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest<T> {
    /// Template to instantiate
    pub template: T,
    /// World position of the new instance
    pub position: Vec3,
    /// Mirror the instance along its horizontal axis
    pub mirrored: bool,
    /// Spacing tolerance the position was accepted under (None for single placements)
    pub spacing: Option<f32>,
}

/// An instance already in the scene, as reported by the host
///
/// `template` is the association the host recorded when it created the
/// instance, so matching never depends on object names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingInstance<T, H> {
    /// Host object reference
    pub handle: H,
    /// World position
    pub position: Vec3,
    /// Template the instance was created from
    pub template: T,
}

impl<T, H> ExistingInstance<T, H> {
    pub fn new(handle: H, position: Vec3, template: T) -> Self {
        Self {
            handle,
            position,
            template,
        }
    }
}
