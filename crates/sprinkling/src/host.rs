//! Editor host contract
//!
//! The placement engine never touches the scene directly. Raycasting, scene
//! queries, instantiation and deletion (including undo registration and
//! sorting-order bookkeeping) all go through this trait.

use glam::{Vec2, Vec3};

use crate::types::ExistingInstance;

/// Services an editor provides to the brush
pub trait SceneHost {
    /// Opaque template handle (prefab reference, asset id, ...)
    type Template: Clone;
    /// Opaque reference to a live scene object
    type Instance;

    /// Resolve a cursor position to a world point.
    ///
    /// Typically a ray cast against scene geometry with a ground-plane
    /// fallback. `None` when nothing is hit.
    fn world_point(&self, cursor: Vec2) -> Option<Vec3>;

    /// Instances created from any of `templates` within `search_radius` of `center`.
    fn find_nearby_instances(
        &self,
        center: Vec3,
        search_radius: f32,
        templates: &[&Self::Template],
    ) -> Vec<ExistingInstance<Self::Template, Self::Instance>>;

    /// Create an instance of `template` and register it for undo.
    fn materialize(
        &mut self,
        template: &Self::Template,
        position: Vec3,
        mirrored: bool,
    ) -> Self::Instance;

    /// Destroy an instance and register the deletion for undo.
    fn delete(&mut self, instance: Self::Instance);

    /// Domain rule a template must pass to be used (e.g. "has a 2D sprite").
    fn is_template_valid(&self, _template: &Self::Template) -> bool {
        true
    }
}
