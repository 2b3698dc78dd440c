//! In-memory scene used as the sprinkler's host
//!
//! Stands in for an editor: a top-down orthographic camera over a ground
//! plane, a template catalog, and a flat list of instances that remember
//! which template they came from.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use sprinkling::{ExistingInstance, SceneHost};
use tracing::debug;

/// Epsilon for ray-plane tests
const EPSILON: f32 = 1e-6;

/// Sprite sorting scale: lower objects draw on top.
const SORTING_ORDER_SCALE: f32 = 100.0;

/// Intersect a ray with a plane.
///
/// Returns the hit point if the ray is not parallel to the plane and the hit
/// lies in front of the ray origin.
pub fn ray_plane_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<Vec3> {
    let denom = plane_normal.dot(ray_dir);
    if denom.abs() < EPSILON {
        return None;
    }
    let t = (plane_point - ray_origin).dot(plane_normal) / denom;
    if t < EPSILON {
        return None;
    }
    Some(ray_origin + ray_dir * t)
}

/// Sorting order for a sprite at `position` in a top-down view.
pub fn sorting_order(position: Vec3) -> i32 {
    (-position.y * SORTING_ORDER_SCALE).round() as i32
}

/// Top-down orthographic camera looking along -Z
#[derive(Debug, Clone, Copy)]
pub struct OrthoCamera {
    /// World point at the viewport center
    pub focus: Vec2,
    /// Viewport size in pixels
    pub viewport: Vec2,
    /// Pixels per world unit
    pub zoom: f32,
    /// Camera height above the ground
    pub height: f32,
}

impl Default for OrthoCamera {
    fn default() -> Self {
        Self {
            focus: Vec2::ZERO,
            viewport: Vec2::new(1920.0, 1080.0),
            zoom: 50.0,
            height: 100.0,
        }
    }
}

impl OrthoCamera {
    /// Ray through a cursor position (pixels, origin top-left, y down).
    pub fn cursor_ray(&self, cursor: Vec2) -> (Vec3, Vec3) {
        let centered = cursor - self.viewport * 0.5;
        let world = self.focus + Vec2::new(centered.x, -centered.y) / self.zoom;
        (world.extend(self.height), Vec3::NEG_Z)
    }

    /// Cursor position that looks at a world point.
    pub fn cursor_for(&self, world: Vec2) -> Vec2 {
        let offset = (world - self.focus) * self.zoom;
        Vec2::new(offset.x, -offset.y) + self.viewport * 0.5
    }
}

/// Catalog entry for a template
#[derive(Debug, Clone)]
pub struct TemplateInfo {
    /// Whether the template carries a 2D sprite
    pub has_sprite: bool,
}

/// A placed object
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: u64,
    pub template: String,
    pub position: Vec3,
    pub mirrored: bool,
    pub sorting_order: i32,
}

/// Scene with a ground plane at z = 0
#[derive(Debug, Default)]
pub struct MemoryScene {
    pub camera: OrthoCamera,
    catalog: HashMap<String, TemplateInfo>,
    objects: Vec<SceneObject>,
    next_id: u64,
    /// Deleted objects, most recent last
    deleted: Vec<SceneObject>,
}

impl MemoryScene {
    pub fn new(camera: OrthoCamera) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    /// Scene with sprite templates `grass` and `flower` and a sprite-less `rock_mesh`.
    pub fn demo() -> Self {
        let mut scene = Self::new(OrthoCamera::default());
        scene.register_template("grass", true);
        scene.register_template("flower", true);
        scene.register_template("rock_mesh", false);
        scene
    }

    pub fn register_template(&mut self, name: impl Into<String>, has_sprite: bool) {
        self.catalog.insert(name.into(), TemplateInfo { has_sprite });
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn deleted(&self) -> &[SceneObject] {
        &self.deleted
    }

    /// Number of live objects per template
    pub fn census(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for object in &self.objects {
            *counts.entry(object.template.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

impl SceneHost for MemoryScene {
    type Template = String;
    type Instance = u64;

    fn world_point(&self, cursor: Vec2) -> Option<Vec3> {
        let (origin, dir) = self.camera.cursor_ray(cursor);
        ray_plane_intersection(origin, dir, Vec3::ZERO, Vec3::Z)
    }

    fn find_nearby_instances(
        &self,
        center: Vec3,
        search_radius: f32,
        templates: &[&String],
    ) -> Vec<ExistingInstance<String, u64>> {
        self.objects
            .iter()
            .filter(|o| templates.contains(&&o.template))
            .filter(|o| o.position.distance(center) <= search_radius)
            .map(|o| ExistingInstance::new(o.id, o.position, o.template.clone()))
            .collect()
    }

    fn materialize(&mut self, template: &String, position: Vec3, mirrored: bool) -> u64 {
        self.next_id += 1;
        let object = SceneObject {
            id: self.next_id,
            template: template.clone(),
            position,
            mirrored,
            sorting_order: sorting_order(position),
        };
        debug!(
            "Spawned {} #{} at ({:.2}, {:.2}) order={}{}",
            object.template,
            object.id,
            position.x,
            position.y,
            object.sorting_order,
            if mirrored { " mirrored" } else { "" }
        );
        self.objects.push(object);
        self.next_id
    }

    fn delete(&mut self, instance: u64) {
        if let Some(index) = self.objects.iter().position(|o| o.id == instance) {
            let object = self.objects.remove(index);
            debug!("Deleted {} #{}", object.template, object.id);
            self.deleted.push(object);
        }
    }

    fn is_template_valid(&self, template: &String) -> bool {
        self.catalog
            .get(template)
            .is_some_and(|info| info.has_sprite)
    }
}
