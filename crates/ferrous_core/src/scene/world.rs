//! Scene world: the container every editor tool reads and mutates.
//!
//! `World` stores entities in a `BTreeMap` keyed by a monotonically
//! increasing `u64` ID, so handles stay stable across insertions and
//! removals and iteration follows spawn order.  Picking results inherit
//! that order, which keeps box selections deterministic.
//!
//! Besides the entities the world owns the two pieces of editor state that
//! tool modes write to: the [`Selection`] and the 3D cursor position.
//!
//! # Quick start
//! ```rust,ignore
//! use ferrous_core::{World, Ray};
//! use glam::Vec3;
//!
//! let mut world = World::new();
//! let crate_ = world.spawn_cube("Crate", Vec3::ZERO);
//!
//! let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
//! let hit = world.pick_along_ray(&ray, &Default::default()).unwrap();
//! assert_eq!(hit.handle, crate_);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;

use super::selection::Selection;
use crate::camera::Camera;
use crate::math::{Aabb, Ray, ScreenRect};
use crate::transform::Transform;

// ─── ID generation ─────────────────────────────────────────────────────────

static ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

// ─── Handle ────────────────────────────────────────────────────────────────

/// Opaque handle referencing an entity inside a [`World`].
///
/// A handle becomes invalid only after the entity it refers to is
/// despawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u64);

// ─── Element kinds ─────────────────────────────────────────────────────────

/// The geometric or logical kind of an entity.  Determines the local
/// bounds used for picking.
#[derive(Debug, Clone, Default)]
pub enum ElementKind {
    /// A solid box defined by a half-extent in world units.
    Cube { half_extent: f32 },
    /// Flat ground grid on the local XZ plane.
    Grid { half_size: f32 },
    /// An empty entity used as a logical group or marker.  Not pickable.
    #[default]
    Empty,
}

impl ElementKind {
    /// Bounds in the entity's local space, `None` for kinds without
    /// geometry.
    pub fn local_bounds(&self) -> Option<Aabb> {
        match self {
            ElementKind::Cube { half_extent } => {
                Some(Aabb::from_half_extents(Vec3::splat(*half_extent)))
            }
            ElementKind::Grid { half_size } => Some(Aabb::new(
                Vec3::new(-half_size, 0.0, -half_size),
                Vec3::new(*half_size, 0.0, *half_size),
            )),
            ElementKind::Empty => None,
        }
    }
}

// ─── Entity entry ──────────────────────────────────────────────────────────

/// Complete data for one scene entity.
#[derive(Debug, Clone)]
pub struct Element {
    /// Unique, stable identifier (mirrors the map key for convenience).
    pub id: u64,
    /// Human-readable label, shown in the editor's hierarchy panel.
    pub name: String,
    /// World-space transform (position, rotation, scale).
    pub transform: Transform,
    /// Geometric / logical kind.
    pub kind: ElementKind,
    /// Invisible entities cannot be picked.
    pub visible: bool,
    /// Arbitrary string tags (e.g. "editor" for infrastructure geometry).
    pub tags: Vec<String>,
}

impl Element {
    fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            transform: Transform::default(),
            kind: ElementKind::default(),
            visible: true,
            tags: Vec::new(),
        }
    }

    pub fn handle(&self) -> Handle {
        Handle(self.id)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Local bounds moved into world space by the entity transform.
    pub fn world_bounds(&self) -> Option<Aabb> {
        self.kind
            .local_bounds()
            .map(|b| b.transform(&self.transform.matrix()))
    }
}

// ─── Pick results ──────────────────────────────────────────────────────────

/// One entity found by a scene query, with the world-space point that
/// produced the hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub handle: Handle,
    pub point: Vec3,
}

// ─── Entity builder ────────────────────────────────────────────────────────

/// Fluent builder returned by [`World::spawn`].
///
/// Call `.build()` to insert the entity and receive its [`Handle`].
pub struct EntityBuilder<'a> {
    world: &'a mut World,
    element: Element,
}

impl<'a> EntityBuilder<'a> {
    pub fn with_position(mut self, pos: Vec3) -> Self {
        self.element.transform.position = pos;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.element.transform.scale = scale;
        self
    }

    pub fn with_kind(mut self, kind: ElementKind) -> Self {
        self.element.kind = kind;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.element.tags.push(tag.into());
        self
    }

    /// Finalise the builder, insert the entity, and return its handle.
    pub fn build(self) -> Handle {
        let id = self.element.id;
        self.world.entities.insert(id, self.element);
        Handle(id)
    }
}

// ─── World ─────────────────────────────────────────────────────────────────

/// The primary scene container.
#[derive(Debug, Default)]
pub struct World {
    entities: BTreeMap<u64, Element>,
    selection: Selection,
    cursor: Vec3,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Spawning ───────────────────────────────────────────────────────────

    /// Begin building a new entity with the given name.
    pub fn spawn(&mut self, name: impl Into<String>) -> EntityBuilder<'_> {
        let id = next_id();
        EntityBuilder {
            world: self,
            element: Element::new(id, name),
        }
    }

    /// Convenience: spawn a unit cube at the given position and return its handle.
    pub fn spawn_cube(&mut self, name: impl Into<String>, position: Vec3) -> Handle {
        self.spawn(name)
            .with_kind(ElementKind::Cube { half_extent: 0.5 })
            .with_position(position)
            .build()
    }

    /// Remove the entity from the world (and from the selection).  Returns
    /// `true` if it existed.
    pub fn despawn(&mut self, handle: Handle) -> bool {
        self.selection.remove(handle);
        self.entities.remove(&handle.0).is_some()
    }

    pub fn set_visible(&mut self, handle: Handle, visible: bool) {
        if let Some(e) = self.entities.get_mut(&handle.0) {
            e.visible = visible;
        }
    }

    // ── Raw element access ─────────────────────────────────────────────────

    pub fn get(&self, handle: Handle) -> Option<&Element> {
        self.entities.get(&handle.0)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.entities.contains_key(&handle.0)
    }

    // ── Iteration ──────────────────────────────────────────────────────────

    /// Iterate over all entities in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.entities.values()
    }

    /// Iterate over all entities that carry the given tag.
    pub fn iter_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.entities.values().filter(move |e| e.has_tag(tag))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // ── Selection ──────────────────────────────────────────────────────────

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Select `handle`.  Handles of despawned entities are ignored.
    pub fn add_to_selection(&mut self, handle: Handle) {
        if !self.contains(handle) {
            log::warn!("add_to_selection: {handle:?} is not in the world");
            return;
        }
        self.selection.add(handle);
    }

    pub fn remove_from_selection(&mut self, handle: Handle) {
        self.selection.remove(handle);
    }

    pub fn is_selected(&self, handle: Handle) -> bool {
        self.selection.contains(handle)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // ── 3D cursor ──────────────────────────────────────────────────────────

    pub fn cursor_position(&self) -> Vec3 {
        self.cursor
    }

    pub fn set_cursor_position(&mut self, pos: Vec3) {
        self.cursor = pos;
    }

    // ── Picking ────────────────────────────────────────────────────────────

    fn pickable<'a>(
        &'a self,
        ignore: &'a HashSet<Handle>,
    ) -> impl Iterator<Item = (&'a Element, Aabb)> + 'a {
        self.entities
            .values()
            .filter(move |e| e.visible && !ignore.contains(&e.handle()))
            .filter_map(|e| e.world_bounds().map(|b| (e, b)))
    }

    /// Nearest entity whose world bounds the ray enters, skipping `ignore`.
    ///
    /// Ties keep the entity spawned first.
    pub fn pick_along_ray(&self, ray: &Ray, ignore: &HashSet<Handle>) -> Option<PickHit> {
        let mut best: Option<(f32, Handle)> = None;
        for (element, bounds) in self.pickable(ignore) {
            if let Some(t) = ray.intersect_aabb(&bounds) {
                if best.map_or(true, |(best_t, _)| t < best_t) {
                    best = Some((t, element.handle()));
                }
            }
        }
        best.map(|(t, handle)| PickHit {
            handle,
            point: ray.at(t),
        })
    }

    /// Every entity whose projected bounds overlap `rect`, in spawn order.
    ///
    /// The world bounds are projected through `camera` into `viewport`
    /// pixels and the enclosing screen rectangle is tested for overlap, so
    /// partially enclosed entities count.  Entities with a bound corner
    /// behind the camera are skipped.  Each hit reports the entity position.
    pub fn pick_in_rectangle(
        &self,
        rect: &ScreenRect,
        camera: &Camera,
        viewport: &ScreenRect,
        ignore: &HashSet<Handle>,
    ) -> Vec<PickHit> {
        self.pickable(ignore)
            .filter_map(|(element, bounds)| {
                let projected: Option<Vec<_>> = bounds
                    .corners()
                    .iter()
                    .map(|c| camera.project_to_screen(*c, viewport))
                    .collect();
                let screen = ScreenRect::enclosing(projected?)?;
                screen.overlaps(rect).then(|| PickHit {
                    handle: element.handle(),
                    point: element.transform.position,
                })
            })
            .collect()
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────
