//! Scene container, selection set and picking queries.

pub mod selection;
pub mod world;

pub use selection::Selection;
pub use world::{Element, ElementKind, EntityBuilder, Handle, PickHit, World};
