// ferrous_core: scene types, picking queries and input state shared by the
// editor tool modes.

pub mod camera;
pub mod math;
pub mod scene;
pub mod transform;

// input helper for keyboard / mouse state
#[cfg(feature = "input")]
pub mod input;

pub use glam;

pub use camera::Camera;
pub use math::{Aabb, Ray, ScreenRect};
pub use scene::{Element, ElementKind, Handle, PickHit, Selection, World};
pub use transform::Transform;

// re-export common input types so callers don't need to depend on winit
#[cfg(feature = "input")]
pub use input::{InputState, KeyCode, MouseButton};
