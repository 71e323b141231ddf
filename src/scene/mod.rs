pub mod builder;
pub mod objects;
pub mod picking;

pub use builder::{BuildStats, SceneEngine};
pub use objects::{DisplayObject, SceneSet};
pub use picking::{Ray, cursor_to_ndc, pick};
