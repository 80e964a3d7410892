// extensions/mod.rs
//
// Motion helpers shared by the creature state machines.
// Pure math: nothing here knows about the scene or the pose backend.

pub mod easing;
pub mod tween;

pub use easing::{Easing, ease_vec2};
pub use tween::Tween;
