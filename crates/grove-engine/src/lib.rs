pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::SceneConfig;
pub use api::error::SceneError;
pub use api::types::{CreatureKind, EntityId, TreeId};
pub use components::creature::{
    BehaviorContext, Bird, BirdState, Creature, Cue, Hedgehog, HedgehogState, Pose, Squirrel,
    SquirrelState,
};
pub use components::layer::RenderLayer;
pub use components::tree::{Branch, Tree, TreeRegistry};
pub use core::rng::{RandomSource, Rng, SequenceRandom};
pub use core::scene::Scene;
pub use core::scheduler::{MotionId, Scheduler, Tick, TimerId};
pub use renderer::geometry::{Figure, PartName};
pub use renderer::instance::{RenderBuffer, ShapeInstance};
pub use renderer::pose::{PoseBackend, PoseGraph, PoseNode};
pub use bridge::protocol::ProtocolLayout;
pub use systems::render::build_render_buffer;

// Extensions: motion math shared by the creatures
pub use extensions::{Easing, Tween, ease_vec2};
