//! Creature state machines.
//!
//! Every creature reacts to three kinds of scheduler ticks: motion frames,
//! motion completion, and its own timed cues. Each handler schedules the
//! next step itself, so a creature never has two transitions racing.

pub mod bird;
pub mod hedgehog;
pub mod squirrel;

use glam::Vec2;

use crate::api::types::{CreatureKind, EntityId, TreeId};
use crate::components::tree::TreeRegistry;
use crate::core::rng::RandomSource;
use crate::core::scheduler::{Scheduler, Tick};
use crate::renderer::pose::PoseBackend;

pub use bird::{Bird, BirdState};
pub use hedgehog::{Hedgehog, HedgehogState};
pub use squirrel::{Squirrel, SquirrelState};

/// Timed transition cues, each owned by one creature variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Bird leaves its branch.
    Depart,
    /// Bird heads back to its branch after waiting off-screen.
    Return,
    /// Squirrel pokes its head out of the hole.
    Peek,
    /// Squirrel picks between running and retreating.
    Decide,
    /// Squirrel goes back inside.
    Retreat,
    /// Hedgehog comes out to forage.
    Forage,
    /// Hedgehog hides again.
    Hide,
}

/// Everything a creature may touch while handling a tick.
pub struct BehaviorContext<'a> {
    pub scheduler: &'a mut Scheduler<Cue>,
    pub poses: &'a mut dyn PoseBackend,
    pub rng: &'a mut dyn RandomSource,
    pub trees: &'a TreeRegistry,
    pub viewport_width: f32,
}

/// Whole-figure pose: translation, scale, opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub at: Vec2,
    pub scale: f32,
    pub opacity: f32,
}

impl Pose {
    pub const fn new(at: Vec2, scale: f32, opacity: f32) -> Self {
        Self { at, scale, opacity }
    }

    pub fn apply(&self, id: EntityId, poses: &mut dyn PoseBackend) {
        poses.set_translation(id, self.at);
        poses.set_scale(id, self.scale);
        poses.set_opacity(id, self.opacity);
    }
}

/// A creature of any variant.
#[derive(Debug, Clone)]
pub enum Creature {
    Bird(Bird),
    Squirrel(Squirrel),
    Hedgehog(Hedgehog),
}

impl Creature {
    pub fn id(&self) -> EntityId {
        match self {
            Creature::Bird(c) => c.id(),
            Creature::Squirrel(c) => c.id(),
            Creature::Hedgehog(c) => c.id(),
        }
    }

    pub fn kind(&self) -> CreatureKind {
        match self {
            Creature::Bird(_) => CreatureKind::Bird,
            Creature::Squirrel(_) => CreatureKind::Squirrel,
            Creature::Hedgehog(_) => CreatureKind::Hedgehog,
        }
    }

    pub fn tree(&self) -> TreeId {
        match self {
            Creature::Bird(c) => c.tree(),
            Creature::Squirrel(c) => c.tree(),
            Creature::Hedgehog(c) => c.tree(),
        }
    }

    /// Current translation from the tree anchor.
    pub fn position(&self) -> Vec2 {
        match self {
            Creature::Bird(c) => c.position(),
            Creature::Squirrel(c) => c.position(),
            Creature::Hedgehog(c) => c.position(),
        }
    }

    /// Where the current transition is heading.
    pub fn target(&self) -> Vec2 {
        match self {
            Creature::Bird(c) => c.target(),
            Creature::Squirrel(c) => c.target(),
            Creature::Hedgehog(c) => c.target(),
        }
    }

    /// Name of the current state, e.g. `"flying"` or `"peeking"`.
    pub fn state_name(&self) -> &'static str {
        match self {
            Creature::Bird(c) => c.state().as_str(),
            Creature::Squirrel(c) => c.state().as_str(),
            Creature::Hedgehog(c) => c.state().as_str(),
        }
    }

    pub fn as_bird(&self) -> Option<&Bird> {
        match self {
            Creature::Bird(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_squirrel(&self) -> Option<&Squirrel> {
        match self {
            Creature::Squirrel(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_hedgehog(&self) -> Option<&Hedgehog> {
        match self {
            Creature::Hedgehog(c) => Some(c),
            _ => None,
        }
    }

    /// Route one scheduler tick to the variant's state machine.
    pub fn handle(&mut self, tick: Tick<Cue>, ctx: &mut BehaviorContext<'_>) {
        if ctx.trees.get(self.tree()).is_none() {
            log::trace!("{:?}: tree {:?} is gone, dropping {:?}", self.id(), self.tree(), tick);
            return;
        }
        match (self, tick) {
            (Creature::Bird(c), Tick::Frame { motion, elapsed_ms, progress, .. }) => {
                c.on_frame(ctx, motion, elapsed_ms, progress)
            }
            (Creature::Bird(c), Tick::Finished { motion, .. }) => c.on_finished(ctx, motion),
            (Creature::Bird(c), Tick::Fired { cue, .. }) => c.on_cue(ctx, cue),

            (Creature::Squirrel(c), Tick::Frame { motion, progress, .. }) => {
                c.on_frame(ctx, motion, progress)
            }
            (Creature::Squirrel(c), Tick::Finished { motion, .. }) => c.on_finished(motion),
            (Creature::Squirrel(c), Tick::Fired { cue, .. }) => c.on_cue(ctx, cue),

            (Creature::Hedgehog(c), Tick::Frame { motion, progress, .. }) => {
                c.on_frame(ctx, motion, progress)
            }
            (Creature::Hedgehog(c), Tick::Finished { motion, .. }) => c.on_finished(motion),
            (Creature::Hedgehog(c), Tick::Fired { cue, .. }) => c.on_cue(ctx, cue),
        }
    }
}
