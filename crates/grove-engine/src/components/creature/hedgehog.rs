//! Hedgehog: hides at the foot of the tree and comes out to forage.

use std::f32::consts::PI;

use glam::Vec2;

use super::{BehaviorContext, Cue, Pose};
use crate::api::types::{CreatureKind, EntityId, TreeId};
use crate::components::layer::RenderLayer;
use crate::components::tree::Tree;
use crate::core::scheduler::MotionId;
use crate::renderer::geometry::Figure;

/// Hiding spot at the foot of the tree.
pub const BURROW: Vec2 = Vec2::new(35.0, 190.0);
/// Centre of the foraging sway.
pub const FORAGE_SPOT: Vec2 = Vec2::new(35.0, 185.0);
/// Duration of one foraging sway.
pub const FORAGE_MS: f32 = 2000.0;

const SWAY_X: f32 = 10.0;
const SWAY_Y: f32 = 2.0;

const FIRST_FORAGE_MS: f32 = 3000.0;
const HIDE_MS: (f32, f32) = (4000.0, 8000.0);
const COLLECT_MS: (f32, f32) = (2000.0, 4000.0);

const HIDING: Pose = Pose::new(BURROW, 0.6, 0.3);
const COLLECTING: Pose = Pose::new(FORAGE_SPOT, 0.7, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HedgehogState {
    Hiding,
    Collecting,
}

impl HedgehogState {
    pub const ALL: [HedgehogState; 2] = [HedgehogState::Hiding, HedgehogState::Collecting];

    pub fn as_str(self) -> &'static str {
        match self {
            HedgehogState::Hiding => "hiding",
            HedgehogState::Collecting => "collecting",
        }
    }

    pub fn pose(self) -> Pose {
        match self {
            HedgehogState::Hiding => HIDING,
            HedgehogState::Collecting => COLLECTING,
        }
    }
}

/// Foraging position at `progress` through a sway.
pub fn sway_position(progress: f32) -> Vec2 {
    Vec2::new(
        FORAGE_SPOT.x + (2.0 * PI * progress).sin() * SWAY_X,
        FORAGE_SPOT.y + (3.0 * PI * progress).sin() * SWAY_Y,
    )
}

#[derive(Debug, Clone)]
pub struct Hedgehog {
    id: EntityId,
    tree: TreeId,
    state: HedgehogState,
    current: Vec2,
    sway: Option<MotionId>,
}

impl Hedgehog {
    /// Attach a hiding hedgehog to `tree`. It first forages after 3 s.
    pub fn spawn(id: EntityId, tree: &Tree, ctx: &mut BehaviorContext<'_>) -> Self {
        ctx.poses.attach(
            id,
            Figure::creature(CreatureKind::Hedgehog),
            tree.anchor_percent(),
            RenderLayer::Ground,
        );
        HIDING.apply(id, ctx.poses);
        ctx.scheduler.after(id, FIRST_FORAGE_MS, Cue::Forage);
        Self {
            id,
            tree: tree.id(),
            state: HedgehogState::Hiding,
            current: BURROW,
            sway: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn tree(&self) -> TreeId {
        self.tree
    }

    pub fn state(&self) -> HedgehogState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.state.pose().at
    }

    pub(crate) fn on_frame(&mut self, ctx: &mut BehaviorContext<'_>, motion: MotionId, progress: f32) {
        if self.sway != Some(motion) {
            log::trace!("{:?} hedgehog: stale frame for {:?}", self.id, motion);
            return;
        }
        self.current = sway_position(progress);
        ctx.poses.set_translation(self.id, self.current);
    }

    pub(crate) fn on_finished(&mut self, motion: MotionId) {
        if self.sway == Some(motion) {
            self.sway = None;
        }
    }

    pub(crate) fn on_cue(&mut self, ctx: &mut BehaviorContext<'_>, cue: Cue) {
        match (self.state, cue) {
            (HedgehogState::Hiding, Cue::Forage) => {
                self.enter(HedgehogState::Collecting, ctx);
                self.sway = Some(ctx.scheduler.animate(self.id, FORAGE_MS));
                let dwell = ctx.rng.range(COLLECT_MS.0, COLLECT_MS.1);
                ctx.scheduler.after(self.id, dwell, Cue::Hide);
            }
            (HedgehogState::Collecting, Cue::Hide) => {
                if let Some(sway) = self.sway.take() {
                    ctx.scheduler.cancel_motion(sway);
                }
                self.enter(HedgehogState::Hiding, ctx);
                let rest = ctx.rng.range(HIDE_MS.0, HIDE_MS.1);
                ctx.scheduler.after(self.id, rest, Cue::Forage);
            }
            (state, cue) => {
                log::trace!("{:?} hedgehog: ignoring {:?} while {}", self.id, cue, state.as_str());
            }
        }
    }

    fn enter(&mut self, next: HedgehogState, ctx: &mut BehaviorContext<'_>) {
        log::debug!("{:?} hedgehog: {} -> {}", self.id, self.state.as_str(), next.as_str());
        self.state = next;
        let pose = next.pose();
        self.current = pose.at;
        pose.apply(self.id, ctx.poses);
    }
}
