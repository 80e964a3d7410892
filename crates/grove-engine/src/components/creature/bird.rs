//! Bird: flies in from the left, perches on a branch, leaves to the right,
//! waits off-screen and comes back.

use glam::Vec2;

use super::{BehaviorContext, Cue};
use crate::api::types::{CreatureKind, EntityId, TreeId};
use crate::components::layer::RenderLayer;
use crate::components::tree::{Branch, Tree};
use crate::core::scheduler::MotionId;
use crate::extensions::tween::Tween;
use crate::renderer::geometry::{Figure, PartName};

/// Horizontal spawn and re-entry position, left of the tree.
pub const SPAWN_X: f32 = -50.0;
/// How far past the viewport's right edge a departing bird flies.
pub const EXIT_MARGIN: f32 = 50.0;
/// Perch offset subtracted from the branch point.
pub const PERCH_OFFSET: Vec2 = Vec2::new(15.0, 10.0);

const ALTITUDE: (f32, f32) = (10.0, 40.0);
const SIT_MS: (f32, f32) = (3000.0, 7000.0);
const OFFSCREEN_MS: (f32, f32) = (2000.0, 5000.0);
const FLAP_PERIOD_MS: f32 = 100.0;
const FLAP_DEGREES: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdState {
    Flying,
    Sitting,
    WaitingOffscreen,
}

impl BirdState {
    pub const ALL: [BirdState; 3] = [
        BirdState::Flying,
        BirdState::Sitting,
        BirdState::WaitingOffscreen,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BirdState::Flying => "flying",
            BirdState::Sitting => "sitting",
            BirdState::WaitingOffscreen => "waitingOffscreen",
        }
    }
}

/// Where the current flight ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Branch,
    Offscreen,
}

#[derive(Debug, Clone)]
pub struct Bird {
    id: EntityId,
    tree: TreeId,
    branch: Branch,
    state: BirdState,
    heading: Heading,
    current: Vec2,
    target: Vec2,
    flight: Option<(MotionId, Tween)>,
}

/// Perch point for a branch: the branch midpoint minus [`PERCH_OFFSET`].
pub fn perch_target(tree: &Tree, branch: Branch) -> Vec2 {
    tree.branch(branch) - PERCH_OFFSET
}

/// Left wing angle in degrees at `elapsed_ms` into a flight. The right wing
/// mirrors it.
pub fn wing_angle(elapsed_ms: f32) -> f32 {
    (elapsed_ms / FLAP_PERIOD_MS).sin() * FLAP_DEGREES
}

impl Bird {
    /// Attach a bird to `tree` and start its first flight toward `branch`.
    pub fn spawn(id: EntityId, tree: &Tree, branch: Branch, ctx: &mut BehaviorContext<'_>) -> Self {
        ctx.poses.attach(
            id,
            Figure::creature(CreatureKind::Bird),
            tree.anchor_percent(),
            RenderLayer::Canopy,
        );
        let current = Vec2::new(SPAWN_X, ctx.rng.range(ALTITUDE.0, ALTITUDE.1));
        ctx.poses.set_translation(id, current);

        let mut bird = Self {
            id,
            tree: tree.id(),
            branch,
            state: BirdState::Flying,
            heading: Heading::Branch,
            current,
            target: current,
            flight: None,
        };
        bird.fly(ctx, perch_target(tree, branch), Heading::Branch);
        bird
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn tree(&self) -> TreeId {
        self.tree
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn state(&self) -> BirdState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Duration of the flight in progress, if any.
    pub fn flight_ms(&self) -> Option<f32> {
        self.flight.map(|(_, tween)| tween.duration_ms)
    }

    pub(crate) fn on_frame(
        &mut self,
        ctx: &mut BehaviorContext<'_>,
        motion: MotionId,
        elapsed_ms: f32,
        progress: f32,
    ) {
        let Some((current, tween)) = self.flight else {
            return;
        };
        if current != motion {
            log::trace!("{:?} bird: stale frame for {:?}", self.id, motion);
            return;
        }
        self.current = tween.sample(progress);
        ctx.poses.set_translation(self.id, self.current);
        if self.state == BirdState::Flying {
            self.set_wings(ctx, wing_angle(elapsed_ms));
        }
    }

    pub(crate) fn on_finished(&mut self, ctx: &mut BehaviorContext<'_>, motion: MotionId) {
        if !matches!(self.flight, Some((current, _)) if current == motion) {
            return;
        }
        self.flight = None;
        match self.heading {
            Heading::Branch => {
                self.enter(BirdState::Sitting, ctx);
                let dwell = ctx.rng.range(SIT_MS.0, SIT_MS.1);
                ctx.scheduler.after(self.id, dwell, Cue::Depart);
            }
            Heading::Offscreen => {
                self.enter(BirdState::WaitingOffscreen, ctx);
                self.current = Vec2::new(SPAWN_X, ctx.rng.range(ALTITUDE.0, ALTITUDE.1));
                self.target = self.current;
                ctx.poses.set_translation(self.id, self.current);
                let wait = ctx.rng.range(OFFSCREEN_MS.0, OFFSCREEN_MS.1);
                ctx.scheduler.after(self.id, wait, Cue::Return);
            }
        }
    }

    pub(crate) fn on_cue(&mut self, ctx: &mut BehaviorContext<'_>, cue: Cue) {
        match (self.state, cue) {
            (BirdState::Sitting, Cue::Depart) => {
                let exit = Vec2::new(
                    ctx.viewport_width + EXIT_MARGIN,
                    ctx.rng.range(ALTITUDE.0, ALTITUDE.1),
                );
                self.fly(ctx, exit, Heading::Offscreen);
            }
            (BirdState::WaitingOffscreen, Cue::Return) => {
                let Some(tree) = ctx.trees.get(self.tree) else {
                    log::trace!("{:?} bird: tree {:?} is gone", self.id, self.tree);
                    return;
                };
                let perch = perch_target(tree, self.branch);
                self.fly(ctx, perch, Heading::Branch);
            }
            (state, cue) => {
                log::trace!("{:?} bird: ignoring {:?} while {}", self.id, cue, state.as_str());
            }
        }
    }

    fn fly(&mut self, ctx: &mut BehaviorContext<'_>, to: Vec2, heading: Heading) {
        self.enter(BirdState::Flying, ctx);
        self.heading = heading;
        self.target = to;
        let tween = Tween::flight(self.current, to);
        let motion = ctx.scheduler.animate(self.id, tween.duration_ms);
        self.flight = Some((motion, tween));
    }

    fn enter(&mut self, next: BirdState, ctx: &mut BehaviorContext<'_>) {
        if self.state != next {
            log::debug!("{:?} bird: {} -> {}", self.id, self.state.as_str(), next.as_str());
        }
        self.state = next;
        if next != BirdState::Flying {
            self.set_wings(ctx, 0.0);
        }
    }

    fn set_wings(&self, ctx: &mut BehaviorContext<'_>, left: f32) {
        ctx.poses.set_part_rotation(self.id, PartName::WingLeft, left);
        ctx.poses.set_part_rotation(self.id, PartName::WingRight, -left);
    }
}
