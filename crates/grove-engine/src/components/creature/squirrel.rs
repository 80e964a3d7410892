//! Squirrel: lives in the tree hole, peeks out, sometimes runs along the
//! ground and comes back inside.

use std::f32::consts::PI;

use glam::Vec2;

use super::{BehaviorContext, Cue, Pose};
use crate::api::types::{CreatureKind, EntityId, TreeId};
use crate::components::layer::RenderLayer;
use crate::components::tree::Tree;
use crate::core::scheduler::MotionId;
use crate::extensions::{Easing, Tween};
use crate::renderer::geometry::{Figure, PartName};

/// Offset of the squirrel's home from the tree hole.
pub const HOLE_INSET: Vec2 = Vec2::new(8.0, 0.0);
/// Horizontal distance covered by one run.
pub const RUN_DISTANCE: f32 = 100.0;
/// Duration of one run.
pub const RUN_MS: f32 = 2000.0;

const PEEK_RISE: f32 = 5.0;
const RUN_LANE_Y: f32 = 180.0;
const RUN_BOB: f32 = 3.0;
const TAIL_SWING_DEG: f32 = 10.0;
const RUN_CHANCE: f32 = 0.5;

const FIRST_PEEK_MS: f32 = 2000.0;
const REST_MS: (f32, f32) = (2000.0, 5000.0);
const PEEK_MS: (f32, f32) = (1500.0, 3500.0);
const RUNNING_MS: (f32, f32) = (3000.0, 5000.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquirrelState {
    Inside,
    Peeking,
    Running,
}

impl SquirrelState {
    pub const ALL: [SquirrelState; 3] = [
        SquirrelState::Inside,
        SquirrelState::Peeking,
        SquirrelState::Running,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SquirrelState::Inside => "inside",
            SquirrelState::Peeking => "peeking",
            SquirrelState::Running => "running",
        }
    }
}

/// Straight dash along the ground lane, starting below the home column.
pub fn run_dash(home: Vec2) -> Tween {
    let start = Vec2::new(home.x, RUN_LANE_Y);
    Tween::new(start, start + Vec2::new(RUN_DISTANCE, 0.0), RUN_MS, Easing::Linear)
}

/// Run position at `progress`: the dash plus a small vertical bob.
pub fn run_position(dash: &Tween, progress: f32) -> Vec2 {
    dash.sample(progress) + Vec2::new(0.0, (4.0 * PI * progress).sin() * RUN_BOB)
}

/// Tail swing in degrees at `progress` through a run.
pub fn tail_angle(progress: f32) -> f32 {
    (8.0 * PI * progress).sin() * TAIL_SWING_DEG
}

#[derive(Debug, Clone)]
pub struct Squirrel {
    id: EntityId,
    tree: TreeId,
    home: Vec2,
    state: SquirrelState,
    current: Vec2,
    run: Option<(MotionId, Tween)>,
}

impl Squirrel {
    /// Attach a squirrel inside `tree`'s hole. It first peeks after 2 s.
    pub fn spawn(id: EntityId, tree: &Tree, ctx: &mut BehaviorContext<'_>) -> Self {
        ctx.poses.attach(
            id,
            Figure::creature(CreatureKind::Squirrel),
            tree.anchor_percent(),
            RenderLayer::Canopy,
        );
        let home = tree.hole() - HOLE_INSET;
        let squirrel = Self {
            id,
            tree: tree.id(),
            home,
            state: SquirrelState::Inside,
            current: home,
            run: None,
        };
        squirrel.pose(SquirrelState::Inside).apply(id, ctx.poses);
        ctx.poses.set_part_rotation(id, PartName::Tail, 0.0);
        ctx.scheduler.after(id, FIRST_PEEK_MS, Cue::Peek);
        squirrel
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn tree(&self) -> TreeId {
        self.tree
    }

    pub fn state(&self) -> SquirrelState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.current
    }

    /// End point of the current state: the run's finish line while running,
    /// otherwise the state's pose.
    pub fn target(&self) -> Vec2 {
        match self.state {
            SquirrelState::Running => run_dash(self.home).to,
            state => self.pose(state).at,
        }
    }

    /// Pose held on entering `state`.
    pub fn pose(&self, state: SquirrelState) -> Pose {
        match state {
            SquirrelState::Inside => Pose::new(self.home, 0.6, 0.0),
            SquirrelState::Peeking => Pose::new(self.home - Vec2::new(0.0, PEEK_RISE), 0.7, 1.0),
            SquirrelState::Running => Pose::new(Vec2::new(self.home.x, RUN_LANE_Y), 0.8, 1.0),
        }
    }

    pub(crate) fn on_frame(&mut self, ctx: &mut BehaviorContext<'_>, motion: MotionId, progress: f32) {
        let Some((_, dash)) = self.run.filter(|(current, _)| *current == motion) else {
            log::trace!("{:?} squirrel: stale frame for {:?}", self.id, motion);
            return;
        };
        self.current = run_position(&dash, progress);
        ctx.poses.set_translation(self.id, self.current);
        ctx.poses.set_part_rotation(self.id, PartName::Tail, tail_angle(progress));
    }

    pub(crate) fn on_finished(&mut self, motion: MotionId) {
        if matches!(self.run, Some((current, _)) if current == motion) {
            self.run = None;
        }
    }

    pub(crate) fn on_cue(&mut self, ctx: &mut BehaviorContext<'_>, cue: Cue) {
        match (self.state, cue) {
            (SquirrelState::Inside, Cue::Peek) => {
                self.enter(SquirrelState::Peeking, ctx);
                let dwell = ctx.rng.range(PEEK_MS.0, PEEK_MS.1);
                ctx.scheduler.after(self.id, dwell, Cue::Decide);
            }
            (SquirrelState::Peeking, Cue::Decide) => {
                if ctx.rng.next_f32() >= RUN_CHANCE {
                    self.enter(SquirrelState::Running, ctx);
                    let dash = run_dash(self.home);
                    self.run = Some((ctx.scheduler.animate(self.id, dash.duration_ms), dash));
                    let dwell = ctx.rng.range(RUNNING_MS.0, RUNNING_MS.1);
                    ctx.scheduler.after(self.id, dwell, Cue::Retreat);
                } else {
                    self.go_inside(ctx);
                }
            }
            (SquirrelState::Running, Cue::Retreat) => self.go_inside(ctx),
            (state, cue) => {
                log::trace!("{:?} squirrel: ignoring {:?} while {}", self.id, cue, state.as_str());
            }
        }
    }

    fn go_inside(&mut self, ctx: &mut BehaviorContext<'_>) {
        if let Some((run, _)) = self.run.take() {
            ctx.scheduler.cancel_motion(run);
        }
        self.enter(SquirrelState::Inside, ctx);
        ctx.poses.set_part_rotation(self.id, PartName::Tail, 0.0);
        let rest = ctx.rng.range(REST_MS.0, REST_MS.1);
        ctx.scheduler.after(self.id, rest, Cue::Peek);
    }

    fn enter(&mut self, next: SquirrelState, ctx: &mut BehaviorContext<'_>) {
        log::debug!("{:?} squirrel: {} -> {}", self.id, self.state.as_str(), next.as_str());
        self.state = next;
        let pose = self.pose(next);
        self.current = pose.at;
        pose.apply(self.id, ctx.poses);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::creature::testing::Harness;
    use crate::components::creature::Creature;
    use crate::core::rng::SequenceRandom;

    fn spawn(harness: &mut Harness) -> Creature {
        let tree_id = harness.trees.create(EntityId(1), 45.0);
        let tree = *harness.trees.get(tree_id).unwrap();
        let mut ctx = harness.ctx();
        Creature::Squirrel(Squirrel::spawn(EntityId(2), &tree, &mut ctx))
    }

    fn node_pose(harness: &Harness) -> Pose {
        let node = harness.poses.get(EntityId(2)).unwrap();
        Pose::new(node.translation, node.scale, node.opacity)
    }

    #[test]
    fn starts_hidden_in_the_hole() {
        let mut harness = Harness::new(SequenceRandom::constant(0.0));
        let squirrel = spawn(&mut harness);
        assert_eq!(squirrel.position(), Vec2::new(42.0, 100.0));
        assert_eq!(node_pose(&harness), Pose::new(Vec2::new(42.0, 100.0), 0.6, 0.0));
        assert_eq!(harness.scheduler.pending_for(EntityId(2)), 1);
    }

    #[test]
    fn first_peek_after_two_seconds() {
        let mut harness = Harness::new(SequenceRandom::constant(0.0));
        let mut squirrel = spawn(&mut harness);
        harness.run(&mut squirrel, 1999.0);
        assert_eq!(squirrel.state_name(), "inside");
        harness.run(&mut squirrel, 1.0);
        assert_eq!(squirrel.state_name(), "peeking");
        assert_eq!(node_pose(&harness), Pose::new(Vec2::new(42.0, 95.0), 0.7, 1.0));
    }

    #[test]
    fn low_draw_retreats_without_running() {
        // peek dwell 1500, decide 0.0 -> inside
        let mut harness = Harness::new(SequenceRandom::constant(0.0));
        let mut squirrel = spawn(&mut harness);
        harness.run(&mut squirrel, 2000.0);
        harness.run(&mut squirrel, 1500.0);
        assert_eq!(squirrel.state_name(), "inside");
        assert_eq!(node_pose(&harness), Pose::new(Vec2::new(42.0, 100.0), 0.6, 0.0));
    }

    #[test]
    fn run_covers_exact_distance_and_returns_home() {
        // peek dwell draw, decide draw, running dwell draw
        let mut harness = Harness::new(SequenceRandom::new(vec![0.0, 0.5, 0.0]));
        let mut squirrel = spawn(&mut harness);
        harness.run(&mut squirrel, 2000.0);
        harness.run(&mut squirrel, 1500.0);
        assert_eq!(squirrel.state_name(), "running");
        assert_eq!(squirrel.position(), Vec2::new(42.0, 180.0));
        assert_eq!(squirrel.target(), Vec2::new(142.0, 180.0));

        harness.run(&mut squirrel, 1000.0);
        let midway = squirrel.position();
        assert!((midway.x - 92.0).abs() < 1e-3);

        harness.run(&mut squirrel, 1000.0);
        let end = squirrel.position();
        assert!((end.x - 142.0).abs() < 1e-3);
        assert!((end.y - 180.0).abs() < 1e-3);
        assert_eq!(harness.scheduler.pending_for(EntityId(2)), 1);

        // running dwell 3000 ms from entry
        harness.run(&mut squirrel, 1000.0);
        assert_eq!(squirrel.state_name(), "inside");
        assert_eq!(node_pose(&harness), Pose::new(Vec2::new(42.0, 100.0), 0.6, 0.0));
        let node = harness.poses.get(EntityId(2)).unwrap();
        assert_eq!(node.part_rotation(PartName::Tail), 0.0);
    }

    #[test]
    fn tail_swings_within_bounds() {
        for i in 0..=100 {
            let p = i as f32 / 100.0;
            assert!(tail_angle(p).abs() <= TAIL_SWING_DEG + 1e-4);
            let y = run_position(&run_dash(Vec2::new(42.0, 100.0)), p).y;
            assert!((y - RUN_LANE_Y).abs() <= RUN_BOB + 1e-4);
        }
    }

    #[test]
    fn state_stays_in_its_set() {
        let mut harness = Harness::new(SequenceRandom::new(vec![0.2, 0.9, 0.6, 0.1, 0.4]));
        let mut squirrel = spawn(&mut harness);
        for _ in 0..600 {
            harness.run(&mut squirrel, 50.0);
            let state = squirrel.as_squirrel().unwrap().state();
            assert!(SquirrelState::ALL.contains(&state));
        }
    }
}
