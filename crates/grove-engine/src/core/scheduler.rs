// core/scheduler.rs
//
// Animation scheduler: frame-driven motions plus delayed one-shot cues,
// keyed by the owning EntityId so a whole creature can be cancelled at once.
//
// Usage:
//   let mut sched = Scheduler::new();
//   let m = sched.animate(owner, 2000.0);        // per-frame driver
//   sched.after(owner, 3000.0, Cue::Depart);     // one-shot
//   for tick in sched.advance(dt_ms) { ... }     // host frame loop

use crate::api::types::EntityId;

/// Longest step a single `advance` may take. Longer host gaps (a tab that
/// slept) are clamped so one frame cannot skip a whole behaviour cycle.
pub const MAX_STEP_MS: f32 = 60_000.0;

/// Handle to a running motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotionId(pub u32);

/// Handle to a pending one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// What the scheduler reports back for one `advance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick<C> {
    /// A motion advanced; the owner should apply its pose for `progress`.
    Frame {
        owner: EntityId,
        motion: MotionId,
        elapsed_ms: f32,
        progress: f32,
    },
    /// A motion reached progress 1. Always follows that motion's last `Frame`.
    Finished { owner: EntityId, motion: MotionId },
    /// A timer came due.
    Fired {
        owner: EntityId,
        timer: TimerId,
        cue: C,
    },
}

impl<C> Tick<C> {
    pub fn owner(&self) -> EntityId {
        match self {
            Tick::Frame { owner, .. } | Tick::Finished { owner, .. } | Tick::Fired { owner, .. } => {
                *owner
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Motion {
    id: MotionId,
    owner: EntityId,
    duration_ms: f32,
    elapsed_ms: f32,
}

#[derive(Debug, Clone)]
struct Timer<C> {
    id: TimerId,
    owner: EntityId,
    due_ms: f64,
    cue: C,
}

/// Drives every interpolation and delayed transition in a scene.
#[derive(Debug)]
pub struct Scheduler<C> {
    now_ms: f64,
    next_id: u32,
    motions: Vec<Motion>,
    timers: Vec<Timer<C>>,
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 0,
            motions: Vec::new(),
            timers: Vec::new(),
        }
    }
}

impl<C: Copy> Scheduler<C> {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Scheduler clock in milliseconds since creation.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Start a motion lasting `duration_ms`. Frames begin on the next `advance`.
    pub fn animate(&mut self, owner: EntityId, duration_ms: f32) -> MotionId {
        let id = MotionId(self.bump());
        self.motions.push(Motion {
            id,
            owner,
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
        });
        id
    }

    /// Fire `cue` for `owner` once `delay_ms` has passed.
    pub fn after(&mut self, owner: EntityId, delay_ms: f32, cue: C) -> TimerId {
        let id = TimerId(self.bump());
        self.timers.push(Timer {
            id,
            owner,
            due_ms: self.now_ms + delay_ms.max(0.0) as f64,
            cue,
        });
        id
    }

    pub fn cancel_motion(&mut self, id: MotionId) -> bool {
        let before = self.motions.len();
        self.motions.retain(|m| m.id != id);
        self.motions.len() != before
    }

    pub fn cancel_timer(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every motion and timer belonging to `owner`.
    /// Returns how many items were dropped.
    pub fn cancel_owner(&mut self, owner: EntityId) -> usize {
        let before = self.pending();
        self.motions.retain(|m| m.owner != owner);
        self.timers.retain(|t| t.owner != owner);
        before - self.pending()
    }

    /// Drop all pending work.
    pub fn clear(&mut self) {
        self.motions.clear();
        self.timers.clear();
    }

    /// Total motions and timers still pending.
    pub fn pending(&self) -> usize {
        self.motions.len() + self.timers.len()
    }

    pub fn pending_for(&self, owner: EntityId) -> usize {
        self.motions.iter().filter(|m| m.owner == owner).count()
            + self.timers.iter().filter(|t| t.owner == owner).count()
    }

    /// Advance the clock by `dt_ms` and collect what happened.
    ///
    /// Motions report first (in start order), then due timers in due order.
    /// Work scheduled while handling the returned ticks starts counting from
    /// the new clock value. Non-finite steps are ignored and steps longer
    /// than [`MAX_STEP_MS`] are clamped.
    pub fn advance(&mut self, dt_ms: f32) -> Vec<Tick<C>> {
        if !dt_ms.is_finite() {
            log::trace!("scheduler: ignoring non-finite step {}", dt_ms);
            return Vec::new();
        }
        let dt_ms = dt_ms.clamp(0.0, MAX_STEP_MS);
        self.now_ms += dt_ms as f64;

        let mut ticks = Vec::new();

        for motion in &mut self.motions {
            motion.elapsed_ms += dt_ms;
            let done = motion.elapsed_ms >= motion.duration_ms;
            let progress = if done {
                1.0
            } else {
                (motion.elapsed_ms / motion.duration_ms).min(1.0)
            };
            ticks.push(Tick::Frame {
                owner: motion.owner,
                motion: motion.id,
                elapsed_ms: motion.elapsed_ms,
                progress,
            });
            if done {
                ticks.push(Tick::Finished {
                    owner: motion.owner,
                    motion: motion.id,
                });
            }
        }
        self.motions.retain(|m| m.elapsed_ms < m.duration_ms);

        let now = self.now_ms;
        let mut due: Vec<Timer<C>> = Vec::new();
        self.timers.retain(|t| {
            if t.due_ms <= now {
                due.push(t.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.id.0.cmp(&b.id.0)));
        ticks.extend(due.into_iter().map(|t| Tick::Fired {
            owner: t.owner,
            timer: t.id,
            cue: t.cue,
        }));

        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Cue {
        Ping,
        Pong,
    }

    #[test]
    fn motion_frames_then_finishes() {
        let mut sched: Scheduler<Cue> = Scheduler::new();
        let owner = EntityId(1);
        let id = sched.animate(owner, 100.0);

        let ticks = sched.advance(50.0);
        assert_eq!(
            ticks,
            vec![Tick::Frame { owner, motion: id, elapsed_ms: 50.0, progress: 0.5 }]
        );

        let ticks = sched.advance(60.0);
        assert_eq!(ticks.len(), 2);
        assert!(matches!(ticks[0], Tick::Frame { progress, .. } if progress == 1.0));
        assert_eq!(ticks[1], Tick::Finished { owner, motion: id });
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn timers_fire_once_in_due_order() {
        let mut sched = Scheduler::new();
        let owner = EntityId(3);
        sched.after(owner, 300.0, Cue::Pong);
        sched.after(owner, 100.0, Cue::Ping);

        assert!(sched.advance(99.0).is_empty());
        let ticks = sched.advance(250.0);
        let cues: Vec<Cue> = ticks
            .iter()
            .filter_map(|t| match t {
                Tick::Fired { cue, .. } => Some(*cue),
                _ => None,
            })
            .collect();
        assert_eq!(cues, vec![Cue::Ping, Cue::Pong]);
        assert!(sched.advance(1000.0).is_empty());
    }

    #[test]
    fn delay_counts_from_current_clock() {
        let mut sched = Scheduler::new();
        sched.advance(500.0);
        sched.after(EntityId(1), 100.0, Cue::Ping);
        assert!(sched.advance(99.0).is_empty());
        assert_eq!(sched.advance(1.0).len(), 1);
    }

    #[test]
    fn cancel_owner_drops_only_that_owner() {
        let mut sched = Scheduler::new();
        let a = EntityId(1);
        let b = EntityId(2);
        sched.animate(a, 100.0);
        sched.after(a, 100.0, Cue::Ping);
        sched.after(b, 100.0, Cue::Pong);

        assert_eq!(sched.cancel_owner(a), 2);
        assert_eq!(sched.pending_for(a), 0);
        assert_eq!(sched.pending_for(b), 1);

        let ticks = sched.advance(200.0);
        assert!(ticks.iter().all(|t| t.owner() == b));
    }

    #[test]
    fn cancelled_items_never_report() {
        let mut sched = Scheduler::new();
        let owner = EntityId(9);
        let m = sched.animate(owner, 100.0);
        let t = sched.after(owner, 10.0, Cue::Ping);
        assert!(sched.cancel_motion(m));
        assert!(sched.cancel_timer(t));
        assert!(!sched.cancel_timer(t));
        assert!(sched.advance(500.0).is_empty());
    }

    #[test]
    fn zero_duration_motion_finishes_immediately() {
        let mut sched: Scheduler<Cue> = Scheduler::new();
        sched.animate(EntityId(1), 0.0);
        let ticks = sched.advance(0.0);
        assert_eq!(ticks.len(), 2);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn non_finite_step_leaves_clock_alone() {
        let mut sched = Scheduler::new();
        let owner = EntityId(4);
        sched.after(owner, 3000.0, Cue::Ping);

        assert!(sched.advance(f32::INFINITY).is_empty());
        assert!(sched.advance(f32::NAN).is_empty());
        assert_eq!(sched.now_ms(), 0.0);

        for _ in 0..10 {
            assert!(sched.advance(16.0).is_empty());
        }
        assert_eq!(sched.pending(), 1);
        assert_eq!(sched.advance(3000.0 - 160.0).len(), 1);
    }

    #[test]
    fn huge_step_is_clamped() {
        let mut sched = Scheduler::new();
        sched.advance(1.0e20);
        assert_eq!(sched.now_ms(), MAX_STEP_MS as f64);

        sched.after(EntityId(1), 3000.0, Cue::Pong);
        assert!(sched.advance(2999.0).is_empty());
        assert_eq!(sched.advance(1.0).len(), 1);
    }
}
