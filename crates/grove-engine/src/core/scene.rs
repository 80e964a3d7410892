use crate::api::config::SceneConfig;
use crate::api::error::SceneError;
use crate::api::types::EntityId;
use crate::components::creature::{BehaviorContext, Bird, Creature, Cue, Hedgehog, Squirrel};
use crate::components::layer::RenderLayer;
use crate::components::tree::{Branch, TreeRegistry};
use crate::core::rng::{RandomSource, Rng};
use crate::core::scheduler::Scheduler;
use crate::renderer::geometry::Figure;
use crate::renderer::instance::RenderBuffer;
use crate::renderer::pose::{PoseBackend, PoseGraph};
use crate::systems::render::build_render_buffer;

/// Draws below this pick the first branch for a tree's bird.
const FIRST_BRANCH_BELOW: f32 = 0.5;

/// A woodland scene: trees, their creatures, and the scheduler driving them.
///
/// The scene is an explicit value owned by the host. `start` and `clear` may
/// be called in any order and any number of times.
pub struct Scene<B: PoseBackend = PoseGraph> {
    config: SceneConfig,
    poses: B,
    rng: Box<dyn RandomSource>,
    scheduler: Scheduler<Cue>,
    trees: TreeRegistry,
    creatures: Vec<Creature>,
    next_entity: u32,
    active: bool,
}

fn allocate(next: &mut u32) -> EntityId {
    let id = EntityId(*next);
    *next = next.wrapping_add(1);
    id
}

impl Scene<PoseGraph> {
    /// Scene on the retained pose graph with a seeded [`Rng`].
    pub fn with_seed(config: SceneConfig, seed: u64) -> Result<Self, SceneError> {
        Self::new(config, PoseGraph::new(), Box::new(Rng::new(seed)))
    }

    /// Write every attached figure's shapes into `buffer`.
    pub fn render(&self, buffer: &mut RenderBuffer) {
        build_render_buffer(&self.poses, buffer);
    }
}

impl<B: PoseBackend> Scene<B> {
    pub fn new(config: SceneConfig, poses: B, rng: Box<dyn RandomSource>) -> Result<Self, SceneError> {
        config.validate()?;
        Ok(Self {
            config,
            poses,
            rng,
            scheduler: Scheduler::new(),
            trees: TreeRegistry::new(),
            creatures: Vec::new(),
            next_entity: 1,
            active: false,
        })
    }

    /// Populate the scene. An active scene is cleared first.
    pub fn start(&mut self) {
        if self.active {
            self.clear();
        }

        let anchors = self.config.tree_anchors.clone();
        for anchor in anchors {
            let tree_entity = allocate(&mut self.next_entity);
            self.poses.attach(tree_entity, Figure::tree(), anchor, RenderLayer::Trees);
            let tree_id = self.trees.create(tree_entity, anchor);
            let Some(tree) = self.trees.get(tree_id).copied() else {
                log::warn!("tree {:?} vanished during start", tree_id);
                continue;
            };

            let mut ctx = BehaviorContext {
                scheduler: &mut self.scheduler,
                poses: &mut self.poses,
                rng: self.rng.as_mut(),
                trees: &self.trees,
                viewport_width: self.config.viewport_width,
            };

            let branch = if ctx.rng.next_f32() < FIRST_BRANCH_BELOW {
                Branch::First
            } else {
                Branch::Second
            };
            let bird = Bird::spawn(allocate(&mut self.next_entity), &tree, branch, &mut ctx);
            self.creatures.push(Creature::Bird(bird));

            let squirrel = Squirrel::spawn(allocate(&mut self.next_entity), &tree, &mut ctx);
            self.creatures.push(Creature::Squirrel(squirrel));

            if ctx.rng.next_f32() >= 1.0 - self.config.hedgehog_chance {
                let hedgehog = Hedgehog::spawn(allocate(&mut self.next_entity), &tree, &mut ctx);
                self.creatures.push(Creature::Hedgehog(hedgehog));
            }
        }

        self.active = true;
        log::info!(
            "scene started: {} trees, {} creatures, {} pose nodes",
            self.trees.len(),
            self.creatures.len(),
            self.poses.len()
        );
    }

    /// Tear everything down. Safe to call at any time, including twice.
    pub fn clear(&mut self) {
        let cancelled = self.scheduler.pending();
        self.scheduler.clear();
        for creature in self.creatures.drain(..) {
            self.poses.detach(creature.id());
        }
        for tree in self.trees.iter() {
            self.poses.detach(tree.entity());
        }
        self.trees.clear();

        if self.active {
            log::info!("scene cleared: {} pending callbacks cancelled", cancelled);
        }
        self.active = false;
    }

    /// Advance the scene clock by `dt_ms` and run every due transition.
    pub fn tick(&mut self, dt_ms: f32) {
        let ticks = self.scheduler.advance(dt_ms);
        if ticks.is_empty() {
            return;
        }

        let mut ctx = BehaviorContext {
            scheduler: &mut self.scheduler,
            poses: &mut self.poses,
            rng: self.rng.as_mut(),
            trees: &self.trees,
            viewport_width: self.config.viewport_width,
        };
        for tick in ticks {
            let owner = tick.owner();
            match self.creatures.iter_mut().find(|c| c.id() == owner) {
                Some(creature) => creature.handle(tick, &mut ctx),
                None => log::trace!("no creature {:?}, dropping {:?}", owner, tick),
            }
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn trees(&self) -> &TreeRegistry {
        &self.trees
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn creature(&self, id: EntityId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id() == id)
    }

    pub fn poses(&self) -> &B {
        &self.poses
    }

    /// Motions and timers still waiting to run.
    pub fn pending_callbacks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Scene clock in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.scheduler.now_ms()
    }
}
