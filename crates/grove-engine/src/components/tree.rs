//! Tree anchors: static perches and burrows the creatures navigate to.

use glam::Vec2;

use crate::api::types::{EntityId, TreeId};

// Attachment template: branch points are the midpoints of the drawn branches.
const BRANCH_1: Vec2 = Vec2::new(25.0, 92.5);
const BRANCH_2: Vec2 = Vec2::new(75.0, 87.5);
const HOLE: Vec2 = Vec2::new(50.0, 100.0);

/// Which of a tree's two branches a bird perches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    First,
    Second,
}

impl Branch {
    pub fn index(self) -> usize {
        match self {
            Branch::First => 0,
            Branch::Second => 1,
        }
    }
}

/// A static tree. Anchor and attachment points never change after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    id: TreeId,
    entity: EntityId,
    anchor_percent: f32,
    branches: [Vec2; 2],
    hole: Vec2,
}

impl Tree {
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Pose handle of the tree's figure.
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Horizontal anchor in percent of the scene width.
    pub fn anchor_percent(&self) -> f32 {
        self.anchor_percent
    }

    pub fn branch(&self, branch: Branch) -> Vec2 {
        self.branches[branch.index()]
    }

    pub fn hole(&self) -> Vec2 {
        self.hole
    }
}

/// Holds the trees of one scene. Creatures refer to trees by [`TreeId`].
#[derive(Debug, Default)]
pub struct TreeRegistry {
    trees: Vec<Tree>,
}

impl TreeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree at `anchor_percent` from the fixed attachment template.
    pub fn create(&mut self, entity: EntityId, anchor_percent: f32) -> TreeId {
        let id = TreeId(self.trees.len() as u32);
        self.trees.push(Tree {
            id,
            entity,
            anchor_percent,
            branches: [BRANCH_1, BRANCH_2],
            hole: HOLE,
        });
        id
    }

    pub fn get(&self, id: TreeId) -> Option<&Tree> {
        self.trees.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn clear(&mut self) {
        self.trees.clear();
    }
}
