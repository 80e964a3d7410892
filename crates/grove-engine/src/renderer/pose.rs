//! Pose handles, the only way creatures touch their visuals.
//!
//! A creature owns an [`EntityId`]; the backend maps it to whatever the host
//! draws with. [`PoseGraph`] is the retained-mode backend: a flat list of
//! nodes that `systems::render` flattens into the instance buffer.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::layer::RenderLayer;
use crate::renderer::geometry::{Figure, PartName};

/// Backend contract for posing figures by handle.
///
/// Setters on a handle that is not attached are ignored, so a late update
/// for a detached figure is harmless.
pub trait PoseBackend {
    /// Attach a figure anchored at `anchor_percent` of the scene width.
    fn attach(&mut self, id: EntityId, figure: Figure, anchor_percent: f32, layer: RenderLayer);

    /// Remove a figure. Returns false if it was not attached.
    fn detach(&mut self, id: EntityId) -> bool;

    /// Offset from the anchor, in figure units.
    fn set_translation(&mut self, id: EntityId, translation: Vec2);

    fn set_scale(&mut self, id: EntityId, scale: f32);

    fn set_opacity(&mut self, id: EntityId, opacity: f32);

    /// Rotate a named part about its pivot, in degrees.
    fn set_part_rotation(&mut self, id: EntityId, part: PartName, degrees: f32);

    fn contains(&self, id: EntityId) -> bool;

    /// Number of attached figures.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Detach everything.
    fn clear(&mut self);
}

/// Retained pose of one attached figure.
#[derive(Debug, Clone)]
pub struct PoseNode {
    pub id: EntityId,
    pub figure: Figure,
    pub layer: RenderLayer,
    pub anchor_percent: f32,
    pub translation: Vec2,
    pub scale: f32,
    pub opacity: f32,
    /// (part, degrees) for every part rotated so far.
    rotations: Vec<(PartName, f32)>,
}

impl PoseNode {
    fn new(id: EntityId, figure: Figure, anchor_percent: f32, layer: RenderLayer) -> Self {
        Self {
            id,
            figure,
            layer,
            anchor_percent,
            translation: Vec2::ZERO,
            scale: 1.0,
            opacity: 1.0,
            rotations: Vec::new(),
        }
    }

    /// Current rotation of a part in degrees (0 if never rotated).
    pub fn part_rotation(&self, part: PartName) -> f32 {
        self.rotations
            .iter()
            .find(|(name, _)| *name == part)
            .map(|(_, deg)| *deg)
            .unwrap_or(0.0)
    }

    fn rotate(&mut self, part: PartName, degrees: f32) {
        if !self.figure.part(part).is_some_and(|p| p.name.is_posable()) {
            log::warn!("{:?} has no posable part '{}'", self.id, part.as_str());
            return;
        }
        match self.rotations.iter_mut().find(|(name, _)| *name == part) {
            Some(entry) => entry.1 = degrees,
            None => self.rotations.push((part, degrees)),
        }
    }
}

/// Retained-mode pose backend using a flat Vec.
/// Sized for a handful of trees and creatures.
#[derive(Debug, Default)]
pub struct PoseGraph {
    nodes: Vec<PoseNode>,
}

impl PoseGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: EntityId) -> Option<&PoseNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn get_mut(&mut self, id: EntityId) -> Option<&mut PoseNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Iterate nodes in attach order.
    pub fn iter(&self) -> impl Iterator<Item = &PoseNode> {
        self.nodes.iter()
    }
}

impl PoseBackend for PoseGraph {
    fn attach(&mut self, id: EntityId, figure: Figure, anchor_percent: f32, layer: RenderLayer) {
        if self.contains(id) {
            log::warn!("{:?} attached twice; replacing previous figure", id);
            self.detach(id);
        }
        self.nodes.push(PoseNode::new(id, figure, anchor_percent, layer));
    }

    fn detach(&mut self, id: EntityId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        self.nodes.len() != before
    }

    fn set_translation(&mut self, id: EntityId, translation: Vec2) {
        if let Some(node) = self.get_mut(id) {
            node.translation = translation;
        }
    }

    fn set_scale(&mut self, id: EntityId, scale: f32) {
        if let Some(node) = self.get_mut(id) {
            node.scale = scale;
        }
    }

    fn set_opacity(&mut self, id: EntityId, opacity: f32) {
        if let Some(node) = self.get_mut(id) {
            node.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    fn set_part_rotation(&mut self, id: EntityId, part: PartName, degrees: f32) {
        if let Some(node) = self.get_mut(id) {
            node.rotate(part, degrees);
        }
    }

    fn contains(&self, id: EntityId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::CreatureKind;

    #[test]
    fn attach_pose_detach() {
        let mut graph = PoseGraph::new();
        let id = EntityId(4);
        graph.attach(id, Figure::creature(CreatureKind::Bird), 45.0, RenderLayer::Canopy);
        graph.set_translation(id, Vec2::new(10.0, 82.5));
        graph.set_scale(id, 0.7);
        graph.set_opacity(id, 2.0);
        graph.set_part_rotation(id, PartName::WingLeft, 12.0);

        let node = graph.get(id).unwrap();
        assert_eq!(node.translation, Vec2::new(10.0, 82.5));
        assert_eq!(node.scale, 0.7);
        assert_eq!(node.opacity, 1.0);
        assert_eq!(node.part_rotation(PartName::WingLeft), 12.0);
        assert_eq!(node.part_rotation(PartName::WingRight), 0.0);

        assert!(graph.detach(id));
        assert!(!graph.detach(id));
        assert!(graph.is_empty());
    }

    #[test]
    fn setters_on_detached_handles_are_ignored() {
        let mut graph = PoseGraph::new();
        graph.set_translation(EntityId(1), Vec2::ONE);
        graph.set_part_rotation(EntityId(1), PartName::Tail, 5.0);
        assert!(graph.is_empty());
    }

    #[test]
    fn rotating_a_missing_part_is_ignored() {
        let mut graph = PoseGraph::new();
        let id = EntityId(2);
        graph.attach(id, Figure::creature(CreatureKind::Hedgehog), 15.0, RenderLayer::Ground);
        graph.set_part_rotation(id, PartName::Tail, 30.0);
        assert_eq!(graph.get(id).unwrap().part_rotation(PartName::Tail), 0.0);

        let bird = EntityId(3);
        graph.attach(bird, Figure::creature(CreatureKind::Bird), 15.0, RenderLayer::Canopy);
        graph.set_part_rotation(bird, PartName::Detail, 30.0);
        graph.set_part_rotation(bird, PartName::Body, 30.0);
        let node = graph.get(bird).unwrap();
        assert_eq!(node.part_rotation(PartName::Detail), 0.0);
        assert_eq!(node.part_rotation(PartName::Body), 0.0);
    }

    #[test]
    fn reattaching_replaces_the_node() {
        let mut graph = PoseGraph::new();
        let id = EntityId(1);
        graph.attach(id, Figure::tree(), 15.0, RenderLayer::Trees);
        graph.attach(id, Figure::tree(), 45.0, RenderLayer::Trees);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get(id).unwrap().anchor_percent, 45.0);
    }
}
