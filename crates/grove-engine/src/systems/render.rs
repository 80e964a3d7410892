use crate::renderer::instance::{RenderBuffer, ShapeInstance};
use crate::renderer::pose::{PoseGraph, PoseNode};

/// Build the render buffer from the retained pose graph.
/// Nodes are emitted back-to-front by layer; within a layer, in attach order.
/// Invisible nodes are still emitted so the host can fade them.
pub fn build_render_buffer(graph: &PoseGraph, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut nodes: Vec<&PoseNode> = graph.iter().collect();
    // Stable sort keeps attach order inside each layer
    nodes.sort_by_key(|n| n.layer);

    'nodes: for node in nodes {
        for part in &node.figure.parts {
            let rotation_deg = node.part_rotation(part.name);
            for shape in &part.shapes {
                let color = shape.paint.color();
                let instance = ShapeInstance {
                    anchor_percent: node.anchor_percent,
                    tx: node.translation.x,
                    ty: node.translation.y,
                    scale: node.scale,
                    opacity: node.opacity,
                    rotation_deg,
                    pivot_x: part.pivot.x,
                    pivot_y: part.pivot.y,
                    primitive: shape.primitive.code() as f32,
                    layer: node.layer.as_u8() as f32,
                    params: shape.primitive.params(),
                    r: color.r,
                    g: color.g,
                    b: color.b,
                    stroke_width: shape.paint.stroke_width(),
                };
                if !buffer.push(instance) {
                    break 'nodes;
                }
            }
        }
    }

    if buffer.overflow > 0 {
        log::warn!(
            "render buffer full ({} instances); dropped shapes",
            buffer.max_instances()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::layer::RenderLayer;
    use crate::api::types::{CreatureKind, EntityId};
    use crate::renderer::geometry::{Figure, PartName};
    use crate::renderer::pose::PoseBackend;
    use glam::Vec2;

    #[test]
    fn build_buffer_orders_by_layer() {
        let mut graph = PoseGraph::new();
        graph.attach(EntityId(1), Figure::creature(CreatureKind::Bird), 15.0, RenderLayer::Canopy);
        graph.attach(EntityId(2), Figure::tree(), 15.0, RenderLayer::Trees);
        graph.attach(EntityId(3), Figure::creature(CreatureKind::Hedgehog), 15.0, RenderLayer::Ground);

        let mut buffer = RenderBuffer::new();
        build_render_buffer(&graph, &mut buffer);

        // tree 5, hedgehog 9, bird 6
        assert_eq!(buffer.instances.len(), 20);
        let layers: Vec<f32> = buffer.instances.iter().map(|i| i.layer).collect();
        let mut sorted = layers.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(layers, sorted);
        assert_eq!(layers.first(), Some(&(RenderLayer::Trees.as_u8() as f32)));
        assert_eq!(layers.last(), Some(&(RenderLayer::Canopy.as_u8() as f32)));
    }

    #[test]
    fn part_rotation_reaches_its_shapes_only() {
        let mut graph = PoseGraph::new();
        let id = EntityId(1);
        graph.attach(id, Figure::creature(CreatureKind::Bird), 45.0, RenderLayer::Canopy);
        graph.set_translation(id, Vec2::new(-50.0, 20.0));
        graph.set_part_rotation(id, PartName::WingLeft, 15.0);
        graph.set_part_rotation(id, PartName::WingRight, -15.0);

        let mut buffer = RenderBuffer::new();
        build_render_buffer(&graph, &mut buffer);

        // body (3 shapes), left wing, right wing, then the eye on top
        assert_eq!(buffer.instance_count(), 6);
        let rotations: Vec<f32> = buffer.instances.iter().map(|i| i.rotation_deg).collect();
        assert_eq!(rotations, vec![0.0, 0.0, 0.0, 15.0, -15.0, 0.0]);
        assert!(buffer.instances.iter().all(|i| i.tx == -50.0 && i.anchor_percent == 45.0));
        assert_eq!(buffer.instances[3].pivot_x, 10.0);
    }

    #[test]
    fn full_buffer_truncates() {
        let mut graph = PoseGraph::new();
        graph.attach(EntityId(1), Figure::tree(), 15.0, RenderLayer::Trees);
        let mut buffer = RenderBuffer::with_capacity(2);
        build_render_buffer(&graph, &mut buffer);
        assert_eq!(buffer.instance_count(), 2);
        assert_eq!(buffer.overflow, 1);
    }
}
