/// Flat shared-buffer layout read by the host page.
/// Must stay in sync with the page's `protocol.js`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Instances: max_instances × 20 floats]
/// ```
///
/// Capacities are written once into the header at init; the page reads
/// them back to find the instance section.

use crate::api::config::SceneConfig;
use crate::renderer::instance::ShapeInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_INSTANCE_FLOATS: usize = 4;
pub const HEADER_VIEWPORT_WIDTH: usize = 5;
pub const HEADER_PENDING_CALLBACKS: usize = 6;
pub const HEADER_ACTIVE: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per shape instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = ShapeInstance::FLOATS;

/// Buffer layout computed from the scene's capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,

    /// Size of the instance section in floats.
    pub instance_data_floats: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let instance_data_offset = HEADER_FLOATS;
        let buffer_total_floats = instance_data_offset + instance_data_floats;

        Self {
            max_instances,
            instance_data_floats,
            instance_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.max_instances)
    }

    /// Fresh header with the static fields filled in.
    pub fn header(&self, viewport_width: f32) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_INSTANCE_FLOATS] = INSTANCE_FLOATS as f32;
        header[HEADER_VIEWPORT_WIDTH] = viewport_width;
        header
    }
}
