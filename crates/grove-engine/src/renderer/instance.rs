use bytemuck::{Pod, Zeroable};

/// Per-shape render data read by the host page.
/// Must match the JavaScript protocol: 20 floats = 80 bytes stride.
///
/// Geometry stays in figure-local units; the host applies, in order:
/// part rotation about the pivot, figure scale, figure translation, and
/// finally the horizontal anchor (percent of the container width).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    /// Horizontal anchor in percent of the container width.
    pub anchor_percent: f32,
    /// Figure translation from the anchor.
    pub tx: f32,
    pub ty: f32,
    /// Uniform figure scale.
    pub scale: f32,
    /// Figure opacity (0.0 = invisible, 1.0 = opaque).
    pub opacity: f32,
    /// Part rotation in degrees about (pivot_x, pivot_y).
    pub rotation_deg: f32,
    pub pivot_x: f32,
    pub pivot_y: f32,
    /// Primitive wire code (see `Primitive::code`).
    pub primitive: f32,
    /// Render layer (see `RenderLayer::as_u8`).
    pub layer: f32,
    /// Primitive parameters (see `Primitive::params`).
    pub params: [f32; 6],
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Stroke width; zero means filled.
    pub stroke_width: f32,
}

impl ShapeInstance {
    pub const FLOATS: usize = 20;
}

/// Render buffer containing every shape instance for one frame,
/// ordered back-to-front by layer.
pub struct RenderBuffer {
    pub instances: Vec<ShapeInstance>,
    max_instances: usize,
    /// Shapes dropped this frame because the buffer was full.
    pub overflow: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(max_instances: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_instances),
            max_instances,
            overflow: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.overflow = 0;
    }

    /// Push an instance. Returns false (and counts the overflow) when full.
    pub fn push(&mut self, instance: ShapeInstance) -> bool {
        if self.instances.len() >= self.max_instances {
            self.overflow += 1;
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn max_instances(&self) -> usize {
        self.max_instances
    }

    /// Raw pointer to instance data for zero-copy reads from wasm memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
