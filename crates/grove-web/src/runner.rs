use grove_engine::bridge::protocol::{
    HEADER_ACTIVE, HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_INSTANCE_COUNT,
    HEADER_PENDING_CALLBACKS,
};
use grove_engine::{ProtocolLayout, RenderBuffer, Scene, SceneConfig, SceneError, ShapeInstance};

/// Pick the default scene width: the window's inner width when it is a
/// usable number, otherwise the container's client width.
pub fn exit_width(window_inner: Option<f64>, container_client: i32) -> f32 {
    match window_inner {
        Some(w) if w.is_finite() && w > 0.0 => w as f32,
        _ => container_client.max(0) as f32,
    }
}

/// Parse the host's JSON config. An empty string means all defaults, and
/// a config without `viewport_width` takes `default_width`.
pub fn load_config(json: &str, default_width: f32) -> Result<SceneConfig, SceneError> {
    let json = if json.trim().is_empty() { "{}" } else { json };
    let raw: serde_json::Value = serde_json::from_str(json)?;
    let explicit_width = raw.get("viewport_width").is_some();
    let mut config: SceneConfig = serde_json::from_value(raw)?;
    if !explicit_width && default_width > 0.0 {
        config = config.with_viewport_width(default_width);
    }
    config.validate()?;
    Ok(config)
}

/// Owns the scene and the frame buffer the page reads from.
///
/// wasm-bindgen cannot export the generic `Scene` directly, so the crate
/// root keeps one runner in a `thread_local!` and forwards free functions.
pub struct SceneRunner {
    scene: Scene,
    render_buffer: RenderBuffer,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u32,
}

impl SceneRunner {
    pub fn new(config: SceneConfig, seed: u64) -> Result<Self, SceneError> {
        let layout = ProtocolLayout::from_config(&config);
        let header = layout.header(config.viewport_width);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances);
        let scene = Scene::with_seed(config, seed)?;

        Ok(Self {
            scene,
            render_buffer,
            layout,
            header,
            frame: 0,
        })
    }

    pub fn start(&mut self) {
        self.scene.start();
        self.rebuild();
    }

    pub fn clear(&mut self) {
        self.scene.clear();
        self.rebuild();
    }

    /// Run one host frame: advance the scene, then rebuild the buffer.
    pub fn tick(&mut self, dt_ms: f32) {
        self.scene.tick(dt_ms);
        self.frame = self.frame.wrapping_add(1);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.scene.render(&mut self.render_buffer);
        self.header[HEADER_FRAME_COUNTER] = self.frame as f32;
        self.header[HEADER_INSTANCE_COUNT] = self.render_buffer.instance_count() as f32;
        self.header[HEADER_PENDING_CALLBACKS] = self.scene.pending_callbacks() as f32;
        self.header[HEADER_ACTIVE] = if self.scene.is_active() { 1.0 } else { 0.0 };
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn instance_floats(&self) -> u32 {
        ShapeInstance::FLOATS as u32
    }

    pub fn viewport_width(&self) -> f32 {
        self.scene.config().viewport_width
    }

    pub fn pending_callbacks(&self) -> u32 {
        self.scene.pending_callbacks() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_engine::PoseBackend;

    #[test]
    fn window_width_beats_a_narrow_container() {
        assert_eq!(exit_width(Some(1280.0), 300), 1280.0);
        assert_eq!(exit_width(None, 300), 300.0);
        assert_eq!(exit_width(Some(f64::NAN), 300), 300.0);
        assert_eq!(exit_width(Some(0.0), -5), 0.0);

        let config = load_config("", exit_width(Some(1280.0), 300)).unwrap();
        assert_eq!(config.viewport_width, 1280.0);
    }

    #[test]
    fn empty_json_takes_default_width() {
        let config = load_config("", 960.0).unwrap();
        assert_eq!(config.viewport_width, 960.0);
        assert_eq!(config.tree_anchors, vec![15.0, 45.0, 75.0]);
    }

    #[test]
    fn explicit_width_wins() {
        let config = load_config(r#"{ "viewport_width": 320 }"#, 960.0).unwrap();
        assert_eq!(config.viewport_width, 320.0);
    }

    #[test]
    fn zero_default_width_keeps_config_default() {
        let config = load_config("{}", 0.0).unwrap();
        assert_eq!(config.viewport_width, SceneConfig::default().viewport_width);
    }

    #[test]
    fn bad_config_is_rejected() {
        assert!(matches!(load_config("{ nope", 800.0), Err(SceneError::Config(_))));
        assert!(matches!(
            load_config(r#"{ "tree_anchors": [] }"#, 800.0),
            Err(SceneError::NoTrees)
        ));
    }

    #[test]
    fn start_tick_clear_cycle() {
        let mut runner = SceneRunner::new(SceneConfig::default(), 9).unwrap();
        assert_eq!(runner.instance_count(), 0);

        runner.start();
        let shapes = runner.instance_count();
        assert!(shapes > 0);
        assert!(runner.pending_callbacks() > 0);

        runner.tick(16.0);
        assert_eq!(runner.instance_count(), shapes);

        runner.clear();
        assert_eq!(runner.instance_count(), 0);
        assert_eq!(runner.pending_callbacks(), 0);
        assert_eq!(runner.scene().poses().len(), 0);
    }

    #[test]
    fn accessors_report_layout() {
        let runner = SceneRunner::new(SceneConfig::default().with_viewport_width(640.0), 1).unwrap();
        assert_eq!(runner.max_instances(), 512);
        assert_eq!(runner.instance_floats(), 20);
        assert_eq!(runner.viewport_width(), 640.0);
        assert_eq!(runner.layout().instance_data_offset, HEADER_FLOATS);
    }
}
