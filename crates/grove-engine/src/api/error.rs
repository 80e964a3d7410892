use thiserror::Error;

/// Errors raised while building a scene from its configuration.
///
/// Runtime operations (`start`, `clear`, `tick`) never fail; only the
/// configuration can be rejected.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("viewport width must be positive and finite, got {0}")]
    InvalidViewport(f32),
    #[error("tree anchor {0} is outside 0..=100 percent")]
    AnchorOutOfRange(f32),
    #[error("hedgehog chance {0} is outside 0..=1")]
    InvalidChance(f32),
    #[error("scene config has no tree anchors")]
    NoTrees,
}
