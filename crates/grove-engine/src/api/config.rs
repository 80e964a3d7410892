use serde::{Deserialize, Serialize};

use crate::api::error::SceneError;

/// Configuration for a woodland scene, provided by the host.
/// Every field has a default, so `{}` is a valid JSON config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Width of the host container in scene units (birds leave past it).
    pub viewport_width: f32,
    /// Horizontal tree anchors, in percent of the scene width.
    pub tree_anchors: Vec<f32>,
    /// Probability that a tree gets a hedgehog (default: 0.5).
    pub hedgehog_chance: f32,
    /// Maximum number of shape instances in the render buffer (default: 512).
    pub max_instances: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            viewport_width: 400.0,
            tree_anchors: vec![15.0, 45.0, 75.0],
            hedgehog_chance: 0.5,
            max_instances: 512,
        }
    }
}

impl SceneConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_viewport_width(mut self, width: f32) -> Self {
        self.viewport_width = width;
        self
    }

    /// Reject values the scene cannot be laid out with.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !self.viewport_width.is_finite() || self.viewport_width <= 0.0 {
            return Err(SceneError::InvalidViewport(self.viewport_width));
        }
        if self.tree_anchors.is_empty() {
            return Err(SceneError::NoTrees);
        }
        if let Some(&bad) = self
            .tree_anchors
            .iter()
            .find(|a| !(0.0..=100.0).contains(*a))
        {
            return Err(SceneError::AnchorOutOfRange(bad));
        }
        if !(0.0..=1.0).contains(&self.hedgehog_chance) {
            return Err(SceneError::InvalidChance(self.hedgehog_chance));
        }
        Ok(())
    }
}
