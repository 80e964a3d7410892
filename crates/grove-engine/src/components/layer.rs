/// Render layer: controls draw order for pose nodes.
///
/// Layers are drawn back-to-front: trees first, creatures in the canopy last.
/// Hedgehogs forage on the ground between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Trees = 0,
    Ground = 1,
    #[default]
    Canopy = 2,
}

impl RenderLayer {
    /// Convert to u8 for protocol serialization.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_back_to_front() {
        assert!(RenderLayer::Trees < RenderLayer::Ground);
        assert!(RenderLayer::Ground < RenderLayer::Canopy);
    }

    #[test]
    fn wire_codes_follow_draw_order() {
        assert_eq!(RenderLayer::Trees.as_u8(), 0);
        assert_eq!(RenderLayer::Ground.as_u8(), 1);
        assert_eq!(RenderLayer::Canopy.as_u8(), 2);
    }
}
