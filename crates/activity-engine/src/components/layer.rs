use serde::Serialize;

/// Render layer — controls draw order for entities.
///
/// Layers are drawn back-to-front: Background first, Overlay last.
/// Within a layer, entities keep their spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum RenderLayer {
    Background = 0,
    /// Active-zone highlight, drawn under everything interactive.
    Guides = 1,
    /// Writing pad, target boxes, drop slots, labels.
    #[default]
    Targets = 2,
    /// Hand-drawn strokes and committed glyphs.
    Ink = 3,
    /// Draggable tiles and buttons.
    Tiles = 4,
    /// Particles and character sprites.
    Effects = 5,
    /// Authoring overlay.
    Overlay = 6,
}

impl RenderLayer {
    /// Total number of render layers.
    pub const COUNT: usize = 7;

    /// Convert from a u8 value to a RenderLayer.
    /// Returns None if the value is out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Background),
            1 => Some(Self::Guides),
            2 => Some(Self::Targets),
            3 => Some(Self::Ink),
            4 => Some(Self::Tiles),
            5 => Some(Self::Effects),
            6 => Some(Self::Overlay),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_targets() {
        assert_eq!(RenderLayer::default(), RenderLayer::Targets);
    }

    #[test]
    fn ordering_is_back_to_front() {
        assert!(RenderLayer::Background < RenderLayer::Guides);
        assert!(RenderLayer::Guides < RenderLayer::Targets);
        assert!(RenderLayer::Targets < RenderLayer::Ink);
        assert!(RenderLayer::Ink < RenderLayer::Tiles);
        assert!(RenderLayer::Tiles < RenderLayer::Effects);
        assert!(RenderLayer::Effects < RenderLayer::Overlay);
    }

    #[test]
    fn from_u8_rejects_out_of_range() {
        assert_eq!(RenderLayer::from_u8(3), Some(RenderLayer::Ink));
        assert!(RenderLayer::from_u8(RenderLayer::COUNT as u8).is_none());
    }
}
