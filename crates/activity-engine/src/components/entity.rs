use glam::Vec2;
use serde::Serialize;

use crate::api::types::EntityId;
use crate::components::layer::RenderLayer;
use crate::core::geometry::Rect;

/// Which point of the shape `Entity::pos` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    #[default]
    TopLeft,
    Center,
    /// Vertical center of the left edge (left-aligned text).
    LeftCenter,
    /// Vertical center of the right edge (right-aligned text).
    RightCenter,
}

/// Font family hint for text shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Font {
    #[default]
    Main,
    Chinese,
}

/// What an entity draws. Sizes are in local units before `Entity::scale`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    Rect { size: Vec2, radius: f32 },
    Circle { radius: f32 },
    Text { content: String, font_size: f32, weight: u16, font: Font },
    Image { src: String },
    /// Free-hand polylines, points relative to the entity position.
    Ink { strokes: Vec<Vec<Vec2>>, width: f32 },
    /// Rounded card with a centered label (draggable tiles, letter cards).
    Tile { size: Vec2, radius: f32, label: String, font_size: f32 },
    /// Named UI glyph (speaker, microphone, close) the host draws itself.
    Icon { name: String, size: f32 },
}

impl Shape {
    /// Local extent used for hit testing. Text and images report an estimate or zero.
    pub fn extent(&self) -> Vec2 {
        match self {
            Shape::Rect { size, .. } | Shape::Tile { size, .. } => *size,
            Shape::Circle { radius } => Vec2::splat(radius * 2.0),
            Shape::Icon { size, .. } => Vec2::splat(*size),
            Shape::Text { content, font_size, .. } => {
                Vec2::new(content.chars().count() as f32 * font_size * 0.6, *font_size)
            }
            Shape::Ink { strokes, .. } => Rect::enclosing(strokes.iter().flatten().copied())
                .map(|r| r.size())
                .unwrap_or(Vec2::ZERO),
            Shape::Image { .. } => Vec2::ZERO,
        }
    }
}

/// Fill/stroke styling. Colors are CSS color strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f32,
    pub dashed: bool,
}

impl Style {
    pub fn filled(fill: &str) -> Self {
        Self {
            fill: Some(fill.to_string()),
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, stroke: &str, width: f32) -> Self {
        self.stroke = Some(stroke.to_string());
        self.stroke_width = width;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

/// Fat Entity — one drawable canvas object with optional interactivity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    /// Name used to look entities up ("writing-pad", "mic-btn", ...).
    pub tag: String,
    pub visible: bool,
    pub pos: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
    pub scale: Vec2,
    pub alpha: f32,
    pub anchor: Anchor,
    pub layer: RenderLayer,
    /// Whether pointer input may hit this entity.
    pub interactive: bool,
    pub shape: Shape,
    pub style: Style,
}

impl Entity {
    /// Create a new entity with the given ID and shape at the origin.
    pub fn new(id: EntityId, shape: Shape) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            alpha: 1.0,
            anchor: Anchor::TopLeft,
            layer: RenderLayer::default(),
            interactive: false,
            shape,
            style: Style::default(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// World-space bounding box (rotation ignored), or `None` for shapes without extent.
    pub fn bounds(&self) -> Option<Rect> {
        let size = self.shape.extent() * self.scale.abs();
        if size.x <= 0.0 || size.y <= 0.0 {
            return None;
        }
        let min = match self.anchor {
            Anchor::TopLeft => self.pos,
            Anchor::Center => self.pos - size / 2.0,
            Anchor::LeftCenter => Vec2::new(self.pos.x, self.pos.y - size.y / 2.0),
            Anchor::RightCenter => Vec2::new(self.pos.x - size.x, self.pos.y - size.y / 2.0),
        };
        Some(Rect::new(min.x, min.y, size.x, size.y))
    }

    /// Hit test for pointer input. Hidden entities never hit.
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.visible && self.bounds().is_some_and(|b| b.contains(p))
    }
}
