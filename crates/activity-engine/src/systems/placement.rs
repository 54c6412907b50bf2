//! Glyph placement: fitting merged strokes into a slot.

use glam::Vec2;

use crate::config::GLYPH_FIT;
use crate::core::geometry::Rect;

/// Uniform scale so a `glyph`-sized shape fills at most `GLYPH_FIT` of `target` on both axes.
/// Returns `None` for a degenerate glyph.
pub fn fit_scale(target: Vec2, glyph: Vec2) -> Option<f32> {
    if glyph.x <= 0.0 && glyph.y <= 0.0 {
        return None;
    }
    let sx = if glyph.x > 0.0 { target.x * GLYPH_FIT / glyph.x } else { f32::INFINITY };
    let sy = if glyph.y > 0.0 { target.y * GLYPH_FIT / glyph.y } else { f32::INFINITY };
    Some(sx.min(sy))
}

/// Strokes merged into one glyph, re-centered on their bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Polylines relative to `center`.
    pub strokes: Vec<Vec<Vec2>>,
    /// Center of the bounding box in canvas coordinates.
    pub center: Vec2,
    pub size: Vec2,
}

impl Glyph {
    /// Merge strokes drawn in canvas coordinates. `None` if there is nothing to merge.
    pub fn merge(strokes: &[Vec<Vec2>]) -> Option<Self> {
        let bounds = Rect::enclosing(strokes.iter().flatten().copied())?;
        let center = bounds.center();
        Some(Glyph {
            strokes: strokes
                .iter()
                .map(|s| s.iter().map(|p| *p - center).collect())
                .collect(),
            center,
            size: bounds.size(),
        })
    }
}
