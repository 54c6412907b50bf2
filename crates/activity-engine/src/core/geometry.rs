//! Rectangles and the hit-testing rules used by drawing and drag input.
//!
//! All coordinates are canvas pixels, y pointing down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle described by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of `size` centered on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test (edges count as inside).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// The rectangle scaled by `factor` about its own center.
    pub fn expanded(&self, factor: f32) -> Rect {
        let w = self.width * factor;
        let h = self.height * factor;
        Rect::new(
            self.x - (w - self.width) / 2.0,
            self.y - (h - self.height) / 2.0,
            w,
            h,
        )
    }

    /// Smallest rectangle containing every point, or `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = Vec2>) -> Option<Rect> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

/// True iff `point` lies inside `rect` grown by `factor` about the rect's center.
/// Only the hit-test tolerance changes; the rendered target keeps its size.
pub fn point_in_expanded_rect(point: Vec2, rect: Rect, factor: f32) -> bool {
    rect.expanded(factor).contains(point)
}

/// True iff `a` and `b` are closer than `tolerance` on both axes (Chebyshev distance).
pub fn near_point(a: Vec2, b: Vec2, tolerance: f32) -> bool {
    (a.x - b.x).abs() < tolerance && (a.y - b.y).abs() < tolerance
}

/// Author-selectable hit box tolerance for direct-input stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExpansionFactor {
    /// 1.0: the target box exactly.
    Exact,
    /// 1.2
    #[default]
    Relaxed,
    /// 1.5
    Loose,
}

impl ExpansionFactor {
    pub const ALL: [ExpansionFactor; 3] = [Self::Exact, Self::Relaxed, Self::Loose];

    pub fn value(self) -> f32 {
        match self {
            Self::Exact => 1.0,
            Self::Relaxed => 1.2,
            Self::Loose => 1.5,
        }
    }

    /// Map a select-box value back to a factor. Unknown values are rejected.
    pub fn from_value(value: f32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| (f.value() - value).abs() < 1e-3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expanded_rect_stays_centered() {
        let r = Rect::new(100.0, 100.0, 100.0, 50.0);
        let e = r.expanded(1.2);
        assert!((e.center() - r.center()).length() < 1e-4);
        assert!((e.width - 120.0).abs() < 1e-4);
        assert!((e.height - 60.0).abs() < 1e-4);
        assert!((e.x - 90.0).abs() < 1e-4);
    }

    #[test]
    fn expansion_widens_hit_area_only() {
        let r = Rect::new(440.0, 340.0, 140.0, 120.0);
        let just_outside = Vec2::new(440.0 - 5.0, 400.0);
        assert!(!point_in_expanded_rect(just_outside, r, 1.0));
        assert!(point_in_expanded_rect(just_outside, r, 1.2));
        // 1.2 grows 14px per side horizontally, 1.5 grows 35px
        let further = Vec2::new(440.0 - 20.0, 400.0);
        assert!(!point_in_expanded_rect(further, r, 1.2));
        assert!(point_in_expanded_rect(further, r, 1.5));
    }

    #[test]
    fn edges_are_inside() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(point_in_expanded_rect(Vec2::new(10.0, 10.0), r, 1.0));
        assert!(point_in_expanded_rect(Vec2::new(0.0, 0.0), r, 1.0));
    }

    #[test]
    fn near_point_is_strict_per_axis() {
        let t = Vec2::new(100.0, 100.0);
        assert!(near_point(Vec2::new(169.0, 169.0), t, 70.0));
        assert!(!near_point(Vec2::new(170.0, 100.0), t, 70.0));
        assert!(!near_point(Vec2::new(100.0, 30.0), t, 70.0));
    }

    #[test]
    fn enclosing_points() {
        let r = Rect::enclosing([Vec2::new(5.0, 8.0), Vec2::new(1.0, 2.0), Vec2::new(3.0, 10.0)]).unwrap();
        assert_eq!(r, Rect::new(1.0, 2.0, 4.0, 8.0));
        assert!(Rect::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn expansion_factor_lookup() {
        assert_eq!(ExpansionFactor::from_value(1.5), Some(ExpansionFactor::Loose));
        assert_eq!(ExpansionFactor::from_value(1.3), None);
        assert_eq!(ExpansionFactor::default().value(), 1.2);
    }
}
