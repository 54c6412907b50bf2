//! Drop resolution for draggable tiles.

use glam::Vec2;

use crate::core::geometry::near_point;

/// A place a tile can be dropped on.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget<H> {
    pub center: Vec2,
    /// Value a tile must carry to be accepted here.
    pub expected: String,
    /// Placeholder visual hidden or kept once matched.
    pub handle: H,
}

/// How a release was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Snap onto the target at this index.
    Snap(usize),
    /// Within reach of the target at this index but the value differs.
    Mismatch(usize),
    /// Nothing within reach: spring back to the origin.
    Return,
}

/// Resolve a tile released at `pos` carrying `value`.
///
/// Targets are scanned in declaration order and the first one within `tolerance`
/// decides the outcome, even if a later target is closer. With `check_identity`
/// off any target within reach accepts the tile.
pub fn resolve_drop<H>(
    pos: Vec2,
    value: &str,
    targets: &[DropTarget<H>],
    tolerance: f32,
    check_identity: bool,
) -> DropOutcome {
    let Some(index) = targets.iter().position(|t| near_point(pos, t.center, tolerance)) else {
        return DropOutcome::Return;
    };
    if check_identity && targets[index].expected != value {
        DropOutcome::Mismatch(index)
    } else {
        DropOutcome::Snap(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(x: f32, y: f32, expected: &str) -> DropTarget<()> {
        DropTarget {
            center: Vec2::new(x, y),
            expected: expected.to_string(),
            handle: (),
        }
    }

    #[test]
    fn match_requires_strict_tolerance() {
        let targets = [target(100.0, 100.0, "a")];
        assert_eq!(resolve_drop(Vec2::new(169.0, 100.0), "a", &targets, 70.0, false), DropOutcome::Snap(0));
        assert_eq!(resolve_drop(Vec2::new(170.0, 100.0), "a", &targets, 70.0, false), DropOutcome::Return);
    }

    #[test]
    fn first_declared_target_wins_ties() {
        let targets = [target(100.0, 100.0, "a"), target(150.0, 100.0, "b")];
        // Closer to the second target, but the first is still within reach.
        assert_eq!(resolve_drop(Vec2::new(145.0, 100.0), "b", &targets, 70.0, false), DropOutcome::Snap(0));
    }

    #[test]
    fn identity_check_reports_mismatch_without_looking_further() {
        let targets = [target(100.0, 100.0, "a"), target(150.0, 100.0, "b")];
        assert_eq!(resolve_drop(Vec2::new(145.0, 100.0), "b", &targets, 70.0, true), DropOutcome::Mismatch(0));
        assert_eq!(resolve_drop(Vec2::new(100.0, 100.0), "a", &targets, 70.0, true), DropOutcome::Snap(0));
    }

    #[test]
    fn no_targets_returns_home() {
        let targets: [DropTarget<()>; 0] = [];
        assert_eq!(resolve_drop(Vec2::ZERO, "a", &targets, 70.0, true), DropOutcome::Return);
    }
}
