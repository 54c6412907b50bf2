//! Free-hand stroke capture for writing stages.

use glam::Vec2;

/// Collects the gesture in progress and the strokes waiting to be committed.
///
/// A gesture is only tracked when the caller accepted its starting point;
/// everything else never reaches `pending`.
#[derive(Debug, Default, Clone)]
pub struct StrokeAccumulator {
    current: Option<Vec<Vec2>>,
    pending: Vec<Vec<Vec2>>,
}

impl StrokeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an accepted gesture at `p`. Replaces an unfinished one.
    pub fn begin(&mut self, p: Vec2) {
        self.current = Some(vec![p]);
    }

    /// Extend the gesture in progress. Ignored when none is active.
    pub fn extend(&mut self, p: Vec2) {
        if let Some(points) = self.current.as_mut() {
            if points.last() != Some(&p) {
                points.push(p);
            }
        }
    }

    /// Finish the gesture. Returns true if a stroke was appended to `pending`.
    pub fn finish(&mut self) -> bool {
        match self.current.take() {
            Some(points) => {
                self.pending.push(points);
                true
            }
            None => false,
        }
    }

    /// Abandon the gesture in progress without keeping it.
    pub fn cancel_gesture(&mut self) {
        self.current = None;
    }

    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    /// The unfinished gesture, for live rendering.
    pub fn current(&self) -> Option<&[Vec2]> {
        self.current.as_deref()
    }

    pub fn pending(&self) -> &[Vec<Vec2>] {
        &self.pending
    }

    /// Hand the pending strokes to a commit, leaving the accumulator empty.
    pub fn take(&mut self) -> Vec<Vec<Vec2>> {
        std::mem::take(&mut self.pending)
    }

    /// Drop everything, including a gesture in progress.
    pub fn clear(&mut self) {
        self.current = None;
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_gestures_accumulate() {
        let mut acc = StrokeAccumulator::new();
        acc.begin(Vec2::new(0.0, 0.0));
        acc.extend(Vec2::new(10.0, 0.0));
        assert!(acc.finish());
        acc.begin(Vec2::new(5.0, -5.0));
        acc.extend(Vec2::new(5.0, 5.0));
        assert!(acc.finish());
        assert_eq!(acc.len(), 2);
        assert_eq!(acc.pending()[0], vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]);
    }

    #[test]
    fn moves_without_a_gesture_are_ignored() {
        let mut acc = StrokeAccumulator::new();
        acc.extend(Vec2::new(1.0, 1.0));
        assert!(!acc.finish());
        assert!(acc.is_empty());
    }

    #[test]
    fn duplicate_points_are_collapsed() {
        let mut acc = StrokeAccumulator::new();
        acc.begin(Vec2::ONE);
        acc.extend(Vec2::ONE);
        acc.extend(Vec2::ONE);
        assert_eq!(acc.current().unwrap().len(), 1);
    }

    #[test]
    fn take_empties_pending() {
        let mut acc = StrokeAccumulator::new();
        acc.begin(Vec2::ZERO);
        acc.finish();
        assert_eq!(acc.take().len(), 1);
        assert!(acc.is_empty());
    }
}
