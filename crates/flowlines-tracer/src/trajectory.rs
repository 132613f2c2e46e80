//! Append-only particle trajectories.

use flowlines_core::Vec2;

/// The ordered positions of one particle, starting with its seed.
///
/// A trajectory from an N-step run holds N + 1 positions. Positions are
/// only ever appended.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    points: Vec<Vec2>,
}

impl Trajectory {
    pub(crate) fn with_capacity(start: Vec2, capacity: usize) -> Self {
        let mut points = Vec::with_capacity(capacity.clamp(1, crate::MAX_PREALLOC));
        points.push(start);
        Self { points }
    }

    pub(crate) fn push(&mut self, p: Vec2) {
        self.points.push(p);
    }

    /// All recorded positions in order.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Number of recorded positions.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a trajectory holds at least its seed.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The seed position.
    pub fn start(&self) -> Vec2 {
        self.points[0]
    }

    /// The last recorded position.
    pub fn end(&self) -> Vec2 {
        self.points[self.points.len() - 1]
    }

    /// Iterate over positions.
    pub fn iter(&self) -> std::slice::Iter<'_, Vec2> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Vec2;
    type IntoIter = std::slice::Iter<'a, Vec2>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_seed() {
        let mut t = Trajectory::with_capacity(Vec2::new(1.0, 2.0), 0);
        assert_eq!(t.len(), 1);
        assert_eq!(t.start(), t.end());
        t.push(Vec2::new(3.0, 4.0));
        assert_eq!(t.start(), Vec2::new(1.0, 2.0));
        assert_eq!(t.end(), Vec2::new(3.0, 4.0));
        assert_eq!(t.iter().count(), 2);
    }

    #[test]
    fn reservation_is_capped() {
        let t = Trajectory::with_capacity(Vec2::ZERO, usize::MAX);
        assert!(t.points.capacity() <= crate::MAX_PREALLOC);
        assert_eq!(t.len(), 1);
    }
}
