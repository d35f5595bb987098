use std::collections::VecDeque;

use egui::Pos2;

/// Bounded trace history, newest point at the front.
#[derive(Debug, Clone, Default)]
pub struct PointHistory {
    points: VecDeque<Pos2>,
}

impl PointHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_newest(&mut self, point: Pos2) {
        self.points.push_front(point);
    }

    /// Drop the oldest points until at most `max_points` remain.
    pub fn evict_to(&mut self, max_points: usize) {
        self.points.truncate(max_points);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn newest(&self) -> Option<Pos2> {
        self.points.front().copied()
    }

    pub fn get(&self, i: usize) -> Option<Pos2> {
        self.points.get(i).copied()
    }

    /// Newest-to-oldest iteration.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Pos2> + '_ {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
