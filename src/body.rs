use std::collections::hash_map::Entry;
use std::collections::{vec_deque, HashMap, VecDeque};

use crate::config::GridSize;
use crate::geometry::{clamp, Point};
use crate::input::Direction;

/// Snake segments, head first, with an occupancy index kept in lockstep.
///
/// The index counts occurrences rather than storing a plain set, so the
/// transient head-on-tail overlap during tail-following never drops a cell
/// that is still occupied.
#[derive(Debug, Clone)]
pub struct Body {
    segments: VecDeque<Point>,
    occupied: HashMap<Point, u32>,
}

impl Body {
    /// Creates a straight body of `length` cells with the head at `head`,
    /// trailing away from `direction`.
    #[must_use]
    pub fn straight(head: Point, direction: Direction, length: usize) -> Self {
        let step = direction.opposite().delta();
        let mut cell = head;
        let mut segments = Vec::with_capacity(length);
        for _ in 0..length.max(1) {
            segments.push(cell);
            cell = Point::new(cell.row + step.row, cell.col + step.col);
        }

        Self::indexed(VecDeque::from(segments))
    }

    /// Creates a body from explicit segments (first is head); `None` when empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Point>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self::indexed(VecDeque::from(segments)))
    }

    fn indexed(segments: VecDeque<Point>) -> Self {
        let mut body = Self {
            segments,
            occupied: HashMap::new(),
        };
        body.rebuild_index();
        body
    }

    pub fn push_head(&mut self, point: Point) {
        self.segments.push_front(point);
        *self.occupied.entry(point).or_insert(0) += 1;
    }

    /// Removes and returns the tail; the last segment is never removed.
    pub fn pop_tail(&mut self) -> Option<Point> {
        if self.segments.len() <= 1 {
            return None;
        }

        let tail = self.segments.pop_back()?;
        if let Entry::Occupied(mut entry) = self.occupied.entry(tail) {
            *entry.get_mut() -= 1;
            if *entry.get() == 0 {
                entry.remove();
            }
        }
        Some(tail)
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.occupied.contains_key(&point)
    }

    #[must_use]
    pub fn head(&self) -> Point {
        self.segments[0]
    }

    #[must_use]
    pub fn tail(&self) -> Point {
        self.segments[self.segments.len() - 1]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over segments from head to tail.
    pub fn segments(&self) -> vec_deque::Iter<'_, Point> {
        self.segments.iter()
    }

    /// Pulls the head onto the interior of `bounds` and re-derives the index.
    /// Other segments are left where they are.
    pub fn clamp_head(&mut self, bounds: GridSize) {
        let head = self.segments[0];
        self.segments[0] = Point::new(
            clamp(head.row, 1, bounds.max_row()),
            clamp(head.col, 1, bounds.max_col()),
        );
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.occupied.clear();
        for segment in &self.segments {
            *self.occupied.entry(*segment).or_insert(0) += 1;
        }
    }

    #[cfg(test)]
    pub(crate) fn index_matches_segments(&self) -> bool {
        let mut counts: HashMap<Point, u32> = HashMap::new();
        for segment in &self.segments {
            *counts.entry(*segment).or_insert(0) += 1;
        }
        counts == self.occupied
    }
}
