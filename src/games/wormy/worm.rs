//! A worm: an ordered run of segments, head first.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Coord, Direction};

/// Worm body backed by a persistent vector so snapshots clone in O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worm {
    body: Vector<Coord>,
    /// Direction of the last move.
    direction: Direction,
}

impl Worm {
    /// A straight worm of `length` segments with its head at `head`,
    /// trailing away from `direction`.
    #[must_use]
    pub fn new(head: Coord, length: usize, direction: Direction) -> Self {
        let back = direction.opposite();
        let mut body = Vector::new();
        let mut segment = head;
        for _ in 0..length {
            body.push_back(segment);
            segment = segment.step(back);
        }
        Self { body, direction }
    }

    #[must_use]
    pub fn head(&self) -> Option<Coord> {
        self.body.front().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn body(&self) -> &Vector<Coord> {
        &self.body
    }

    /// Move the head to `new_head`; the tail follows unless `grow`.
    pub fn advance(&mut self, new_head: Coord, direction: Direction, grow: bool) {
        self.direction = direction;
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Add one segment at the tail. It unfolds on the next move.
    pub fn grow(&mut self) {
        if let Some(tail) = self.body.back().copied() {
            self.body.push_back(tail);
        }
    }

    /// Drop the tail segment.
    pub fn shrink(&mut self) -> Option<Coord> {
        self.body.pop_back()
    }

    #[must_use]
    pub fn occupies(&self, at: Coord) -> bool {
        self.body.iter().any(|&s| s == at)
    }

    /// Check if the head overlaps any other segment.
    #[must_use]
    pub fn bites_itself(&self) -> bool {
        match self.head() {
            Some(head) => self.body.iter().skip(1).any(|&s| s == head),
            None => false,
        }
    }
}
