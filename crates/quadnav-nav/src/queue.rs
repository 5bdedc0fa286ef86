// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Addressable min-priority queue.
//!
//! Ordered by `(priority, element)`, so ties resolve by element order and
//! every extraction sequence is deterministic. Re-inserting an element
//! replaces its priority, which is how callers decrease keys.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy)]
struct Priority(f64);

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Min-queue keyed by `f64` priorities.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T: Ord + Copy> {
    order: BTreeSet<(Priority, T)>,
    priorities: BTreeMap<T, f64>,
}

impl<T: Ord + Copy> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self {
            order: BTreeSet::new(),
            priorities: BTreeMap::new(),
        }
    }
}

impl<T: Ord + Copy> PriorityQueue<T> {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `item`, replacing any previous priority.
    pub fn insert(&mut self, item: T, priority: f64) {
        if let Some(old) = self.priorities.insert(item, priority) {
            self.order.remove(&(Priority(old), item));
        }
        self.order.insert((Priority(priority), item));
    }

    /// Smallest element and its priority, without removing it.
    pub fn get_minimum(&self) -> Option<(T, f64)> {
        self.order.first().map(|(p, item)| (*item, p.0))
    }

    /// Removes and returns the smallest element.
    pub fn extract_min(&mut self) -> Option<(T, f64)> {
        let (p, item) = self.order.pop_first()?;
        self.priorities.remove(&item);
        Some((item, p.0))
    }

    /// Removes `item` if queued. Returns whether it was present.
    pub fn discard(&mut self, item: T) -> bool {
        match self.priorities.remove(&item) {
            Some(p) => self.order.remove(&(Priority(p), item)),
            None => false,
        }
    }

    /// `true` if `item` is queued.
    pub fn contains(&self, item: T) -> bool {
        self.priorities.contains_key(&item)
    }

    /// Current priority of `item`.
    pub fn priority(&self, item: T) -> Option<f64> {
        self.priorities.get(&item).copied()
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.priorities.len()
    }

    /// `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.priorities.is_empty()
    }
}
