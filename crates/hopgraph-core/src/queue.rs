//! Indexed binary min-heap with O(log n) arbitrary priority changes.
//!
//! # Layout
//!
//! Entries live in a zero-based array `heap` where the children of slot `i`
//! are `2i + 1` and `2i + 2`. A side map `location` records the current
//! slot of every element, which is what makes
//! [`IndexedPriorityQueue::change_priority`] O(log n).
//!
//! # Invariants
//!
//! 1. Min-heap: every non-root entry's priority is ≥ its parent's.
//! 2. `location` is the exact inverse of `heap`: for every slot `i`,
//!    `location[heap[i].element] == i`.
//! 3. Elements are unique.
//!
//! Every swap updates both structures, so the invariants hold between any
//! two public calls.
//!
//! # Tie-breaking
//!
//! Percolate-up stops on equal priorities. Push-down prefers the right child
//! when both children have equal priority, and moves an entry below a child
//! with an equal priority. These rules fix the pop order of equal-priority
//! elements and are part of the queue's observable behavior.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{Error, Result};

/// Queue priority. Lower values are served first; negative values are
/// rejected.
pub type Priority = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<E> {
    priority: Priority,
    element: E,
}

/// A min-priority queue over unique elements with O(log n) priority updates.
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<E> {
    heap: Vec<Entry<E>>,
    location: HashMap<E, usize>,
}

impl<E> Default for IndexedPriorityQueue<E> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            location: HashMap::new(),
        }
    }
}

impl<E> IndexedPriorityQueue<E>
where
    E: Clone + Eq + Hash + fmt::Debug,
{
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            location: HashMap::with_capacity(capacity),
        }
    }

    /// Insert `element` with `priority`.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateElement`] if `element` is already queued.
    /// - [`Error::NegativePriority`] if `priority < 0`.
    pub fn push(&mut self, priority: Priority, element: E) -> Result<()> {
        if self.location.contains_key(&element) {
            return Err(Error::duplicate_element(&element));
        }
        if priority < 0 {
            return Err(Error::NegativePriority { priority });
        }

        let slot = self.heap.len();
        self.location.insert(element.clone(), slot);
        self.heap.push(Entry { priority, element });
        self.percolate_up(slot);

        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Remove the minimum entry and return it as `(priority, element)`.
    ///
    /// The last entry takes the root slot and is pushed down.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQueue`] if there is nothing to pop.
    pub fn pop(&mut self) -> Result<(Priority, E)> {
        let Some(last) = self.heap.len().checked_sub(1) else {
            return Err(Error::EmptyQueue);
        };
        self.heap.swap(0, last);
        let removed = self.heap.pop().ok_or(Error::EmptyQueue)?;
        self.location.remove(&removed.element);

        if !self.heap.is_empty() {
            self.set_location(0);
            self.push_down(0);
        }

        debug_assert!(self.is_consistent());
        Ok((removed.priority, removed.element))
    }

    /// Priority of the minimum entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQueue`] if the queue is empty.
    pub fn top_priority(&self) -> Result<Priority> {
        self.heap
            .first()
            .map(|entry| entry.priority)
            .ok_or(Error::EmptyQueue)
    }

    /// Element of the minimum entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQueue`] if the queue is empty.
    pub fn top_element(&self) -> Result<&E> {
        self.heap
            .first()
            .map(|entry| &entry.element)
            .ok_or(Error::EmptyQueue)
    }

    /// Set the priority of a queued element, moving it up or down as needed.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownElement`] if `element` is not queued.
    /// - [`Error::NegativePriority`] if `new_priority < 0`.
    pub fn change_priority(&mut self, new_priority: Priority, element: &E) -> Result<()> {
        let Some(&slot) = self.location.get(element) else {
            return Err(Error::unknown_element(element));
        };
        if new_priority < 0 {
            return Err(Error::NegativePriority {
                priority: new_priority,
            });
        }

        self.heap[slot].priority = new_priority;
        if self.percolate_up(slot) == slot {
            self.push_down(slot);
        }

        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Current priority of `element`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownElement`] if `element` is not queued.
    pub fn priority(&self, element: &E) -> Result<Priority> {
        self.location
            .get(element)
            .map(|&slot| self.heap[slot].priority)
            .ok_or_else(|| Error::unknown_element(element))
    }

    /// Whether `element` is queued.
    #[must_use]
    pub fn is_present(&self, element: &E) -> bool {
        self.location.contains_key(element)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.location.clear();
    }

    /// `(priority, element)` pairs in heap-array order.
    pub fn entries(&self) -> impl Iterator<Item = (Priority, &E)> + '_ {
        self.heap.iter().map(|entry| (entry.priority, &entry.element))
    }

    /// Check all three queue invariants: heap order, an exact inverse
    /// location map, and non-negative priorities.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.heap.len() != self.location.len() {
            return false;
        }
        self.heap.iter().enumerate().all(|(slot, entry)| {
            entry.priority >= 0
                && self.location.get(&entry.element) == Some(&slot)
                && (slot == 0 || self.heap[parent(slot)].priority <= entry.priority)
        })
    }

    // -----------------------------------------------------------------------
    // Heap repair
    // -----------------------------------------------------------------------

    /// Move the entry at `start` towards the root while it is strictly
    /// smaller than its parent. Returns its final slot.
    fn percolate_up(&mut self, start: usize) -> usize {
        let mut curr = start;
        while curr > 0 {
            let p = parent(curr);
            if self.heap[curr].priority < self.heap[p].priority {
                self.swap(curr, p);
                curr = p;
            } else {
                break;
            }
        }
        curr
    }

    /// Move the entry at `start` towards the leaves. Returns its final slot.
    fn push_down(&mut self, start: usize) -> usize {
        let mut curr = start;

        while self.has_two_children(curr) {
            let (l, r) = (left(curr), right(curr));
            let child = if self.heap[l].priority < self.heap[r].priority {
                l
            } else {
                r
            };
            if self.heap[curr].priority < self.heap[child].priority {
                break;
            }
            self.swap(curr, child);
            curr = child;
        }

        // A node with a single child only ever has a left one.
        let l = left(curr);
        if l < self.heap.len() && self.heap[l].priority < self.heap[curr].priority {
            self.swap(curr, l);
            curr = l;
        }
        curr
    }

    fn has_two_children(&self, slot: usize) -> bool {
        right(slot) < self.heap.len()
    }

    /// Swap two slots, keeping `location` in step.
    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.set_location(i);
        self.set_location(j);
    }

    fn set_location(&mut self, slot: usize) {
        if let Some(recorded) = self.location.get_mut(&self.heap[slot].element) {
            *recorded = slot;
        }
    }
}

const fn left(slot: usize) -> usize {
    2 * slot + 1
}

const fn right(slot: usize) -> usize {
    2 * slot + 2
}

const fn parent(slot: usize) -> usize {
    (slot - 1) / 2
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn drain(queue: &mut IndexedPriorityQueue<u32>) -> Vec<(Priority, u32)> {
        let mut out = Vec::new();
        while !queue.is_empty() {
            out.push(queue.pop().expect("non-empty"));
        }
        out
    }

    #[test]
    fn push_pop_change_scenario() {
        let mut q = IndexedPriorityQueue::new();
        q.push(5, 100).expect("fresh element");
        q.push(2, 200).expect("fresh element");
        q.push(8, 300).expect("fresh element");
        assert_eq!(q.top_element(), Ok(&200));
        assert_eq!(q.top_priority(), Ok(2));

        assert_eq!(q.pop(), Ok((2, 200)));
        assert_eq!(q.top_element(), Ok(&100));

        q.change_priority(1, &300).expect("queued");
        assert_eq!(q.top_element(), Ok(&300));
        assert_eq!(q.priority(&300), Ok(1));
        assert!(q.is_consistent());
    }

    #[test]
    fn empty_queue_errors() {
        let mut q: IndexedPriorityQueue<u32> = IndexedPriorityQueue::new();
        assert_eq!(q.pop(), Err(Error::EmptyQueue));
        assert_eq!(q.top_priority(), Err(Error::EmptyQueue));
        assert_eq!(q.top_element(), Err(Error::EmptyQueue));
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn duplicate_element_rejected() {
        let mut q = IndexedPriorityQueue::new();
        q.push(1, 7_u32).expect("fresh element");
        let err = q.push(3, 7).expect_err("duplicate");
        assert_eq!(err.kind(), ErrorKind::DuplicateElement);
        assert_eq!(q.len(), 1);
        assert_eq!(q.priority(&7), Ok(1));
    }

    #[test]
    fn negative_priority_rejected() {
        let mut q = IndexedPriorityQueue::new();
        assert_eq!(
            q.push(-1, 1_u32),
            Err(Error::NegativePriority { priority: -1 })
        );
        assert!(q.is_empty());

        q.push(0, 1).expect("zero is allowed");
        assert_eq!(
            q.change_priority(-5, &1),
            Err(Error::NegativePriority { priority: -5 })
        );
        assert_eq!(q.priority(&1), Ok(0));
    }

    #[test]
    fn unknown_element_rejected() {
        let mut q: IndexedPriorityQueue<u32> = IndexedPriorityQueue::new();
        q.push(4, 1).expect("fresh element");
        assert_eq!(
            q.change_priority(2, &9).expect_err("unknown").kind(),
            ErrorKind::UnknownElement
        );
        assert_eq!(
            q.priority(&9).expect_err("unknown").kind(),
            ErrorKind::UnknownElement
        );
    }

    #[test]
    fn popping_last_entry_clears_location() {
        let mut q = IndexedPriorityQueue::new();
        q.push(3, 42_u32).expect("fresh element");
        assert_eq!(q.pop(), Ok((3, 42)));
        assert!(!q.is_present(&42));
        assert!(q.is_consistent());

        // The element can be queued again afterwards.
        q.push(1, 42).expect("no longer present");
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn pops_in_priority_order() {
        let mut q = IndexedPriorityQueue::new();
        for (priority, element) in [(9, 1), (4, 2), (7, 3), (1, 4), (8, 5), (2, 6), (6, 7)] {
            q.push(priority, element).expect("fresh element");
        }
        let priorities: Vec<Priority> = drain(&mut q).into_iter().map(|(p, _)| p).collect();
        assert_eq!(priorities, vec![1, 2, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn increasing_priority_pushes_down() {
        let mut q = IndexedPriorityQueue::new();
        for (priority, element) in [(1, 10), (2, 20), (3, 30), (4, 40)] {
            q.push(priority, element).expect("fresh element");
        }
        q.change_priority(10, &10).expect("queued");
        assert_eq!(q.top_element(), Ok(&20));
        assert!(q.is_consistent());
        assert_eq!(drain(&mut q).last(), Some(&(10, 10)));
    }

    #[test]
    fn equal_priorities_do_not_percolate_past_parent() {
        let mut q = IndexedPriorityQueue::new();
        q.push(5, 1_u32).expect("fresh element");
        q.push(5, 2).expect("fresh element");
        assert_eq!(q.top_element(), Ok(&1));
    }

    #[test]
    fn push_down_prefers_right_child_on_ties() {
        // heap: [0:a, 5:b, 5:c, 9:d]; popping a moves d to the root, whose
        // children b (left) and c (right) tie, so c is promoted.
        let mut q = IndexedPriorityQueue::new();
        q.push(0, 'a').expect("fresh element");
        q.push(5, 'b').expect("fresh element");
        q.push(5, 'c').expect("fresh element");
        q.push(9, 'd').expect("fresh element");

        assert_eq!(q.pop(), Ok((0, 'a')));
        assert_eq!(q.top_element(), Ok(&'c'));

        let order: Vec<char> = q.entries().map(|(_, e)| *e).collect();
        assert_eq!(order, vec!['c', 'b', 'd']);
    }

    #[test]
    fn push_down_swaps_below_equal_child() {
        // Root 5 with children 5 and 7: the root is not strictly smaller than
        // its smaller child, so it moves down.
        let mut q = IndexedPriorityQueue::new();
        q.push(1, 'x').expect("fresh element");
        q.push(5, 'y').expect("fresh element");
        q.push(7, 'z').expect("fresh element");
        q.push(9, 'w').expect("fresh element");

        q.change_priority(5, &'x').expect("queued");
        assert_eq!(q.top_element(), Ok(&'y'));
        assert!(q.is_consistent());
    }

    #[test]
    fn leaf_correction_with_single_left_child() {
        let mut q = IndexedPriorityQueue::new();
        q.push(1, 1_u32).expect("fresh element");
        q.push(2, 2).expect("fresh element");
        q.change_priority(3, &1).expect("queued");
        assert_eq!(q.top_element(), Ok(&2));
        let order: Vec<u32> = q.entries().map(|(_, e)| *e).collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn clear_empties_both_structures() {
        let mut q = IndexedPriorityQueue::with_capacity(4);
        q.push(1, 1_u32).expect("fresh element");
        q.push(2, 2).expect("fresh element");
        q.clear();
        assert!(q.is_empty());
        assert!(!q.is_present(&1));
        assert!(q.is_consistent());
    }

    #[test]
    fn string_elements_work() {
        let mut q = IndexedPriorityQueue::new();
        q.push(3, "heat".to_string()).expect("fresh element");
        q.push(1, "ronin".to_string()).expect("fresh element");
        assert_eq!(q.top_element().map(String::as_str), Ok("ronin"));
    }
}
