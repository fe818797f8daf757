//min-priority queue used to order rank ids during the shortest path search
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

//f64 has no Ord; costs are never NaN here but total_cmp keeps the heap honest
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Min-priority queue over rank ids with re-key support.
///
/// Pushing an id that is already queued replaces its priority instead of
/// duplicating it, so at most one live entry exists per id. Stale heap
/// entries are skipped on pop by checking them against the live map
/// (Heap(distance, node), Reverse turns binaryheap into minheap).
#[derive(Debug, Default)]
pub struct MinQueue {
    heap: BinaryHeap<Reverse<(Cost, String)>>,
    live: HashMap<String, f64>,
}

impl MinQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `id` at `priority`, replacing any previous entry for `id`.
    pub fn push(&mut self, id: String, priority: f64) {
        self.live.insert(id.clone(), priority);
        self.heap.push(Reverse((Cost(priority), id)));
    }

    /// Remove and return the lowest-priority live entry.
    pub fn pop(&mut self) -> Option<(String, f64)> {
        while let Some(Reverse((Cost(priority), id))) = self.heap.pop() {
            match self.live.get(&id) {
                Some(&current) if current == priority => {
                    self.live.remove(&id);
                    return Some((id, priority));
                }
                //entry was re-keyed or already popped, skip it
                _ => continue,
            }
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_priority_order() {
        let mut queue = MinQueue::new();
        queue.push("a".to_string(), 3.0);
        queue.push("b".to_string(), 1.0);
        queue.push("c".to_string(), 2.0);
        assert_eq!(queue.pop(), Some(("b".to_string(), 1.0)));
        assert_eq!(queue.pop(), Some(("c".to_string(), 2.0)));
        assert_eq!(queue.pop(), Some(("a".to_string(), 3.0)));
        assert!(queue.is_empty());
    }

    #[test]
    fn rekey_leaves_single_entry_with_latest_priority() {
        let mut queue = MinQueue::new();
        queue.push("a".to_string(), 5.0);
        queue.push("a".to_string(), 1.0);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Some(("a".to_string(), 1.0)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn rekey_upwards_also_replaces() {
        let mut queue = MinQueue::new();
        queue.push("a".to_string(), 1.0);
        queue.push("b".to_string(), 2.0);
        queue.push("a".to_string(), 9.0);
        assert_eq!(queue.pop(), Some(("b".to_string(), 2.0)));
        assert_eq!(queue.pop(), Some(("a".to_string(), 9.0)));
        assert!(queue.is_empty());
    }

    #[test]
    fn infinite_priorities_are_valid_entries() {
        let mut queue = MinQueue::new();
        queue.push("far".to_string(), f64::INFINITY);
        queue.push("near".to_string(), 0.0);
        assert_eq!(queue.pop(), Some(("near".to_string(), 0.0)));
        let (id, priority) = queue.pop().unwrap();
        assert_eq!(id, "far");
        assert!(priority.is_infinite());
    }

    #[test]
    fn empty_queue_pops_none() {
        let mut queue = MinQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }
}
