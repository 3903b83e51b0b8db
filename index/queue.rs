//! Priority queue used by the nearby search.
//!
//! A binary min-heap keyed by distance. `BinaryHeap` is a max-heap, so the
//! ordering of [`QueueEntry`] is reversed. The backing storage is kept
//! between pushes and pops, so a single queue can serve a whole traversal
//! without reallocating once it has grown to the frontier size.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Entry in the priority queue: a distance plus whatever the caller carries along.
#[derive(Debug)]
pub(crate) struct QueueEntry<V> {
    pub(crate) dist: f64,
    pub(crate) value: V,
}

// Entries compare by distance only, reversed for min-heap behavior.
impl<V> PartialEq for QueueEntry<V> {
    fn eq(&self, other: &Self) -> bool {
        self.dist.total_cmp(&other.dist) == Ordering::Equal
    }
}

impl<V> Eq for QueueEntry<V> {}

impl<V> PartialOrd for QueueEntry<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V> Ord for QueueEntry<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.dist.total_cmp(&self.dist)
    }
}

/// Min-heap of values ordered by distance (smallest first).
#[derive(Debug)]
pub struct NearbyQueue<V> {
    heap: BinaryHeap<QueueEntry<V>>,
}

impl<V> Default for NearbyQueue<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> NearbyQueue<V> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Push a value with its distance. O(log n).
    pub fn push(&mut self, dist: f64, value: V) {
        self.heap.push(QueueEntry { dist, value });
    }

    /// Pop the value with the smallest distance. O(log n).
    ///
    /// Equal distances come out in an unspecified order.
    pub fn pop(&mut self) -> Option<(f64, V)> {
        self.heap.pop().map(|entry| (entry.dist, entry.value))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_queue_order_and_reuse() {
        let mut queue = NearbyQueue::new();
        for dist in [2.0, 1.0, 5.0, 3.0, 4.0] {
            queue.push(dist, ());
        }

        let mut last = f64::NEG_INFINITY;
        for _ in 0..3 {
            let (dist, _) = queue.pop().expect("queue was empty");
            assert!(dist >= last, "queue was out of order");
            last = dist;
        }
        assert_eq!(queue.len(), 2);

        let capacity_before = queue.capacity();
        queue.push(1.0, ());
        queue.push(10.0, ());
        queue.push(11.0, ());
        assert_eq!(queue.capacity(), capacity_before, "queue did not reuse space");

        let mut last = f64::NEG_INFINITY;
        for _ in 0..5 {
            let (dist, _) = queue.pop().expect("queue was empty");
            assert!(dist >= last, "queue was out of order");
            last = dist;
        }
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_carries_values() {
        let mut queue = NearbyQueue::new();
        queue.push(3.0, "c");
        queue.push(1.0, "a");
        queue.push(2.0, "b");

        assert_eq!(queue.pop(), Some((1.0, "a")));
        assert_eq!(queue.pop(), Some((2.0, "b")));
        assert_eq!(queue.pop(), Some((3.0, "c")));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_queue_random_ops_stay_sorted() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut queue = NearbyQueue::new();
        let mut mirror: Vec<f64> = Vec::new();

        for _ in 0..2000 {
            if rng.gen_bool(0.6) {
                let dist: f64 = rng.gen();
                queue.push(dist, ());
                mirror.push(dist);
            } else {
                mirror.sort_by(|a, b| b.total_cmp(a));
                let expected = mirror.pop();
                assert_eq!(queue.pop().map(|(dist, _)| dist), expected);
            }
        }
        assert_eq!(queue.len(), mirror.len());
    }
}
