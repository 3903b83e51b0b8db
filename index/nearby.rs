//! Incremental nearest-neighbor search over any [`SpatialIndex`].
//!
//! ## Algorithm Overview
//!
//! Best-first traversal with lazy expansion:
//!
//! 1. Ask the tree for the children of the current parent (the root entries
//!    at first), compute a distance for each with the caller's `algo`, and
//!    push them onto one global min-heap.
//! 2. Pop the closest entry. A data item goes to the caller's `iter`; an
//!    internal node becomes the next parent and we go back to step 1.
//! 3. Stop when `iter` returns false or nothing is left to pop.
//!
//! The ordering guarantee rests on `algo` being monotone: the distance of a
//! node must never exceed the distance of anything below it. Under that
//! condition the heap minimum is always the closest item not yet reported,
//! so items reach `iter` in non-decreasing distance order while only the
//! nodes that are actually needed get expanded. The bundled box metric
//! satisfies this because a node's box encloses all of its descendants.
//! The engine does not check the condition.

use super::interface::{Child, Payload, SpatialIndex};
use super::queue::NearbyQueue;
use crate::algo;
use crate::rtree::Rectangle;

/// One result of [`GeoIndex::knn`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a, T> {
    pub rect: Rectangle,
    pub data: &'a T,
    /// Squared box distance to the query rectangle
    pub dist: f64,
}

/// Wrapper around a [`SpatialIndex`] that adds `nearby` (kNN) on top of the
/// plain tree operations.
///
/// ```
/// use geoindex::{GeoIndex, RTree, Rectangle};
///
/// let mut index = GeoIndex::new(RTree::default());
/// index.insert(Rectangle::from_point(1.0, 1.0), "a");
/// index.insert(Rectangle::from_point(5.0, 5.0), "b");
///
/// let nearest = index.knn(&Rectangle::from_point(4.0, 4.0), 1);
/// assert_eq!(*nearest[0].data, "b");
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeoIndex<S> {
    inner: S,
}

impl<S> GeoIndex<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: SpatialIndex> GeoIndex<S> {
    /// Insert an item into the index
    pub fn insert(&mut self, rect: Rectangle, data: S::Item) {
        self.inner.insert(rect, data);
    }

    /// Delete an item from the index. Deleting an absent pair does nothing.
    pub fn delete(&mut self, rect: &Rectangle, data: &S::Item) -> bool {
        self.inner.delete(rect, data)
    }

    /// Delete the old pair (if present) and insert the new one.
    pub fn replace(
        &mut self,
        old_rect: &Rectangle,
        old_data: &S::Item,
        new_rect: Rectangle,
        new_data: S::Item,
    ) {
        self.inner.replace(old_rect, old_data, new_rect, new_data);
    }

    /// Search the index for items that intersect `rect`
    pub fn search<F>(&self, rect: &Rectangle, visit: F)
    where
        F: FnMut(&Rectangle, &S::Item) -> bool,
    {
        self.inner.search(rect, visit);
    }

    /// Iterate through all items in no specified order
    pub fn scan<F>(&self, visit: F)
    where
        F: FnMut(&Rectangle, &S::Item) -> bool,
    {
        self.inner.scan(visit);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn bounds(&self) -> Option<Rectangle> {
        self.inner.bounds()
    }

    /// Lazy expansion pass-through, see [`SpatialIndex::children`].
    pub fn children<'a>(
        &'a self,
        parent: Option<S::Handle<'a>>,
        out: &mut Vec<Child<'a, S::Item, S::Handle<'a>>>,
    ) {
        self.inner.children(parent, out);
    }

    /// Visit items from the smallest `algo` distance to the largest.
    ///
    /// `algo` is called for every entry the traversal touches, nodes included
    /// (`Payload::Node`), and must be monotone: a node may never be farther
    /// than any of its descendants. `iter` receives each item with its
    /// distance and returns false to stop early.
    pub fn nearby<'a, A, F>(&'a self, mut algo: A, mut iter: F)
    where
        A: FnMut(&Rectangle, Payload<'a, S::Item, S::Handle<'a>>) -> f64,
        F: FnMut(&Rectangle, &'a S::Item, f64) -> bool,
    {
        let mut queue: NearbyQueue<Child<'a, S::Item, S::Handle<'a>>> = NearbyQueue::new();
        let mut children = Vec::new();
        let mut parent = None;

        loop {
            // gather all children for parent
            self.inner.children(parent, &mut children);
            for child in children.drain(..) {
                let dist = algo(&child.rect, child.payload);
                queue.push(dist, child);
            }

            loop {
                let Some((dist, child)) = queue.pop() else {
                    // nothing left in queue
                    return;
                };
                match child.payload {
                    Payload::Item(data) => {
                        if !iter(&child.rect, data, dist) {
                            return;
                        }
                    }
                    Payload::Node(handle) => {
                        parent = Some(handle);
                        break;
                    }
                }
            }
        }
    }

    /// The `k` items closest to `target` by squared box distance, nearest first.
    pub fn knn(&self, target: &Rectangle, k: usize) -> Vec<Neighbor<'_, S::Item>> {
        let mut results = Vec::with_capacity(k.min(self.len()));
        if k == 0 {
            return results;
        }

        self.nearby(algo::simple_box(*target), |rect, data, dist| {
            results.push(Neighbor {
                rect: *rect,
                data,
                dist,
            });
            results.len() < k
        });
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::box_dist;
    use crate::rtree::RTree;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_points(count: usize, seed: u64) -> Vec<Rectangle> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                Rectangle::from_point(rng.gen_range(-180.0..180.0), rng.gen_range(-90.0..90.0))
            })
            .collect()
    }

    #[test]
    fn test_nearby_empty_tree() {
        let index: GeoIndex<RTree<u32>> = GeoIndex::new(RTree::default());
        let mut count = 0;
        index.nearby(algo::simple_box(Rectangle::from_point(0.0, 0.0)), |_, _, _| {
            count += 1;
            true
        });
        assert_eq!(count, 0);
        assert!(index.knn(&Rectangle::from_point(0.0, 0.0), 5).is_empty());
    }

    #[test]
    fn test_nearby_yields_everything_in_order() {
        let points = random_points(5000, 11);
        let mut index = GeoIndex::new(RTree::new(16));
        for (i, rect) in points.iter().enumerate() {
            index.insert(*rect, i);
        }

        let target = Rectangle::new(-18.0, -9.0, 18.0, 9.0);
        let mut seen = vec![false; points.len()];
        let mut last = f64::NEG_INFINITY;
        let mut count = 0;
        index.nearby(algo::simple_box(target), |rect, &i, dist| {
            assert!(dist >= last, "out of order");
            assert_eq!(dist, box_dist(&target, rect));
            assert!(!seen[i], "item reported twice");
            seen[i] = true;
            last = dist;
            count += 1;
            true
        });
        assert_eq!(count, index.len());
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_nearby_stops_early() {
        let points = random_points(1000, 3);
        let mut index = GeoIndex::new(RTree::default());
        for (i, rect) in points.iter().enumerate() {
            index.insert(*rect, i);
        }

        let mut count = 0;
        index.nearby(algo::simple_box(Rectangle::from_point(0.0, 0.0)), |_, _, _| {
            count += 1;
            count < 10
        });
        assert_eq!(count, 10);
    }

    #[test]
    fn test_nearby_identical_points_first() {
        let mut index = GeoIndex::new(RTree::new(8));
        for i in 0..100 {
            index.insert(Rectangle::from_point(0.0, 0.0), i);
        }
        for i in 100..150 {
            index.insert(Rectangle::from_point(i as f64, 1.0), i);
        }

        let mut dists = Vec::new();
        index.nearby(algo::simple_box(Rectangle::from_point(0.0, 0.0)), |_, _, dist| {
            dists.push(dist);
            true
        });
        assert_eq!(dists.len(), 150);
        assert!(dists[..100].iter().all(|&d| d == 0.0));
        assert!(dists[100..].iter().all(|&d| d > 0.0));
    }

    #[test]
    fn test_nearby_algo_sees_nodes_and_items() {
        let points = random_points(500, 5);
        let mut index = GeoIndex::new(RTree::new(8));
        for (i, rect) in points.iter().enumerate() {
            index.insert(*rect, i);
        }

        let (mut nodes, mut items) = (0, 0);
        let target = Rectangle::from_point(10.0, 10.0);
        index.nearby(
            |rect, payload| {
                if payload.is_item() {
                    items += 1;
                } else {
                    nodes += 1;
                }
                box_dist(&target, rect)
            },
            |_, _, _| true,
        );
        assert_eq!(items, 500);
        assert!(nodes > 0);
    }

    #[test]
    fn test_knn_matches_brute_force() {
        let points = random_points(2000, 21);
        let mut index = GeoIndex::new(RTree::default());
        for (i, rect) in points.iter().enumerate() {
            index.insert(*rect, i);
        }

        let target = Rectangle::from_point(42.0, -17.0);
        let knn = index.knn(&target, 25);
        assert_eq!(knn.len(), 25);

        let mut brute: Vec<f64> = points.iter().map(|rect| box_dist(&target, rect)).collect();
        brute.sort_by(f64::total_cmp);
        let got: Vec<f64> = knn.iter().map(|n| n.dist).collect();
        assert_eq!(got, brute[..25].to_vec());

        assert!(index.knn(&target, 0).is_empty());
        assert_eq!(index.knn(&target, 5000).len(), 2000);
    }

    #[test]
    fn test_facade_pass_through() {
        let mut index = GeoIndex::new(RTree::new(4));
        let a = Rectangle::new(0.0, 0.0, 1.0, 1.0);
        let b = Rectangle::new(5.0, 5.0, 6.0, 6.0);
        index.insert(a, 1);
        index.insert(b, 2);
        assert_eq!(index.len(), 2);
        assert_eq!(index.bounds(), Some(Rectangle::new(0.0, 0.0, 6.0, 6.0)));

        let mut found = Vec::new();
        index.search(&Rectangle::new(0.5, 0.5, 2.0, 2.0), |_, &d| {
            found.push(d);
            true
        });
        assert_eq!(found, vec![1]);

        let c = Rectangle::new(9.0, 9.0, 10.0, 10.0);
        index.replace(&a, &1, c, 1);
        assert_eq!(index.len(), 2);
        assert_eq!(index.bounds(), Some(Rectangle::new(5.0, 5.0, 10.0, 10.0)));

        // 旧条目不存在时 replace 等价于插入
        index.replace(&a, &7, a, 7);
        assert_eq!(index.len(), 3);

        assert!(index.delete(&b, &2));
        assert!(!index.delete(&b, &2));

        let mut total = 0;
        index.scan(|_, _| {
            total += 1;
            true
        });
        assert_eq!(total, 2);

        let mut children = Vec::new();
        index.children(None, &mut children);
        assert_eq!(children.len(), 2);

        let tree = index.into_inner();
        assert_eq!(tree.len(), 2);
    }
}
