//! Broad-phase collision detection
//!
//! Bounds are axis-aligned rectangles in world space. Candidates are found by
//! sorting on the left edge and sweeping along x, keeping an active list of
//! rectangles whose horizontal extent still reaches the sweep position; only
//! those are tested against each other.
//!
//! Which pairs matter (and what happens to them) is decided by the caller,
//! usually by matching the [`Category`] of both nodes.

use crate::foundation::math::Rect;
use crate::scene::{Category, NodeId};

/// Two nodes whose bounds overlap
///
/// `first` is always the node that came earlier in the input, so each
/// unordered pair is reported exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Node listed first in the input
    pub first: NodeId,
    /// Node listed second in the input
    pub second: NodeId,
}

impl CollisionPair {
    /// Create a pair as given
    pub fn new(first: NodeId, second: NodeId) -> Self {
        Self { first, second }
    }

    /// Order the pair by category
    ///
    /// Returns `(a, b)` where `a` matches `category_a` and `b` matches
    /// `category_b`, or `None` if the pair is not of that kind.
    /// `first_category` and `second_category` are the categories of
    /// `first` and `second`.
    pub fn match_categories(
        &self,
        first_category: Category,
        second_category: Category,
        category_a: Category,
        category_b: Category,
    ) -> Option<(NodeId, NodeId)> {
        if first_category.matches(category_a) && second_category.matches(category_b) {
            Some((self.first, self.second))
        } else if first_category.matches(category_b) && second_category.matches(category_a) {
            Some((self.second, self.first))
        } else {
            None
        }
    }
}

/// Find every overlapping pair among `bounds` (touching edges count)
///
/// Pairs are returned sorted by the input position of `first`, then of
/// `second`, which makes the result independent of the sort used internally.
pub fn find_overlapping_pairs(bounds: &[(NodeId, Rect)]) -> Vec<CollisionPair> {
    let mut order: Vec<usize> = (0..bounds.len()).collect();
    order.sort_by(|&a, &b| bounds[a].1.left.total_cmp(&bounds[b].1.left));

    let mut active: Vec<usize> = Vec::new();
    let mut hits: Vec<(usize, usize)> = Vec::new();

    for &index in &order {
        let rect = &bounds[index].1;
        active.retain(|&other| bounds[other].1.right() >= rect.left);

        for &other in &active {
            if rect.intersects(&bounds[other].1) {
                hits.push((index.min(other), index.max(other)));
            }
        }
        active.push(index);
    }

    hits.sort_unstable();
    log::trace!("Broad phase: {} bounds, {} overlapping pairs", bounds.len(), hits.len());

    hits.into_iter()
        .map(|(a, b)| CollisionPair::new(bounds[a].0, bounds[b].0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(count: usize) -> Vec<NodeId> {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    fn brute_force(bounds: &[(NodeId, Rect)]) -> Vec<CollisionPair> {
        let mut pairs = Vec::new();
        for i in 0..bounds.len() {
            for j in (i + 1)..bounds.len() {
                if bounds[i].1.intersects(&bounds[j].1) {
                    pairs.push(CollisionPair::new(bounds[i].0, bounds[j].0));
                }
            }
        }
        pairs
    }

    #[test]
    fn test_matches_brute_force() {
        let ids = ids(8);
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(5.0, 5.0, 10.0, 10.0),
            Rect::new(100.0, 0.0, 5.0, 5.0),
            Rect::new(-20.0, 0.0, 25.0, 3.0),
            Rect::new(14.0, 14.0, 2.0, 2.0),
            Rect::new(50.0, 50.0, 60.0, 60.0),
            Rect::new(101.0, 1.0, 1.0, 1.0),
            Rect::new(0.0, 200.0, 500.0, 1.0),
        ];
        let bounds: Vec<_> = ids.iter().copied().zip(rects).collect();

        assert_eq!(find_overlapping_pairs(&bounds), brute_force(&bounds));
    }

    #[test]
    fn test_three_way_overlap_reports_each_pair_once() {
        let ids = ids(3);
        let bounds = vec![
            (ids[0], Rect::new(0.0, 0.0, 10.0, 10.0)),
            (ids[1], Rect::new(2.0, 2.0, 10.0, 10.0)),
            (ids[2], Rect::new(4.0, 4.0, 10.0, 10.0)),
        ];

        let pairs = find_overlapping_pairs(&bounds);

        assert_eq!(
            pairs,
            vec![
                CollisionPair::new(ids[0], ids[1]),
                CollisionPair::new(ids[0], ids[2]),
                CollisionPair::new(ids[1], ids[2]),
            ]
        );
    }

    #[test]
    fn test_separated_bounds_do_not_pair() {
        let ids = ids(2);
        let bounds = vec![
            (ids[0], Rect::new(0.0, 0.0, 10.0, 10.0)),
            (ids[1], Rect::new(0.0, 10.5, 10.0, 10.0)),
        ];
        assert!(find_overlapping_pairs(&bounds).is_empty());
        assert!(find_overlapping_pairs(&[]).is_empty());
    }

    #[test]
    fn test_match_categories_orders_pair() {
        let ids = ids(2);
        let pair = CollisionPair::new(ids[0], ids[1]);

        let matched = pair.match_categories(
            Category::ALLIED_PROJECTILE,
            Category::ENEMY_SHIP,
            Category::ENEMY_SHIP,
            Category::ALLIED_PROJECTILE,
        );
        assert_eq!(matched, Some((ids[1], ids[0])));

        let unmatched = pair.match_categories(
            Category::ALLIED_PROJECTILE,
            Category::PLAYER_SHIP,
            Category::ENEMY_SHIP,
            Category::ALLIED_PROJECTILE,
        );
        assert_eq!(unmatched, None);
    }
}
