use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

// Priorities only shape the tree, never query results; a fixed seed keeps
// tree layout reproducible across runs.
const PRIORITY_SEED: u64 = 0x5EED_BA5E;

type Link = Option<Box<Node>>;

/// One distinct amount with its multiplicity, plus subtree bookkeeping.
#[derive(Debug, Clone)]
struct Node {
    amount: i64,
    /// How many times `amount` has been inserted.
    count: usize,
    /// Total multiplicity across this node's subtree, `count` included.
    size: usize,
    /// Max-heap priority; every parent outranks both children.
    priority: u64,
    left: Link,
    right: Link,
}

impl Node {
    fn leaf(amount: i64, priority: u64) -> Box<Self> {
        Box::new(Self {
            amount,
            count: 1,
            size: 1,
            priority,
            left: None,
            right: None,
        })
    }

    fn refresh_size(&mut self) {
        self.size = self.count + size(&self.left) + size(&self.right);
    }
}

fn size(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

fn priority_of(link: &Link) -> u64 {
    link.as_ref().map_or(0, |node| node.priority)
}

fn insert(link: &mut Link, amount: i64, priority: u64) {
    let Some(node) = link else {
        *link = Some(Node::leaf(amount, priority));
        return;
    };
    match amount.cmp(&node.amount) {
        Ordering::Equal => node.count += 1,
        Ordering::Less => {
            insert(&mut node.left, amount, priority);
            if priority_of(&node.left) > node.priority {
                rotate_right(link);
            }
        }
        Ordering::Greater => {
            insert(&mut node.right, amount, priority);
            if priority_of(&node.right) > node.priority {
                rotate_left(link);
            }
        }
    }
    if let Some(node) = link {
        node.refresh_size();
    }
}

/// Promotes `link`'s left child, keeping in-order positions intact.
fn rotate_right(link: &mut Link) {
    let Some(mut top) = link.take() else { return };
    let Some(mut pivot) = top.left.take() else {
        *link = Some(top);
        return;
    };
    top.left = pivot.right.take();
    top.refresh_size();
    pivot.right = Some(top);
    pivot.refresh_size();
    *link = Some(pivot);
}

/// Promotes `link`'s right child, keeping in-order positions intact.
fn rotate_left(link: &mut Link) {
    let Some(mut top) = link.take() else { return };
    let Some(mut pivot) = top.right.take() else {
        *link = Some(top);
        return;
    };
    top.right = pivot.left.take();
    top.refresh_size();
    pivot.left = Some(top);
    pivot.refresh_size();
    *link = Some(pivot);
}

fn select(mut link: &Link, mut rank: usize) -> Option<i64> {
    while let Some(node) = link {
        let left_size = size(&node.left);
        if rank < left_size {
            link = &node.left;
        } else if rank < left_size + node.count {
            return Some(node.amount);
        } else {
            rank -= left_size + node.count;
            link = &node.right;
        }
    }
    None
}

fn push_in_order(link: &Link, out: &mut Vec<i64>) {
    if let Some(node) = link {
        push_in_order(&node.left, out);
        out.extend(std::iter::repeat(node.amount).take(node.count));
        push_in_order(&node.right, out);
    }
}

/// Insert-only ordered multiset of contribution amounts with logarithmic
/// insertion and logarithmic select-by-rank.
///
/// Backed by a size-augmented [treap]: equal amounts collapse into one node
/// carrying a multiplicity, subtree sizes answer rank queries exactly, and
/// random heap priorities keep the tree balanced in expectation. Randomness
/// only affects the tree's shape; every query answer is exact.
///
/// Running count and sum are cached on insert, so both read back in constant
/// time no matter how many amounts the set holds.
///
/// [treap]: https://en.wikipedia.org/wiki/Treap
#[derive(Debug, Clone)]
pub struct OrderedMultiset {
    root: Link,
    len: usize,
    sum: i64,
    rng: StdRng,
}

impl Default for OrderedMultiset {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderedMultiset {
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            sum: 0,
            rng: StdRng::seed_from_u64(PRIORITY_SEED),
        }
    }

    /// Total number of amounts inserted, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sum of every inserted amount.
    #[inline]
    pub fn sum(&self) -> i64 {
        self.sum
    }

    /// Smallest amount, if any.
    pub fn min(&self) -> Option<i64> {
        self.select(0)
    }

    /// Largest amount, if any.
    pub fn max(&self) -> Option<i64> {
        self.len.checked_sub(1).and_then(|rank| self.select(rank))
    }

    pub fn insert(&mut self, amount: i64) {
        let priority = self.rng.gen();
        insert(&mut self.root, amount, priority);
        self.len += 1;
        self.sum += amount;
    }

    /// Amount at `rank` in ascending order, zero-based, with duplicates
    /// occupying consecutive ranks. `None` once `rank >= len`.
    pub fn select(&self, rank: usize) -> Option<i64> {
        select(&self.root, rank)
    }

    /// Every amount in ascending order.
    pub fn sorted_values(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len);
        push_in_order(&self.root, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_walks_duplicates_in_order() {
        let mut set = OrderedMultiset::new();
        for amount in [5, 1, 5, 3, 5, -2] {
            set.insert(amount);
        }
        assert_eq!(set.sorted_values(), vec![-2, 1, 3, 5, 5, 5]);
        assert_eq!(set.select(0), Some(-2));
        assert_eq!(set.select(2), Some(3));
        assert_eq!(set.select(3), Some(5));
        assert_eq!(set.select(5), Some(5));
        assert_eq!(set.select(6), None);
    }

    #[test]
    fn caches_len_and_sum() {
        let mut set = OrderedMultiset::new();
        assert!(set.is_empty());
        assert_eq!(set.sum(), 0);
        for amount in [10, -4, 10] {
            set.insert(amount);
        }
        assert_eq!(set.len(), 3);
        assert_eq!(set.sum(), 16);
        assert_eq!(set.min(), Some(-4));
        assert_eq!(set.max(), Some(10));
    }

    #[test]
    fn empty_set_answers_none() {
        let set = OrderedMultiset::new();
        assert_eq!(set.select(0), None);
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn select_matches_sorted_oracle_on_scrambled_input() {
        // Deterministic scramble with heavy duplication.
        let amounts: Vec<i64> = (0..2_048i64).map(|i| (i * 7_919) % 256).collect();
        let mut set = OrderedMultiset::new();
        for &amount in &amounts {
            set.insert(amount);
        }
        let mut oracle = amounts;
        oracle.sort_unstable();
        assert_eq!(set.sorted_values(), oracle);
        for rank in (0..oracle.len()).step_by(101) {
            assert_eq!(set.select(rank), Some(oracle[rank]));
        }
        assert_eq!(set.select(oracle.len()), None);
    }
}
