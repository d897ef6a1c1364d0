use std::collections::BTreeSet;
use std::hash::Hash;

/// Type alias for sets, we use this to hide which kind of set we are actually
/// using. Iteration order is insertion order, which keeps derived automata and
/// partitions deterministic.
pub type Set<S> = indexmap::IndexSet<S>;

/// Type alias for maps, with the same iteration-stability guarantee as [`Set`].
pub type Map<K, V> = indexmap::IndexMap<K, V>;

/// Type alias for ordered sets, used for the blocks of a [`Partition`].
pub type OrderedSet<S> = BTreeSet<S>;

/// A partition groups elements of type `I` into pairwise-disjoint, non-empty
/// blocks. For automata the elements are states and the blocks are classes of
/// an equivalence relation, so two partitions are considered equal when they
/// contain the same blocks, regardless of block order.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<OrderedSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<OrderedSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a OrderedSet<I>;
    type IntoIter = std::slice::Iter<'a, OrderedSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord> Partition<I> {
    /// Returns the size of the partition, i.e. the number of blocks.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns the index of the block containing `element`, if any. Since
    /// blocks are disjoint, this index is unique; it doubles as the state
    /// identifier in a quotient automaton.
    pub fn class_of(&self, element: &I) -> Option<usize> {
        self.0.iter().position(|block| block.contains(element))
    }

    /// Builds a new partition from an iterator that yields iterators which
    /// yield elements of type `I`. Empty blocks are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<OrderedSet<_>>())
                .filter(|block| !block.is_empty())
                .collect(),
        )
    }
}

impl<I: Hash + Eq + Ord> From<Vec<OrderedSet<I>>> for Partition<I> {
    fn from(value: Vec<OrderedSet<I>>) -> Self {
        Self(value)
    }
}

/// Computes the greatest common divisor of `a` and `b` by the Euclidean
/// algorithm. `gcd(0, 0)` is `0`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Computes the least common multiple of `a` and `b`, with `lcm(0, x) == 0`.
pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b)) * b
}
