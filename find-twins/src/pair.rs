//! Canonical author pairs and sets of them.
use std::fmt;

use hashbrown::HashSet;

use crate::record::AuthorId;

/// Unordered pair of two distinct authors, stored with the smaller identifier first.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthorPair {
    first: AuthorId,
    second: AuthorId,
}

impl AuthorPair {
    /// Creates the canonical pair of `a` and `b`, in either order.
    pub fn new(a: AuthorId, b: AuthorId) -> Self {
        debug_assert_ne!(a, b);
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// Gets the smaller author.
    pub const fn first(&self) -> &AuthorId {
        &self.first
    }

    /// Gets the larger author.
    pub const fn second(&self) -> &AuthorId {
        &self.second
    }

    /// Consumes the pair, returning `(first, second)`.
    pub fn into_inner(self) -> (AuthorId, AuthorId) {
        (self.first, self.second)
    }
}

impl fmt::Display for AuthorPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

/// Author pairs flagged by one detection signal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuspicionSet {
    pairs: HashSet<AuthorPair>,
}

impl SuspicionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the pair of `a` and `b`, returning `false` if it was already present.
    pub fn insert(&mut self, a: AuthorId, b: AuthorId) -> bool {
        self.pairs.insert(AuthorPair::new(a, b))
    }

    /// Checks the pair of `a` and `b` in either order.
    pub fn contains(&self, a: &AuthorId, b: &AuthorId) -> bool {
        self.pairs.contains(&AuthorPair::new(a.clone(), b.clone()))
    }

    /// Checks a canonical pair.
    pub fn contains_pair(&self, pair: &AuthorPair) -> bool {
        self.pairs.contains(pair)
    }

    /// Pairs present in both sets.
    pub fn intersection(&self, other: &Self) -> Self {
        // Iterates the smaller side.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .pairs
            .iter()
            .filter(|pair| large.contains_pair(pair))
            .cloned()
            .collect()
    }

    /// Gets the number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &AuthorPair> {
        self.pairs.iter()
    }

    /// Pairs in canonical sorted order.
    pub fn sorted(&self) -> Vec<&AuthorPair> {
        let mut pairs: Vec<_> = self.pairs.iter().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Consumes the set, returning pairs in canonical sorted order.
    pub fn into_sorted_vec(self) -> Vec<AuthorPair> {
        let mut pairs: Vec<_> = self.pairs.into_iter().collect();
        pairs.sort_unstable();
        pairs
    }
}

impl FromIterator<AuthorPair> for SuspicionSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = AuthorPair>,
    {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl Extend<AuthorPair> for SuspicionSet {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = AuthorPair>,
    {
        self.pairs.extend(iter);
    }
}
