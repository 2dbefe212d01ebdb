//! Combination of the two suspicion signals.
use crate::pair::{AuthorPair, SuspicionSet};

/// Pairs flagged by both signals.
pub fn combine(duplicate_pairs: &SuspicionSet, vocabulary_pairs: &SuspicionSet) -> SuspicionSet {
    duplicate_pairs.intersection(vocabulary_pairs)
}

/// Outcome of a detection run.
#[derive(Clone, Debug, Default)]
pub struct TwinReport {
    duplicate_pairs: SuspicionSet,
    vocabulary_pairs: SuspicionSet,
    twins: SuspicionSet,
}

impl TwinReport {
    /// Creates the report of two suspicion sets.
    pub fn new(duplicate_pairs: SuspicionSet, vocabulary_pairs: SuspicionSet) -> Self {
        let twins = combine(&duplicate_pairs, &vocabulary_pairs);
        Self {
            duplicate_pairs,
            vocabulary_pairs,
            twins,
        }
    }

    /// Pairs sharing at least one identical message.
    pub const fn duplicate_pairs(&self) -> &SuspicionSet {
        &self.duplicate_pairs
    }

    /// Pairs with similar vocabulary.
    pub const fn vocabulary_pairs(&self) -> &SuspicionSet {
        &self.vocabulary_pairs
    }

    /// Twin pairs in canonical sorted order.
    pub fn twins(&self) -> Vec<&AuthorPair> {
        self.twins.sorted()
    }

    /// Gets the number of twin pairs.
    pub fn len(&self) -> usize {
        self.twins.len()
    }

    /// Checks if no twins were found.
    pub fn is_empty(&self) -> bool {
        self.twins.is_empty()
    }

    /// Consumes the report, returning twin pairs in canonical sorted order.
    pub fn into_twins(self) -> Vec<AuthorPair> {
        self.twins.into_sorted_vec()
    }
}
