//! Pairwise comparison of the most frequent words of authors.
use std::str::FromStr;

use hashbrown::HashSet;
use rayon::prelude::*;

use crate::combinations::{num_pairs, PairIter};
use crate::errors::{FindTwinsError, Result};
use crate::frequency::{FrequencyProfiles, WordCounts};
use crate::pair::{AuthorPair, SuspicionSet};
use crate::record::AuthorId;

/// Default number of top words to compare.
pub const DEFAULT_TOP_K: usize = 10;

/// Default minimum ratio of shared top words.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Default word total below which the adaptive rule lowers the threshold.
pub const DEFAULT_MIN_WORDS: usize = 3;

/// Default word total required by both authors under the coefficient rule.
pub const DEFAULT_MIN_TOTAL_WORDS: usize = 10;

/// How the overlap of two top-word sets is judged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoringRule {
    /// Shared words divided by `top_k`, against a threshold lowered for sparse profiles.
    Adaptive,
    /// Shared words divided by the longer top-word list, skipping sparse profiles.
    Coefficient,
}

impl FromStr for ScoringRule {
    type Err = &'static str;
    fn from_str(rule: &str) -> Result<Self, Self::Err> {
        match rule {
            "adaptive" => Ok(Self::Adaptive),
            "coefficient" => Ok(Self::Coefficient),
            _ => Err("Could not parse a scoring rule"),
        }
    }
}

/// Threshold after adapting to the word totals of two authors.
///
/// If either total is below `min_words`, the threshold is scaled down
/// linearly with the smaller total. It is never raised.
pub fn adjusted_threshold(
    threshold: f64,
    min_words: usize,
    lhs_total: usize,
    rhs_total: usize,
) -> f64 {
    let fewest = lhs_total.min(rhs_total);
    if fewest < min_words {
        threshold * (1. - (min_words - fewest) as f64 / min_words as f64)
    } else {
        threshold
    }
}

struct TopWords<'a> {
    author: &'a AuthorId,
    words: HashSet<&'a str>,
    total: usize,
}

/// Scorer of vocabulary similarity between authors.
#[derive(Clone, Copy, Debug)]
pub struct VocabularyScorer {
    top_k: usize,
    threshold: f64,
    min_words: usize,
    min_total_words: usize,
    rule: ScoringRule,
}

impl VocabularyScorer {
    /// Creates an instance with the adaptive rule.
    ///
    /// # Arguments
    ///
    /// * `top_k` - Number of most frequent words compared per author (must be more than 0).
    /// * `threshold` - Minimum ratio of shared top words in the range of [0,1].
    pub fn new(top_k: usize, threshold: f64) -> Result<Self> {
        if top_k == 0 {
            return Err(FindTwinsError::input("Top-k must not be 0."));
        }
        if !(0. ..=1.).contains(&threshold) {
            return Err(FindTwinsError::input(format!(
                "Threshold must be in the range of [0,1], but got {threshold}."
            )));
        }
        Ok(Self {
            top_k,
            threshold,
            min_words: DEFAULT_MIN_WORDS,
            min_total_words: DEFAULT_MIN_TOTAL_WORDS,
            rule: ScoringRule::Adaptive,
        })
    }

    /// Sets the word total below which the adaptive rule lowers the threshold.
    pub const fn min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    /// Sets the word total both authors need under the coefficient rule.
    pub const fn min_total_words(mut self, min_total_words: usize) -> Self {
        self.min_total_words = min_total_words;
        self
    }

    /// Sets the scoring rule.
    pub const fn rule(mut self, rule: ScoringRule) -> Self {
        self.rule = rule;
        self
    }

    /// Gets the number of compared top words.
    pub const fn top_k(&self) -> usize {
        self.top_k
    }

    /// Gets the base threshold.
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Checks if two profiles are similar enough to be suspicious.
    pub fn is_suspicious(&self, lhs: &WordCounts, rhs: &WordCounts) -> bool {
        let lhs_words = lhs.top_words(self.top_k);
        let rhs_words = rhs.top_words(self.top_k);
        self.judge(&lhs_words, lhs.total(), &rhs_words, rhs.total())
    }

    fn judge(
        &self,
        lhs_words: &HashSet<&str>,
        lhs_total: usize,
        rhs_words: &HashSet<&str>,
        rhs_total: usize,
    ) -> bool {
        match self.rule {
            ScoringRule::Adaptive => {
                let common = lhs_words.intersection(rhs_words).count();
                if common == 0 {
                    return false;
                }
                let threshold =
                    adjusted_threshold(self.threshold, self.min_words, lhs_total, rhs_total);
                common as f64 / self.top_k as f64 >= threshold
            }
            ScoringRule::Coefficient => {
                if lhs_total < self.min_total_words || rhs_total < self.min_total_words {
                    return false;
                }
                let longest = lhs_words.len().max(rhs_words.len());
                if longest == 0 {
                    return false;
                }
                let common = lhs_words.intersection(rhs_words).count();
                common as f64 / longest as f64 >= self.threshold
            }
        }
    }

    fn top_words<'a>(&self, profiles: &'a FrequencyProfiles) -> Vec<TopWords<'a>> {
        profiles
            .iter()
            .map(|(author, counts)| TopWords {
                author,
                words: counts.top_words(self.top_k),
                total: counts.total(),
            })
            .collect()
    }

    fn pair_of(&self, lhs: &TopWords, rhs: &TopWords) -> Option<AuthorPair> {
        if self.judge(&lhs.words, lhs.total, &rhs.words, rhs.total) {
            tracing::debug!("Similar vocabulary: {} {}", lhs.author, rhs.author);
            Some(AuthorPair::new(lhs.author.clone(), rhs.author.clone()))
        } else {
            None
        }
    }

    /// Compares every pair of authors, returning the suspicious pairs.
    pub fn similar_pairs(&self, profiles: &FrequencyProfiles) -> SuspicionSet {
        let tops = self.top_words(profiles);
        tracing::debug!("Comparing {} pairs of authors...", num_pairs(tops.len()));
        PairIter::new(&tops)
            .filter_map(|(lhs, rhs)| self.pair_of(lhs, rhs))
            .collect()
    }

    /// Compares every pair of authors in parallel.
    ///
    /// The result is identical to [`VocabularyScorer::similar_pairs`].
    pub fn similar_pairs_in_parallel(&self, profiles: &FrequencyProfiles) -> SuspicionSet {
        let tops = self.top_words(profiles);
        tracing::debug!("Comparing {} pairs of authors...", num_pairs(tops.len()));
        let tops = &tops[..];
        let pairs: Vec<_> = tops
            .par_iter()
            .enumerate()
            .flat_map_iter(move |(i, lhs)| {
                tops[i + 1..]
                    .iter()
                    .filter_map(move |rhs| self.pair_of(lhs, rhs))
            })
            .collect();
        pairs.into_iter().collect()
    }
}

impl Default for VocabularyScorer {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            threshold: DEFAULT_THRESHOLD,
            min_words: DEFAULT_MIN_WORDS,
            min_total_words: DEFAULT_MIN_TOTAL_WORDS,
            rule: ScoringRule::Adaptive,
        }
    }
}
