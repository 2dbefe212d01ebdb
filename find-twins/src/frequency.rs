//! Per-author word frequency profiles.
use std::cmp::Reverse;
use std::sync::atomic::{AtomicUsize, Ordering};

use hashbrown::{HashMap, HashSet};
use rayon::prelude::*;

use crate::record::{AuthorId, MessageRecord};
use crate::tokenize::Tokenizer;

const RECORDS_PER_SHARD: usize = 4096;

/// Word occurrence counts, remembering the order in which words were first seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordCounts {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
    total: usize,
}

impl WordCounts {
    /// Creates an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of the word.
    pub fn add(&mut self, word: &str) {
        self.add_count(word, 1);
    }

    /// Counts `count` occurrences of the word.
    pub fn add_count(&mut self, word: &str, count: usize) {
        if let Some(&i) = self.index.get(word) {
            self.entries[i].1 += count;
        } else {
            self.index.insert(word.to_string(), self.entries.len());
            self.entries.push((word.to_string(), count));
        }
        self.total += count;
    }

    /// Gets the count of the word.
    pub fn get(&self, word: &str) -> usize {
        self.index.get(word).map_or(0, |&i| self.entries[i].1)
    }

    /// Gets the sum of all counts.
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Gets the number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if no word was counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates words and counts in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// Gets the `k` most frequent words in descending order of count.
    /// Ties keep the order of first appearance.
    pub fn most_common(&self, k: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by_key(|&(_, c)| Reverse(c));
        ranked.truncate(k);
        ranked
    }

    /// Gets the set of the `k` most frequent words.
    pub fn top_words(&self, k: usize) -> HashSet<&str> {
        self.most_common(k).into_iter().map(|(w, _)| w).collect()
    }

    /// Adds all counts of `other`, appending its unseen words after the existing ones.
    pub fn merge(&mut self, other: &Self) {
        for (word, count) in other.iter() {
            self.add_count(word, count);
        }
    }
}

/// Word frequency profiles of all authors, in order of first appearance.
#[derive(Clone, Debug, Default)]
pub struct FrequencyProfiles {
    index: HashMap<AuthorId, usize>,
    profiles: Vec<(AuthorId, WordCounts)>,
}

impl FrequencyProfiles {
    fn profile_mut(&mut self, author: &AuthorId) -> &mut WordCounts {
        let i = match self.index.get(author) {
            Some(&i) => i,
            None => {
                self.index.insert(author.clone(), self.profiles.len());
                self.profiles.push((author.clone(), WordCounts::new()));
                self.profiles.len() - 1
            }
        };
        &mut self.profiles[i].1
    }

    /// Gets the profile of the author.
    pub fn get(&self, author: &AuthorId) -> Option<&WordCounts> {
        self.index.get(author).map(|&i| &self.profiles[i].1)
    }

    /// Iterates authors and their profiles.
    pub fn iter(&self) -> impl Iterator<Item = (&AuthorId, &WordCounts)> {
        self.profiles.iter().map(|(a, p)| (a, p))
    }

    /// Gets the number of authors.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Checks if there are no authors.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Adds the counts of `other`.
    ///
    /// Merging profiles built from consecutive slices of a corpus, left to right,
    /// yields the same profiles as building from the whole corpus.
    pub fn merge(&mut self, other: Self) {
        for (author, counts) in other.profiles {
            if self.index.contains_key(&author) {
                self.profile_mut(&author).merge(&counts);
            } else {
                self.index.insert(author.clone(), self.profiles.len());
                self.profiles.push((author, counts));
            }
        }
    }
}

/// Builds frequency profiles, skipping stoplisted words.
#[derive(Clone, Debug, Default)]
pub struct FrequencyModeler {
    stoplist: HashSet<String>,
}

impl FrequencyModeler {
    /// Creates an instance.
    ///
    /// # Arguments
    ///
    /// * `stoplist` - Words never counted. They are matched against tokens
    ///                after punctuation removal and lowercasing.
    pub fn new<I, S>(stoplist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stoplist: stoplist.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks if the word is stoplisted.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stoplist.contains(word)
    }

    /// Builds the profiles of all authors from records.
    ///
    /// Every author gets a profile, even if none of their words was counted.
    pub fn build<'a, I>(&self, records: I) -> FrequencyProfiles
    where
        I: IntoIterator<Item = &'a MessageRecord>,
    {
        let mut profiles = FrequencyProfiles::default();
        let mut tokenizer = Tokenizer::new();
        for (i, record) in records.into_iter().enumerate() {
            if (i + 1) % 1000 == 0 {
                tracing::debug!("Processed {} records...", i + 1);
            }
            self.add_record(&mut profiles, &mut tokenizer, record);
        }
        profiles
    }

    /// Builds the profiles in parallel over shards of records.
    ///
    /// The result is identical to [`FrequencyModeler::build`].
    pub fn build_in_parallel(&self, records: &[MessageRecord]) -> FrequencyProfiles {
        let processed = AtomicUsize::new(0);
        records
            .par_chunks(RECORDS_PER_SHARD)
            .map(|shard| {
                let profiles = self.build_shard(shard);
                let done = processed.fetch_add(shard.len(), Ordering::Relaxed) + shard.len();
                tracing::debug!("Processed {} of {} records...", done, records.len());
                profiles
            })
            .reduce(FrequencyProfiles::default, |mut lhs, rhs| {
                lhs.merge(rhs);
                lhs
            })
    }

    fn build_shard(&self, shard: &[MessageRecord]) -> FrequencyProfiles {
        let mut profiles = FrequencyProfiles::default();
        let mut tokenizer = Tokenizer::new();
        for record in shard {
            self.add_record(&mut profiles, &mut tokenizer, record);
        }
        profiles
    }

    fn add_record(
        &self,
        profiles: &mut FrequencyProfiles,
        tokenizer: &mut Tokenizer,
        record: &MessageRecord,
    ) {
        let profile = profiles.profile_mut(&record.author_id);
        for word in tokenizer.tokenize(&record.message) {
            if !self.is_stopword(word) {
                profile.add(word);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_counts() {
        let mut counts = WordCounts::new();
        for w in ["b", "a", "b", "c", "a", "b"] {
            counts.add(w);
        }
        assert_eq!(counts.get("a"), 2);
        assert_eq!(counts.get("b"), 3);
        assert_eq!(counts.get("z"), 0);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.most_common(2), vec![("b", 3), ("a", 2)]);
        assert_eq!(counts.most_common(10), vec![("b", 3), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn test_most_common_ties() {
        let mut counts = WordCounts::new();
        for w in ["x", "y", "z", "w", "z"] {
            counts.add(w);
        }
        assert_eq!(counts.most_common(3), vec![("z", 2), ("x", 1), ("y", 1)]);
    }

    #[test]
    fn test_merge_counts() {
        let mut lhs = WordCounts::new();
        lhs.add("a");
        lhs.add("b");
        let mut rhs = WordCounts::new();
        rhs.add("c");
        rhs.add_count("a", 2);
        lhs.merge(&rhs);
        assert_eq!(lhs.iter().collect::<Vec<_>>(), vec![("a", 3), ("b", 1), ("c", 1)]);
        assert_eq!(lhs.total(), 5);
    }

    #[test]
    fn test_build() {
        let records = vec![
            MessageRecord::new("a", "Thanks, the build is green!"),
            MessageRecord::new("b", "ok"),
            MessageRecord::new("a", "The build is RED."),
        ];
        let modeler = FrequencyModeler::new(["thanks", "ok"]);
        let profiles = modeler.build(&records);
        assert_eq!(profiles.len(), 2);

        let a = profiles.get(&AuthorId::from("a")).unwrap();
        assert_eq!(
            a.iter().collect::<Vec<_>>(),
            vec![("the", 2), ("build", 2), ("is", 2), ("green", 1), ("red", 1)]
        );
        assert_eq!(a.get("thanks"), 0);
    }

    #[test]
    fn test_stoplisted_only_author() {
        let records = vec![
            MessageRecord::new("a", "ok, thanks!"),
            MessageRecord::new("a", ":-) ..."),
        ];
        let profiles = FrequencyModeler::new(["ok", "thanks"]).build(&records);
        let a = profiles.get(&AuthorId::from("a")).unwrap();
        assert!(a.is_empty());
        assert_eq!(a.total(), 0);
    }

    #[test]
    fn test_empty_corpus() {
        let records: Vec<MessageRecord> = vec![];
        let profiles = FrequencyModeler::default().build(&records);
        assert!(profiles.is_empty());
    }

    #[test]
    fn test_merge_profiles() {
        let records = vec![
            MessageRecord::new("a", "one two"),
            MessageRecord::new("b", "three"),
            MessageRecord::new("a", "four two"),
            MessageRecord::new("c", "five"),
        ];
        let modeler = FrequencyModeler::default();
        let whole = modeler.build(&records);

        let mut merged = modeler.build(&records[..2]);
        merged.merge(modeler.build(&records[2..]));

        let lhs: Vec<_> = whole.iter().collect();
        let rhs: Vec<_> = merged.iter().collect();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_build_in_parallel() {
        let records: Vec<_> = (0..10_000)
            .map(|i| {
                let author = format!("u{}", i % 7);
                MessageRecord::new(author, format!("w{} w{} common", i % 13, i % 5))
            })
            .collect();
        let modeler = FrequencyModeler::new(["common"]);
        let sequential = modeler.build(&records);
        let parallel = modeler.build_in_parallel(&records);

        let lhs: Vec<_> = sequential.iter().collect();
        let rhs: Vec<_> = parallel.iter().collect();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_build_in_parallel_uneven_shards() {
        let records: Vec<_> = (0..RECORDS_PER_SHARD * 2 + 1)
            .map(|i| MessageRecord::new(format!("u{}", i % 3), format!("w{} tail", i % 11)))
            .collect();
        let modeler = FrequencyModeler::default();
        let sequential = modeler.build(&records);
        let parallel = modeler.build_in_parallel(&records);
        assert_eq!(parallel.len(), 3);

        let lhs: Vec<_> = sequential.iter().collect();
        let rhs: Vec<_> = parallel.iter().collect();
        assert_eq!(lhs, rhs);

        let total: usize = parallel.iter().map(|(_, counts)| counts.total()).sum();
        assert_eq!(total, records.len() * 2);
    }

    #[test]
    fn test_build_shard() {
        let records = [
            MessageRecord::new("a", "Thanks, see you"),
            MessageRecord::new("b", "see"),
        ];
        let modeler = FrequencyModeler::new(["thanks"]);
        let profiles = modeler.build_shard(&records);
        let lhs: Vec<_> = profiles.iter().collect();
        let sequential = modeler.build(&records);
        let rhs: Vec<_> = sequential.iter().collect();
        assert_eq!(lhs, rhs);
        assert_eq!(profiles.get(&AuthorId::from("a")).unwrap().total(), 2);
    }
}
