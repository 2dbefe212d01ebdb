//! Grouping of identical messages and extraction of the authors who share them.
use hashbrown::{HashMap, HashSet};

use crate::combinations::PairIter;
use crate::pair::{AuthorPair, SuspicionSet};
use crate::record::{AuthorId, MessageRecord};
use crate::tokenize::{normalize_message, word_count};

/// Groups records by lowercased message text.
#[derive(Clone, Copy, Debug)]
pub struct MessageGrouper {
    words_more_than: usize,
}

impl MessageGrouper {
    /// Creates an instance.
    ///
    /// # Arguments
    ///
    /// * `words_more_than` - Only messages with more words than this value are grouped.
    pub const fn new(words_more_than: usize) -> Self {
        Self { words_more_than }
    }

    /// Builds the groups from records, keeping each group's authors in encounter order.
    pub fn group<'a, I>(&self, records: I) -> MessageGroups
    where
        I: IntoIterator<Item = &'a MessageRecord>,
    {
        let mut groups = MessageGroups::default();
        for record in records {
            let message = normalize_message(&record.message);
            if word_count(&message) <= self.words_more_than {
                continue;
            }
            groups.add(message, &record.author_id);
        }
        groups
    }
}

/// Mapping from a lowercased message to the distinct authors who sent it.
#[derive(Clone, Debug, Default)]
pub struct MessageGroups {
    index: HashMap<String, usize>,
    groups: Vec<(String, Vec<AuthorId>)>,
}

impl MessageGroups {
    fn add(&mut self, message: String, author: &AuthorId) {
        let groups = &mut self.groups;
        let &mut i = self.index.entry(message).or_insert_with_key(|message| {
            groups.push((message.clone(), vec![]));
            groups.len() - 1
        });
        let authors = &mut self.groups[i].1;
        if !authors.contains(author) {
            authors.push(author.clone());
        }
    }

    /// Gets the authors of a lowercased message.
    pub fn authors(&self, message: &str) -> Option<&[AuthorId]> {
        self.index
            .get(message)
            .map(|&i| self.groups[i].1.as_slice())
    }

    /// Iterates groups in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AuthorId])> {
        self.groups
            .iter()
            .map(|(message, authors)| (message.as_str(), authors.as_slice()))
    }

    /// Gets the number of distinct messages.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Checks if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Author lists of messages sent by two or more authors.
    ///
    /// Identical lists are kept once. Lists are compared in order,
    /// so the same authors listed in a different order form another entry.
    pub fn shared_author_lists(&self) -> Vec<&[AuthorId]> {
        let mut seen = HashSet::new();
        let mut lists = vec![];
        for (_, authors) in self.iter() {
            if authors.len() > 1 && seen.insert(authors) {
                lists.push(authors);
            }
        }
        lists
    }

    /// Every author pair that shares at least one message.
    pub fn duplicate_pairs(&self) -> SuspicionSet {
        let mut pairs = SuspicionSet::new();
        for authors in self.shared_author_lists() {
            pairs.extend(
                PairIter::new(authors).map(|(a, b)| AuthorPair::new(a.clone(), b.clone())),
            );
        }
        pairs
    }
}
