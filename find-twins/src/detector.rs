//! End-to-end detection of twin accounts.
use crate::errors::Result;
use crate::frequency::FrequencyModeler;
use crate::grouping::MessageGrouper;
use crate::record::MessageRecord;
use crate::verdict::TwinReport;
use crate::vocabulary::{
    ScoringRule, VocabularyScorer, DEFAULT_MIN_TOTAL_WORDS, DEFAULT_MIN_WORDS, DEFAULT_THRESHOLD,
    DEFAULT_TOP_K,
};

/// Filler words excluded from frequency profiles by default.
pub const DEFAULT_STOPLIST: [&str; 12] = [
    "+1", "done", "thanks", "hi", "thank", ":-)", "ok", "please", "looks", "good", "nice", "sure",
];

/// Default word count a message must exceed to be grouped.
pub const DEFAULT_WORDS_MORE_THAN: usize = 1;

/// Parameters of [`TwinDetector`].
#[derive(Clone, Debug)]
pub struct DetectorConfig {
    words_more_than: usize,
    top_k: usize,
    threshold: f64,
    min_words: usize,
    min_total_words: usize,
    rule: ScoringRule,
    stoplist: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            words_more_than: DEFAULT_WORDS_MORE_THAN,
            top_k: DEFAULT_TOP_K,
            threshold: DEFAULT_THRESHOLD,
            min_words: DEFAULT_MIN_WORDS,
            min_total_words: DEFAULT_MIN_TOTAL_WORDS,
            rule: ScoringRule::Adaptive,
            stoplist: DEFAULT_STOPLIST.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl DetectorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the word count a message must exceed to be grouped.
    pub fn words_more_than(mut self, words_more_than: usize) -> Self {
        self.words_more_than = words_more_than;
        self
    }

    /// Sets the number of top words compared per author.
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Sets the minimum ratio of shared top words.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the word total below which the threshold is lowered.
    pub fn min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    /// Sets the word total both authors need under [`ScoringRule::Coefficient`].
    pub fn min_total_words(mut self, min_total_words: usize) -> Self {
        self.min_total_words = min_total_words;
        self
    }

    /// Sets the scoring rule.
    pub fn rule(mut self, rule: ScoringRule) -> Self {
        self.rule = rule;
        self
    }

    /// Replaces the stoplist.
    pub fn stoplist<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stoplist = words.into_iter().map(Into::into).collect();
        self
    }

    /// Adds words to the stoplist.
    pub fn extend_stoplist<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stoplist.extend(words.into_iter().map(Into::into));
        self
    }

    /// Gets the stoplist.
    pub fn stoplist_words(&self) -> &[String] {
        &self.stoplist
    }
}

/// Detector of twin accounts.
///
/// Two independent signals are computed over the records:
/// authors sharing an identical message, and authors with similar top words.
/// Only pairs flagged by both are reported.
pub struct TwinDetector {
    grouper: MessageGrouper,
    modeler: FrequencyModeler,
    scorer: VocabularyScorer,
    in_parallel: bool,
}

impl TwinDetector {
    /// Creates an instance, validating the configuration.
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        let scorer = VocabularyScorer::new(config.top_k, config.threshold)?
            .min_words(config.min_words)
            .min_total_words(config.min_total_words)
            .rule(config.rule);
        tracing::info!(
            "Comparing top {} words with threshold {} under the {:?} rule, {} stop words",
            scorer.top_k(),
            scorer.threshold(),
            config.rule,
            config.stoplist.len()
        );
        Ok(Self {
            grouper: MessageGrouper::new(config.words_more_than),
            modeler: FrequencyModeler::new(config.stoplist.iter().cloned()),
            scorer,
            in_parallel: false,
        })
    }

    /// Builds profiles and compares authors on the rayon thread pool?
    pub fn in_parallel(mut self, yes: bool) -> Self {
        self.in_parallel = yes;
        self
    }

    /// Runs both signals over the records and combines them.
    pub fn detect(&self, records: &[MessageRecord]) -> TwinReport {
        tracing::info!("Grouping {} records by message...", records.len());
        let groups = self.grouper.group(records);
        let duplicate_pairs = groups.duplicate_pairs();
        tracing::info!(
            "Found {} distinct messages, {} author pairs sharing a message",
            groups.len(),
            duplicate_pairs.len()
        );

        tracing::info!("Building frequency profiles...");
        let profiles = if self.in_parallel {
            self.modeler.build_in_parallel(records)
        } else {
            self.modeler.build(records)
        };
        let vocabulary_pairs = if self.in_parallel {
            self.scorer.similar_pairs_in_parallel(&profiles)
        } else {
            self.scorer.similar_pairs(&profiles)
        };
        tracing::info!(
            "Compared {} authors, {} author pairs with similar vocabulary",
            profiles.len(),
            vocabulary_pairs.len()
        );

        let report = TwinReport::new(duplicate_pairs, vocabulary_pairs);
        tracing::info!("Detected {} twin pairs", report.len());
        report
    }
}
