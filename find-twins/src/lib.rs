//! Detection of twin accounts, i.e., distinct authors likely controlled by the same person.
//!
//! Two signals are computed independently from a corpus of messages:
//! authors who sent an identical message, and authors whose most frequent words overlap.
//! [`TwinDetector`] reports the author pairs flagged by both.
#![deny(missing_docs)]

pub mod detector;
pub mod errors;
pub mod frequency;
pub mod grouping;
pub mod pair;
pub mod record;
pub mod tokenize;
pub mod verdict;
pub mod vocabulary;

pub(crate) mod combinations;

pub use detector::{DetectorConfig, TwinDetector};
pub use pair::{AuthorPair, SuspicionSet};
pub use record::{AuthorId, MessageRecord};
pub use verdict::TwinReport;
