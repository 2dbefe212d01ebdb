//! Message normalization and word tokenization.

/// Lowercased message text, used as the key for exact-duplicate grouping.
pub fn normalize_message(message: &str) -> String {
    message.to_lowercase()
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Splits messages into lowercased words with ASCII punctuation removed.
///
/// The internal buffer is reused across calls.
#[derive(Default)]
pub struct Tokenizer {
    buffer: String,
}

impl Tokenizer {
    /// Creates an instance.
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Tokenizes the text, returning non-empty words.
    pub fn tokenize<'a>(&'a mut self, text: &str) -> impl Iterator<Item = &'a str> {
        self.buffer.clear();
        for c in text.chars().filter(|c| !c.is_ascii_punctuation()) {
            self.buffer.extend(c.to_lowercase());
        }
        self.buffer.split_whitespace()
    }
}
