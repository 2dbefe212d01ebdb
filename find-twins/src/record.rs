//! Message records, stoplists, and their loaders.
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use crate::errors::{FindTwinsError, Result};

/// Identifier of a message author.
///
/// Both integer and string identifiers are accepted in the input.
/// Integers are ordered numerically and placed before every string.
/// Integers above `i64::MAX` are held as [`AuthorId::UInt`], so every
/// `UInt` is larger than every `Int`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(untagged)]
pub enum AuthorId {
    /// Numeric identifier.
    Int(i64),
    /// Numeric identifier that does not fit in `i64`.
    UInt(u64),
    /// Textual identifier.
    Str(String),
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::UInt(id) => write!(f, "{id}"),
            Self::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for AuthorId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<u64> for AuthorId {
    fn from(id: u64) -> Self {
        i64::try_from(id).map_or(Self::UInt(id), Self::Int)
    }
}

impl From<&str> for AuthorId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

impl From<String> for AuthorId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

/// One authored message.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MessageRecord {
    /// Who sent the message.
    pub author_id: AuthorId,
    /// Raw message text.
    pub message: String,
}

impl MessageRecord {
    /// Creates a record.
    pub fn new<A, S>(author_id: A, message: S) -> Self
    where
        A: Into<AuthorId>,
        S: Into<String>,
    {
        Self {
            author_id: author_id.into(),
            message: message.into(),
        }
    }
}

/// Loads records from JSON Lines, one object per line.
///
/// Any line that is not an object with `author_id` and `message` aborts the load.
pub fn load_records<R>(rdr: R) -> Result<Vec<MessageRecord>>
where
    R: BufRead,
{
    let mut records = vec![];
    for (i, line) in rdr.lines().enumerate() {
        let line = line?;
        let record =
            serde_json::from_str(&line).map_err(|e| FindTwinsError::parse(i + 1, e))?;
        records.push(record);
    }
    Ok(records)
}

/// Loads records from a JSON Lines file.
pub fn load_records_from_path<P>(path: P) -> Result<Vec<MessageRecord>>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    load_records(BufReader::new(file))
}

/// Loads a stoplist with one word per line.
///
/// Surrounding whitespace is trimmed and blank lines are skipped.
pub fn load_stoplist<R>(rdr: R) -> Result<Vec<String>>
where
    R: BufRead,
{
    let mut words = vec![];
    for line in rdr.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

/// Loads a stoplist file.
pub fn load_stoplist_from_path<P>(path: P) -> Result<Vec<String>>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    load_stoplist(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_mixed_ids() {
        let data = "{\"author_id\": \"alice\", \"message\": \"Hello there\"}\n\
                    {\"author_id\": 42, \"message\": \"hi\", \"ts\": 1}\n";
        let records = load_records(data.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                MessageRecord::new("alice", "Hello there"),
                MessageRecord::new(42i64, "hi"),
            ]
        );
    }

    #[test]
    fn test_load_empty() {
        let records = load_records("".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_message() {
        let data = "{\"author_id\": \"a\", \"message\": \"ok then\"}\n{\"author_id\": \"b\"}\n";
        let err = load_records(data.as_bytes()).unwrap_err();
        assert!(matches!(err, FindTwinsError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_null_author() {
        let data = "{\"author_id\": null, \"message\": \"ok then\"}\n";
        let err = load_records(data.as_bytes()).unwrap_err();
        assert!(matches!(err, FindTwinsError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_blank_line() {
        let data = "{\"author_id\": \"a\", \"message\": \"x\"}\n\n{\"author_id\": \"b\", \"message\": \"y\"}\n";
        let err = load_records(data.as_bytes()).unwrap_err();
        assert!(matches!(err, FindTwinsError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_records_from_path("/nonexistent/messages.jsonl").unwrap_err();
        assert!(matches!(err, FindTwinsError::Io(_)));
    }

    #[test]
    fn test_load_large_ids() {
        let data = "{\"author_id\": 18446744073709551615, \"message\": \"see you at noon\"}\n\
                    {\"author_id\": 9223372036854775807, \"message\": \"see you at noon\"}\n\
                    {\"author_id\": -3, \"message\": \"see you at noon\"}\n";
        let records = load_records(data.as_bytes()).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.author_id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                AuthorId::UInt(u64::MAX),
                AuthorId::Int(i64::MAX),
                AuthorId::Int(-3),
            ]
        );
        assert!(AuthorId::Int(i64::MAX) < AuthorId::UInt(u64::MAX));
        assert!(AuthorId::UInt(u64::MAX) < AuthorId::from("0"));
        assert_eq!(AuthorId::UInt(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn test_from_u64() {
        assert_eq!(AuthorId::from(7u64), AuthorId::Int(7));
        assert_eq!(AuthorId::from(u64::MAX), AuthorId::UInt(u64::MAX));
    }

    #[test]
    fn test_load_stoplist() {
        let data = "  lol\n\nbrb  \n\t\n+1\n";
        let words = load_stoplist(data.as_bytes()).unwrap();
        assert_eq!(words, vec!["lol", "brb", "+1"]);
    }

    #[test]
    fn test_load_stoplist_empty() {
        assert!(load_stoplist("\n \n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_stoplist_file() {
        let err = load_stoplist_from_path("/nonexistent/stoplist.txt").unwrap_err();
        assert!(matches!(err, FindTwinsError::Io(_)));
    }

    #[test]
    fn test_author_order() {
        let mut ids = vec![
            AuthorId::from("b"),
            AuthorId::from(10i64),
            AuthorId::from("a"),
            AuthorId::from(9i64),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                AuthorId::from(9i64),
                AuthorId::from(10i64),
                AuthorId::from("a"),
                AuthorId::from("b"),
            ]
        );
        assert_eq!(AuthorId::from(10i64).to_string(), "10");
        assert_eq!(AuthorId::from("a").to_string(), "a");
    }
}
