//! Error definitions.
use std::{io, result};

use thiserror::Error;

/// A specialized Result type for this library.
pub type Result<T, E = FindTwinsError> = result::Result<T, E>;

/// Errors in this library.
#[derive(Debug, Error)]
pub enum FindTwinsError {
    /// Contains [`InputError`].
    #[error(transparent)]
    Input(#[from] InputError),

    /// Error used when the input file cannot be read.
    #[error("IoError: {0}")]
    Io(#[from] io::Error),

    /// Error used when a line is not a valid message record.
    #[error("ParseError: line {line}: {source}")]
    Parse {
        /// 1-based line number of the malformed record.
        line: usize,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },
}

impl FindTwinsError {
    pub(crate) fn input<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Input(InputError { msg: msg.into() })
    }

    pub(crate) const fn parse(line: usize, source: serde_json::Error) -> Self {
        Self::Parse { line, source }
    }
}

/// Error used when the input argument is invalid.
#[derive(Debug, Error)]
#[error("InputError: {msg}")]
pub struct InputError {
    msg: String,
}
