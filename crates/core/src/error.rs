//! Error types for lexicon loading and phonetic transcription.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors raised by the lexicon, transcriber and Kaldi writers.
#[derive(Error, Debug)]
pub enum Error {
    /// A lexicon line without the `;` field separator.
    #[error("malformed lexicon entry at {}:{line_no}: {line:?}", .path.display())]
    MalformedEntry {
        path: PathBuf,
        line_no: usize,
        line: String,
    },

    /// Lookup of an absent key or an empty variant group.
    #[error("key not found in lexicon: {0}")]
    KeyNotFound(String),

    /// The phone mapper met an IPA symbol it has no target for.
    #[error("no X-SAMPA mapping for {symbol:?} in {ipa:?} (token {token:?})")]
    UnknownSymbol {
        token: String,
        ipa: String,
        symbol: String,
    },

    /// Transcript CSV could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A transcription that produced a zero-length phone.
///
/// Logged and counted rather than returned: the rest of the dictionary is
/// still written.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("empty phoneme in: {surface:?} ({raw:?}, ipa: {ipa:?}, token: {token:?})")]
pub struct EmptyPhone {
    pub surface: String,
    pub raw: String,
    pub token: String,
    pub ipa: String,
}

pub type Result<T> = std::result::Result<T, Error>;
