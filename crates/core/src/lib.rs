//! Kaldi training data preparation from a transcript CSV and an IPA lexicon.
//!
//! The lexicon is transcribed into X-SAMPA phones, giving `lexicon.txt`, the
//! phone inventory with stressed/unstressed variants grouped, and the extra
//! clustering questions Kaldi uses when building its phonetic trees.

pub mod dictionary;
pub mod error;
pub mod inventory;
pub mod kaldi;
pub mod lexicon;
pub mod phonetics;
pub mod pipeline;
pub mod questions;
pub mod transcripts;

pub use error::{EmptyPhone, Error, Result};
pub use lexicon::{Lexicon, LexiconEntry};
pub use pipeline::{ExportConfig, ExportSummary};
