//! Pronunciation lexicon load/save.
//!
//! File format: one `key;ipa` record per line, UTF-8, ending at the first
//! blank line or EOF. Keys may carry a `_N` suffix to mark alternate
//! pronunciations of the same word (`haus`, `haus_2`); all of them are
//! reachable through [`Lexicon::lookup_variants`].

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::phonetics::IpaNormalizer;

/// Separates the key from the IPA field.
pub const FIELD_SEPARATOR: char = ';';

/// Separates the base token from a variant suffix.
pub const VARIANT_SEPARATOR: char = '_';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    /// Normalized IPA pronunciation
    pub ipa: String,
}

impl LexiconEntry {
    pub fn new(ipa: impl Into<String>) -> Self {
        Self { ipa: ipa.into() }
    }
}

/// The base token a key is grouped under: everything before the first `_`.
pub fn base_token(key: &str) -> &str {
    key.split(VARIANT_SEPARATOR).next().unwrap_or(key)
}

/// Pronunciation entries indexed by key and by base token.
///
/// Both indices are private and only changed together, so every key is
/// always present in exactly one base group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    entries: BTreeMap<String, LexiconEntry>,
    groups: BTreeMap<String, BTreeMap<String, LexiconEntry>>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a lexicon file, normalizing every pronunciation.
    ///
    /// A line without the `;` separator fails the whole load. When a key
    /// occurs twice the later line wins.
    pub fn load<N: IpaNormalizer + ?Sized>(path: &Path, normalizer: &N) -> Result<Self> {
        let file = File::open(path)?;
        let lex = Self::from_reader(BufReader::new(file), path, normalizer)?;
        log::info!("Loaded {} lexicon entries from {}", lex.len(), path.display());
        Ok(lex)
    }

    /// Parse lexicon records from a reader. `path` is only used in errors.
    pub fn from_reader<R: BufRead, N: IpaNormalizer + ?Sized>(
        reader: R,
        path: &Path,
        normalizer: &N,
    ) -> Result<Self> {
        let mut lex = Self::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }

            let mut parts = line.split(FIELD_SEPARATOR);
            let key = parts.next().unwrap_or_default();
            let ipa = parts.next().ok_or_else(|| Error::MalformedEntry {
                path: path.to_path_buf(),
                line_no: idx + 1,
                line: line.to_string(),
            })?;

            if lex.contains(key) {
                log::debug!("Duplicate lexicon key {:?} at line {}, overwriting", key, idx + 1);
            }
            lex.upsert(key, normalizer.normalize(ipa));
        }

        Ok(lex)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Pronunciation stored under exactly `key`.
    pub fn lookup(&self, key: &str) -> Result<&str> {
        self.entries
            .get(key)
            .map(|e| e.ipa.as_str())
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    /// Every entry sharing `key`'s base token, by full key.
    pub fn lookup_variants(&self, key: &str) -> Result<&BTreeMap<String, LexiconEntry>> {
        let base = base_token(key);
        self.groups
            .get(base)
            .filter(|g| !g.is_empty())
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    /// Keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Distinct base tokens in lexicographic order.
    pub fn base_tokens(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Add or replace an entry.
    pub fn upsert(&mut self, key: &str, ipa: impl Into<String>) {
        let entry = LexiconEntry::new(ipa);
        self.groups
            .entry(base_token(key).to_string())
            .or_default()
            .insert(key.to_string(), entry.clone());
        self.entries.insert(key.to_string(), entry);
    }

    /// Remove an entry, returning it. Absent keys are an error.
    pub fn remove(&mut self, key: &str) -> Result<LexiconEntry> {
        let entry = self
            .entries
            .remove(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;

        let base = base_token(key);
        if let Some(group) = self.groups.get_mut(base) {
            group.remove(key);
            if group.is_empty() {
                self.groups.remove(base);
            }
        }
        Ok(entry)
    }

    /// Write all entries in key order as `key;ipa` lines.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        for (key, entry) in &self.entries {
            writeln!(out, "{}{}{}", key, FIELD_SEPARATOR, entry.ipa)?;
        }
        out.flush()?;
        log::info!("{} written.", path.display());
        Ok(())
    }
}
