//! IPA normalization and transcription into Kaldi phone symbols.
//!
//! The raw IPA → X-SAMPA conversion sits behind [`PhoneMapper`] so the
//! cleanup rules and inventory logic can be exercised without the real
//! phonetic tables. [`Transcriber`] applies the cleanup that turns mapper
//! output into a phone sequence a Kaldi `lexicon.txt` will accept.

pub mod normalize;
pub mod xsampa;

pub use normalize::DefaultNormalizer;
pub use xsampa::XSampaMapper;

use crate::error::{EmptyPhone, Result};

/// Stress marker emitted by the mapper in front of a stressed phone.
pub const STRESS_MARK: char = '\'';

/// Syllable boundary marker, dropped from the final phone string.
pub const SYLLABLE_BOUNDARY: char = '-';

/// Reserved by Kaldi for disambiguation symbols, so never a phone name.
pub const PLACEHOLDER: char = '#';

/// Phone code substituted for [`PLACEHOLDER`].
pub const FILLER_PHONE: &str = "nC";

/// Folds an IPA string into the canonical form stored in the lexicon.
pub trait IpaNormalizer {
    fn normalize(&self, ipa: &str) -> String;
}

impl<F> IpaNormalizer for F
where
    F: Fn(&str) -> String,
{
    fn normalize(&self, ipa: &str) -> String {
        self(ipa)
    }
}

/// Converts normalized IPA into target phone symbols.
///
/// With `use_spaces` the output is space-delimited; stress marks and
/// syllable boundaries come out as their own space-separated symbols and
/// are bound or removed by [`cleanup`].
pub trait PhoneMapper {
    fn map(&self, token: &str, ipa: &str, use_spaces: bool) -> Result<String>;
}

impl<M: PhoneMapper + ?Sized> PhoneMapper for &M {
    fn map(&self, token: &str, ipa: &str, use_spaces: bool) -> Result<String> {
        (**self).map(token, ipa, use_spaces)
    }
}

/// Apply the post-mapping rules, in order:
///
/// 1. drop syllable boundaries,
/// 2. bind a stress mark to the phone after it, swallowing the spaces between,
/// 3. collapse runs of spaces,
/// 4. replace the placeholder with the filler phone.
///
/// Rule 2 drops every space after a stress mark, not just the first, so
/// `' - h` gives `'h` where a single `"' "` replacement would leave `' h`.
///
/// Leading or trailing spaces survive; they show up as empty phones.
pub fn cleanup(raw: &str) -> String {
    let unbounded: String = raw.chars().filter(|&c| c != SYLLABLE_BOUNDARY).collect();

    let mut bound = String::with_capacity(unbounded.len());
    let mut after_stress = false;
    for c in unbounded.chars() {
        if after_stress && c == ' ' {
            continue;
        }
        after_stress = c == STRESS_MARK;
        bound.push(c);
    }

    let mut collapsed = String::with_capacity(bound.len());
    let mut prev_space = false;
    for c in bound.chars() {
        if c == ' ' && prev_space {
            continue;
        }
        prev_space = c == ' ';
        collapsed.push(c);
    }

    collapsed.replace(PLACEHOLDER, FILLER_PHONE)
}

/// Strip the leading stress mark, giving the canonical phone.
///
/// Strips every leading mark, not only the first: doubled stress (`''a`
/// from IPA `ˈˈa`) also canonicalizes to `a`, and the result is stable
/// under repeated application.
pub fn strip_stress(phone: &str) -> &str {
    phone.trim_start_matches(STRESS_MARK)
}

/// Whether a surface phone carries a stress mark.
pub fn is_stressed(phone: &str) -> bool {
    phone.contains(STRESS_MARK)
}

/// One pronunciation run through the mapper and the cleanup rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    pub token: String,
    pub ipa: String,
    /// Mapper output before cleanup
    pub raw: String,
    /// Cleaned, space-delimited phone string
    pub surface: String,
    /// `surface` split on single spaces; may contain empty strings
    pub phones: Vec<String>,
}

impl Transcription {
    /// The defect record if any phone came out empty.
    pub fn empty_phone(&self) -> Option<EmptyPhone> {
        if self.phones.iter().any(|p| p.is_empty()) {
            Some(EmptyPhone {
                surface: self.surface.clone(),
                raw: self.raw.clone(),
                token: self.token.clone(),
                ipa: self.ipa.clone(),
            })
        } else {
            None
        }
    }

    /// Phones with the empty ones removed.
    pub fn valid_phones(&self) -> impl Iterator<Item = &str> {
        self.phones.iter().map(String::as_str).filter(|p| !p.is_empty())
    }
}

/// Runs a [`PhoneMapper`] and the cleanup rules over lexicon pronunciations.
pub struct Transcriber<M> {
    mapper: M,
}

impl<M: PhoneMapper> Transcriber<M> {
    pub fn new(mapper: M) -> Self {
        Self { mapper }
    }

    pub fn transcribe(&self, token: &str, ipa: &str, use_spaces: bool) -> Result<Transcription> {
        let raw = self.mapper.map(token, ipa, use_spaces)?;
        let surface = cleanup(&raw);
        let phones = surface.split(' ').map(|p| p.to_string()).collect();
        Ok(Transcription {
            token: token.to_string(),
            ipa: ipa.to_string(),
            raw,
            surface,
            phones,
        })
    }
}

impl Default for Transcriber<XSampaMapper> {
    fn default() -> Self {
        Self::new(XSampaMapper::default())
    }
}
