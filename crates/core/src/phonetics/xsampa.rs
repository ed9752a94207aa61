//! IPA to X-SAMPA conversion.
//!
//! Longest-match scan over a symbol table. Multi-character IPA sequences
//! (tied affricates, the syllabic nasal) win over their parts; diacritics
//! and length marks attach to the preceding phone.

use std::collections::HashMap;

use super::{PhoneMapper, PLACEHOLDER, STRESS_MARK, SYLLABLE_BOUNDARY};
use crate::error::{Error, Result};

/// How a matched IPA sequence contributes to the output.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Symbol {
    /// A phone of its own
    Phone(&'static str),
    /// Appended to the preceding phone
    Modifier(&'static str),
    PrimaryStress,
    SecondaryStress,
    Boundary,
}

lazy_static::lazy_static! {
    static ref IPA_TABLE: HashMap<&'static str, Symbol> = {
        let phones: &[(&str, &str)] = &[
            // vowels
            ("a", "a"), ("æ", "{"), ("ɐ", "6"), ("ɑ", "A"), ("ɒ", "Q"),
            ("e", "e"), ("ɛ", "E"), ("ə", "@"), ("ɜ", "3"), ("ɘ", "@\\"),
            ("ɞ", "3\\"), ("i", "i"), ("ɪ", "I"), ("ɨ", "1"), ("o", "o"),
            ("ɔ", "O"), ("ø", "2"), ("œ", "9"), ("ɶ", "&"), ("u", "u"),
            ("ʊ", "U"), ("ʉ", "}"), ("ʌ", "V"), ("ɯ", "M"), ("ɤ", "7"),
            ("y", "y"), ("ʏ", "Y"), ("ɵ", "8"),
            // consonants
            ("b", "b"), ("ɓ", "b_<"), ("c", "c"), ("ç", "C"), ("d", "d"),
            ("ɗ", "d_<"), ("ð", "D"), ("ɖ", "d`"), ("f", "f"), ("ɡ", "g"),
            ("g", "g"), ("ɣ", "G"), ("h", "h"), ("ɦ", "h\\"), ("ħ", "X\\"),
            ("j", "j"), ("ʝ", "j\\"), ("ɟ", "J\\"), ("k", "k"), ("l", "l"),
            ("ɫ", "5"), ("ɬ", "K"), ("ɮ", "K\\"), ("ɭ", "l`"), ("ʎ", "L"),
            ("m", "m"), ("ɱ", "F"), ("n", "n"), ("ɲ", "J"), ("ŋ", "N"),
            ("ɴ", "N\\"), ("ɳ", "n`"), ("p", "p"), ("ɸ", "p\\"), ("q", "q"),
            ("r", "r"), ("ɹ", "r\\"), ("ɻ", "r\\`"), ("ɾ", "4"), ("ʁ", "R"),
            ("ʀ", "R\\"), ("s", "s"), ("ʃ", "S"), ("ʂ", "s`"), ("ɕ", "s\\"),
            ("t", "t"), ("θ", "T"), ("ʈ", "t`"), ("v", "v"), ("ʋ", "v\\"),
            ("w", "w"), ("ʍ", "W"), ("ɥ", "H"), ("ɰ", "M\\"), ("x", "x"),
            ("χ", "X"), ("ɧ", "x\\"), ("z", "z"), ("ʒ", "Z"), ("ʐ", "z`"),
            ("ʑ", "z\\"), ("ʔ", "?"), ("ʕ", "?\\"), ("β", "B"), ("ʙ", "B\\"),
            ("ʜ", "H\\"),
            // tied affricates
            ("t͡s", "ts"), ("d͡z", "dz"), ("t͡ʃ", "tS"), ("d͡ʒ", "dZ"),
            ("p͡f", "pf"), ("t͡ɕ", "ts\\"), ("d͡ʑ", "dz\\"),
        ];
        let modifiers: &[(&str, &str)] = &[
            ("ː", ":"), ("ˑ", ":\\"), ("\u{0303}", "~"), ("ʰ", "_h"),
            ("\u{0329}", "="), ("\u{032F}", "_^"), ("ʲ", "_j"), ("ʷ", "_w"),
            ("ˀ", "_?\\"),
        ];

        let mut table = HashMap::new();
        for &(ipa, xs) in phones {
            table.insert(ipa, Symbol::Phone(xs));
        }
        for &(ipa, xs) in modifiers {
            table.insert(ipa, Symbol::Modifier(xs));
        }
        table.insert("ˈ", Symbol::PrimaryStress);
        table.insert("ˌ", Symbol::SecondaryStress);
        table.insert(".", Symbol::Boundary);
        // Kaldi has no syllabic-nasal phone; the placeholder is remapped
        // during cleanup.
        table.insert("n\u{0329}", Symbol::Phone("#"));
        table
    };

    /// Longest IPA key, in chars.
    static ref MAX_KEY_CHARS: usize = IPA_TABLE
        .keys()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(1);
}

/// The built-in IPA → X-SAMPA [`PhoneMapper`].
///
/// Primary stress becomes a separate `'` symbol, secondary stress is
/// dropped and `.` becomes the `-` syllable boundary.
#[derive(Debug, Clone, Default)]
pub struct XSampaMapper;

impl XSampaMapper {
    fn lookup_longest(chars: &[char], start: usize) -> Option<(Symbol, usize)> {
        let max = (*MAX_KEY_CHARS).min(chars.len() - start);
        for len in (1..=max).rev() {
            let candidate: String = chars[start..start + len].iter().collect();
            if let Some(&sym) = IPA_TABLE.get(candidate.as_str()) {
                return Some((sym, len));
            }
        }
        None
    }

    /// Convert one IPA string to X-SAMPA segments.
    fn segments(token: &str, ipa: &str) -> Result<Vec<String>> {
        let chars: Vec<char> = ipa.chars().collect();
        let mut segments: Vec<String> = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            if chars[i].is_whitespace() {
                i += 1;
                continue;
            }

            let (sym, len) =
                Self::lookup_longest(&chars, i).ok_or_else(|| Error::UnknownSymbol {
                    token: token.to_string(),
                    ipa: ipa.to_string(),
                    symbol: chars[i].to_string(),
                })?;

            match sym {
                Symbol::Phone(xs) => segments.push(xs.to_string()),
                Symbol::Modifier(xs) => match segments.last_mut() {
                    Some(last) if !is_marker(last) => last.push_str(xs),
                    _ => {
                        return Err(Error::UnknownSymbol {
                            token: token.to_string(),
                            ipa: ipa.to_string(),
                            symbol: chars[i..i + len].iter().collect(),
                        })
                    }
                },
                Symbol::PrimaryStress => segments.push(STRESS_MARK.to_string()),
                Symbol::SecondaryStress => {}
                Symbol::Boundary => segments.push(SYLLABLE_BOUNDARY.to_string()),
            }
            i += len;
        }

        Ok(segments)
    }
}

fn is_marker(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if c == STRESS_MARK || c == SYLLABLE_BOUNDARY || c == PLACEHOLDER
    )
}

impl PhoneMapper for XSampaMapper {
    fn map(&self, token: &str, ipa: &str, use_spaces: bool) -> Result<String> {
        let segments = Self::segments(token, ipa)?;
        let sep = if use_spaces { " " } else { "" };
        Ok(segments.join(sep))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetics::Transcriber;

    fn xs(ipa: &str) -> String {
        XSampaMapper.map("test", ipa, true).unwrap()
    }

    #[test]
    fn test_simple_phones() {
        assert_eq!(xs("haʊs"), "h a U s");
        assert_eq!(xs("ʃɪp"), "S I p");
    }

    #[test]
    fn test_without_spaces() {
        assert_eq!(XSampaMapper.map("haus", "haʊs", false).unwrap(), "haUs");
    }

    #[test]
    fn test_affricate_longest_match() {
        assert_eq!(xs("t͡ʃaʊ"), "tS a U");
        assert_eq!(xs("ts"), "t s");
    }

    #[test]
    fn test_modifiers_attach() {
        assert_eq!(xs("aːbə"), "a: b @");
        assert_eq!(xs("ʊ\u{032F}"), "U_^");
    }

    #[test]
    fn test_stress_and_boundary() {
        assert_eq!(xs("ˈha.lo"), "' h a - l o");
        assert_eq!(xs("ˌha"), "h a");
    }

    #[test]
    fn test_syllabic_nasal_placeholder() {
        assert_eq!(xs("ˈhaː.bn\u{0329}"), "' h a: - b #");
    }

    #[test]
    fn test_unknown_symbol() {
        let err = XSampaMapper.map("bad", "h☃", true).unwrap_err();
        match err {
            Error::UnknownSymbol { token, symbol, .. } => {
                assert_eq!(token, "bad");
                assert_eq!(symbol, "☃");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_leading_modifier_rejected() {
        assert!(XSampaMapper.map("bad", "ːa", true).is_err());
    }

    #[test]
    fn test_full_transcription() {
        let t = Transcriber::default();
        let tr = t.transcribe("haben", "ˈhaː.bn\u{0329}", true).unwrap();
        assert_eq!(tr.surface, "'h a: b nC");
        assert_eq!(tr.phones, vec!["'h", "a:", "b", "nC"]);
    }
}
