//! Folding of IPA look-alikes onto canonical IPA.
//!
//! Hand-edited lexica mix ASCII stand-ins (`'`, `:`, `g`) and precomposed
//! ligatures with proper IPA. Normalizing at load time keeps the stored
//! pronunciations comparable and lets the X-SAMPA table stay small.

use super::IpaNormalizer;

/// Replacements applied in order.
const IPA_NORMALIZATION: &[(&str, &str)] = &[
    ("'", "ˈ"),
    ("’", "ˈ"),
    ("ˊ", "ˈ"),
    (",", "ˌ"),
    (":", "ː"),
    ("g", "ɡ"),
    ("ʦ", "t͡s"),
    ("ʣ", "d͡z"),
    ("ʧ", "t͡ʃ"),
    ("ʤ", "d͡ʒ"),
    ("\u{0361}\u{0361}", "\u{0361}"),
    ("ɚ", "əɹ"),
    ("ɝ", "ɜɹ"),
    ("ɩ", "ɪ"),
    ("ɷ", "ʊ"),
];

/// The built-in [`IpaNormalizer`]: table replacements plus whitespace removal.
#[derive(Debug, Clone, Default)]
pub struct DefaultNormalizer;

impl IpaNormalizer for DefaultNormalizer {
    fn normalize(&self, ipa: &str) -> String {
        let mut out: String = ipa.chars().filter(|c| !c.is_whitespace()).collect();
        for &(from, to) in IPA_NORMALIZATION {
            // repeat until stable: a single pass leaves "͡͡" behind "͡͡͡"
            while out.contains(from) {
                out = out.replace(from, to);
            }
        }
        out
    }
}
