//! Kaldi pronunciation dictionary export.
//!
//! Every pronunciation in the lexicon is transcribed to X-SAMPA phones and
//! recorded under its base token, so alternate pronunciations (`haus`,
//! `haus_2`) become repeated `haus ...` lines as Kaldi expects. Keys with
//! nothing before the first `_` (`_lead`) keep their full key. The phone
//! inventory is accumulated on the way.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{EmptyPhone, Result};
use crate::inventory::PhoneInventory;
use crate::lexicon::Lexicon;
use crate::phonetics::{PhoneMapper, Transcriber};
use crate::questions::{self, ClusteringQuestions};

/// Always the first record of `lexicon.txt`.
pub const SILENCE_RECORD: (&str, &str) = ("!SIL", "SIL");

/// One `lexicon.txt` line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictionaryRecord {
    pub token: String,
    pub phones: Vec<String>,
}

/// Everything derived from one pass over the lexicon.
#[derive(Debug, Clone, Default)]
pub struct DictionaryExport {
    pub records: Vec<DictionaryRecord>,
    pub inventory: PhoneInventory,
    pub defects: Vec<EmptyPhone>,
}

/// Transcribe every lexicon entry and build the dictionary and inventory.
///
/// Unmappable IPA fails the export. Empty phones are logged, left out of
/// the record and the inventory, and collected in `defects`.
pub fn export_dictionary<M: PhoneMapper>(
    lex: &Lexicon,
    transcriber: &Transcriber<M>,
) -> Result<DictionaryExport> {
    log::info!("Exporting dictionary...");
    let mut export = DictionaryExport::default();

    for token in lex.base_tokens() {
        for (key, entry) in lex.lookup_variants(token)? {
            let word = if token.is_empty() { key.as_str() } else { token };
            if word.is_empty() {
                log::warn!("Skipping lexicon entry with an empty key");
                continue;
            }
            let tr = transcriber.transcribe(word, &entry.ipa, true)?;

            if let Some(defect) = tr.empty_phone() {
                log::error!("****ERROR: {}", defect);
                export.defects.push(defect);
            }

            export.inventory.accumulate(tr.valid_phones());
            export.records.push(DictionaryRecord {
                token: word.to_string(),
                phones: tr.valid_phones().map(str::to_string).collect(),
            });
        }
    }

    log::info!(
        "Exporting dictionary ... done: {} records, {} phones, {} defects.",
        export.records.len(),
        export.inventory.len(),
        export.defects.len()
    );
    Ok(export)
}

impl DictionaryExport {
    pub fn has_defects(&self) -> bool {
        !self.defects.is_empty()
    }

    /// Distinct record tokens in lexicographic order.
    pub fn words(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.token.as_str()).collect()
    }

    /// Render `lexicon.txt`.
    pub fn render_lexicon(&self) -> String {
        let mut out = format!("{} {}\n", SILENCE_RECORD.0, SILENCE_RECORD.1);
        for record in &self.records {
            out.push_str(&record.token);
            for p in &record.phones {
                out.push(' ');
                out.push_str(p);
            }
            out.push('\n');
        }
        out
    }

    pub fn questions(&self) -> ClusteringQuestions {
        questions::export(&self.inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetics::XSampaMapper;

    struct UnderscoreMapper;

    impl PhoneMapper for UnderscoreMapper {
        fn map(&self, _token: &str, ipa: &str, use_spaces: bool) -> Result<String> {
            let sep = if use_spaces { " " } else { "" };
            Ok(ipa.split('_').collect::<Vec<_>>().join(sep))
        }
    }

    fn lexicon(entries: &[(&str, &str)]) -> Lexicon {
        let mut lex = Lexicon::new();
        for (k, v) in entries {
            lex.upsert(k, *v);
        }
        lex
    }

    #[test]
    fn test_single_entry_dictionary() {
        let lex = lexicon(&[("hello", "h_eh_l_oh")]);
        let export = export_dictionary(&lex, &Transcriber::new(UnderscoreMapper)).unwrap();
        assert_eq!(export.render_lexicon(), "!SIL SIL\nhello h eh l oh\n");
        assert_eq!(export.inventory.render_nonsilence_phones(), "eh \nh \nl \noh \n");
        assert!(!export.has_defects());
    }

    #[test]
    fn test_empty_lexicon_still_has_silence() {
        let export = export_dictionary(&Lexicon::new(), &Transcriber::new(UnderscoreMapper)).unwrap();
        assert_eq!(export.render_lexicon(), "!SIL SIL\n");
        assert!(export.inventory.is_empty());
    }

    #[test]
    fn test_variants_written_under_base_token() {
        let lex = lexicon(&[("hello", "h_eh_l_oh"), ("hello_2", "h_'a_l_oh"), ("abc", "a")]);
        let export = export_dictionary(&lex, &Transcriber::new(UnderscoreMapper)).unwrap();
        assert_eq!(
            export.render_lexicon(),
            "!SIL SIL\nabc a\nhello h eh l oh\nhello h 'a l oh\n"
        );
    }

    #[test]
    fn test_empty_base_token_keeps_full_key() {
        let lex = lexicon(&[("_lead", "a_b"), ("_x_2", "c"), ("zoo", "z")]);
        let export = export_dictionary(&lex, &Transcriber::new(UnderscoreMapper)).unwrap();
        assert_eq!(export.render_lexicon(), "!SIL SIL\n_lead a b\n_x_2 c\nzoo z\n");
        assert_eq!(export.words().into_iter().collect::<Vec<_>>(), vec!["_lead", "_x_2", "zoo"]);
    }

    #[test]
    fn test_empty_key_skipped() {
        let lex = lexicon(&[("", "a"), ("b", "b")]);
        let export = export_dictionary(&lex, &Transcriber::new(UnderscoreMapper)).unwrap();
        assert_eq!(export.render_lexicon(), "!SIL SIL\nb b\n");
    }

    #[test]
    fn test_words_deduplicate_variants() {
        let lex = lexicon(&[("hello", "h"), ("hello_2", "x"), ("abc", "a")]);
        let export = export_dictionary(&lex, &Transcriber::new(UnderscoreMapper)).unwrap();
        assert_eq!(export.records.len(), 3);
        assert_eq!(export.words().into_iter().collect::<Vec<_>>(), vec!["abc", "hello"]);
    }

    #[test]
    fn test_empty_phone_is_recorded_not_fatal() {
        let lex = lexicon(&[("bad", "-_b_a"), ("good", "g_u")]);
        let export = export_dictionary(&lex, &Transcriber::new(UnderscoreMapper)).unwrap();
        assert_eq!(export.defects.len(), 1);
        assert_eq!(export.defects[0].token, "bad");
        assert_eq!(export.render_lexicon(), "!SIL SIL\nbad b a\ngood g u\n");
        let phones: Vec<&str> = export.inventory.surface_phones().collect();
        assert_eq!(phones, vec!["a", "b", "g", "u"]);
    }

    #[test]
    fn test_unknown_symbol_fails_export() {
        let lex = lexicon(&[("snow", "☃")]);
        assert!(export_dictionary(&lex, &Transcriber::new(XSampaMapper)).is_err());
    }

    #[test]
    fn test_xsampa_stress_grouping() {
        let lex = lexicon(&[("haus", "ˈhaʊs"), ("hase", "ˈhaː.zə"), ("aha", "aˈha")]);
        let export = export_dictionary(&lex, &Transcriber::default()).unwrap();
        assert_eq!(
            export.render_lexicon(),
            "!SIL SIL\naha a 'h a\nhase 'h a: z @\nhaus 'h a U s\n"
        );
        let h: Vec<&str> = export
            .inventory
            .variants_of("h")
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(h, vec!["'h"]);

        let q = export.questions();
        assert_eq!(q.stressed, vec!["'h"]);
        assert!(q.unstressed.contains(&"a:".to_string()));
    }
}
