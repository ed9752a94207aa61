//! End-to-end export: transcripts + lexicon → Kaldi data directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::dictionary::{export_dictionary, DictionaryExport};
use crate::error::EmptyPhone;
use crate::kaldi::{export_kaldi_data, write_dict_dir, write_lm_training_data};
use crate::lexicon::Lexicon;
use crate::phonetics::{DefaultNormalizer, IpaNormalizer, PhoneMapper, Transcriber, XSampaMapper};
use crate::transcripts::{read_transcripts, split_train_test, to_map};

/// Settings for one export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// `key;ipa` lexicon file
    pub lexicon_path: PathBuf,
    /// Headerless `audio_path,transcript` CSV
    pub transcripts_path: PathBuf,
    /// Output root; removed and recreated on every run
    pub data_dir: PathBuf,
    /// Share of utterances held out for testing
    pub test_split: f64,
    /// Use only the first N utterances (by id); 0 = all
    pub debug_limit: usize,
    /// RNG seed for a reproducible split
    pub seed: Option<u64>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            lexicon_path: PathBuf::from("dict.ipa"),
            transcripts_path: PathBuf::from("transcripts.csv"),
            data_dir: PathBuf::from("data"),
            test_split: 0.2,
            debug_limit: 0,
            seed: None,
        }
    }
}

/// What a run produced; also written as `manifest.json`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub data_dir: PathBuf,
    pub lexicon_entries: usize,
    pub words: usize,
    pub dictionary_records: usize,
    pub canonical_phones: usize,
    pub surface_phones: usize,
    pub train_utterances: usize,
    pub test_utterances: usize,
    pub empty_phones: Vec<EmptyPhone>,
}

impl ExportSummary {
    pub fn has_defects(&self) -> bool {
        !self.empty_phones.is_empty()
    }
}

/// Load a lexicon and transcribe it into a dictionary export.
pub fn build_dictionary<N, M>(
    lexicon_path: &Path,
    normalizer: &N,
    mapper: M,
) -> Result<(Lexicon, DictionaryExport)>
where
    N: IpaNormalizer + ?Sized,
    M: PhoneMapper,
{
    let lex = Lexicon::load(lexicon_path, normalizer)
        .with_context(|| format!("Failed to load lexicon: {}", lexicon_path.display()))?;
    let export = export_dictionary(&lex, &Transcriber::new(mapper))
        .with_context(|| format!("Failed to export dictionary from {}", lexicon_path.display()))?;
    Ok((lex, export))
}

/// Run the export with the built-in normalizer and X-SAMPA mapper.
pub fn run(config: &ExportConfig) -> Result<ExportSummary> {
    run_with(config, &DefaultNormalizer, XSampaMapper)
}

/// Run the export with injected phonetic collaborators.
///
/// Nothing is written until the lexicon has loaded and every pronunciation
/// has been transcribed.
pub fn run_with<N, M>(config: &ExportConfig, normalizer: &N, mapper: M) -> Result<ExportSummary>
where
    N: IpaNormalizer + ?Sized,
    M: PhoneMapper,
{
    let mut utterances = read_transcripts(&config.transcripts_path).with_context(|| {
        format!("Failed to read transcripts: {}", config.transcripts_path.display())
    })?;
    utterances.sort_by(|a, b| a.id.cmp(&b.id));
    if config.debug_limit > 0 && utterances.len() > config.debug_limit {
        log::info!("Debug limit: using {} of {} utterances", config.debug_limit, utterances.len());
        utterances.truncate(config.debug_limit);
    }

    let (train, test) = split_train_test(&utterances, config.test_split, config.seed);
    let ts_all = to_map(utterances);
    let ts_train = to_map(train);
    let ts_test = to_map(test);
    log::info!(
        "loading transcripts done, total: {} train, {} test samples.",
        ts_train.len(),
        ts_test.len()
    );

    let (lex, export) = build_dictionary(&config.lexicon_path, normalizer, mapper)?;

    let data_dir = &config.data_dir;
    if data_dir.is_dir() {
        std::fs::remove_dir_all(data_dir)
            .with_context(|| format!("Failed to clear {}", data_dir.display()))?;
    }
    std::fs::create_dir_all(data_dir)?;

    export_kaldi_data(&data_dir.join("train"), &ts_train)?;
    export_kaldi_data(&data_dir.join("test"), &ts_test)?;
    write_dict_dir(&data_dir.join("dict"), &export)?;
    write_lm_training_data(data_dir, export.words(), &ts_all)?;

    let summary = ExportSummary {
        data_dir: data_dir.clone(),
        lexicon_entries: lex.len(),
        words: export.words().len(),
        dictionary_records: export.records.len(),
        canonical_phones: export.inventory.len(),
        surface_phones: export.inventory.surface_phones().count(),
        train_utterances: ts_train.len(),
        test_utterances: ts_test.len(),
        empty_phones: export.defects.clone(),
    };

    let manifest_path = data_dir.join("manifest.json");
    std::fs::write(&manifest_path, serde_json::to_string_pretty(&summary)?)?;
    log::info!("{} written.", manifest_path.display());

    Ok(summary)
}
