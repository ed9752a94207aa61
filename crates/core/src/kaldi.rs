//! Writers for the Kaldi data directory.
//!
//! ```text
//! data/
//!   train/ test/   wav.scp utt2spk text
//!   dict/          lexicon.txt nonsilence_phones.txt silence_phones.txt
//!                  optional_silence.txt extra_questions.txt
//!   lm/            train_nounk.txt wordlist.txt
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::dictionary::DictionaryExport;
use crate::error::Result;
use crate::questions::{render_optional_silence, render_silence_phones};
use crate::transcripts::TranscriptMap;

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)?;
    log::info!("{} written.", path.display());
    Ok(())
}

/// Write `wav.scp`, `utt2spk` and `text` for one split. Every utterance is
/// its own speaker.
pub fn export_kaldi_data(dir: &Path, transcripts: &TranscriptMap) -> Result<()> {
    log::info!("Exporting kaldi data to {}...", dir.display());
    std::fs::create_dir_all(dir)?;

    let mut wav_scp = BufWriter::new(File::create(dir.join("wav.scp"))?);
    let mut utt2spk = BufWriter::new(File::create(dir.join("utt2spk"))?);
    let mut text = BufWriter::new(File::create(dir.join("text"))?);

    for (utt_id, utt) in transcripts {
        writeln!(text, "{} {}", utt_id, utt.transcript)?;
        writeln!(wav_scp, "{} {}", utt_id, utt.audio_path)?;
        writeln!(utt2spk, "{} {}", utt_id, utt_id)?;
    }

    wav_scp.flush()?;
    utt2spk.flush()?;
    text.flush()?;
    Ok(())
}

/// Write the five `dict/` files.
pub fn write_dict_dir(dir: &Path, export: &DictionaryExport) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    write_file(&dir.join("lexicon.txt"), &export.render_lexicon())?;
    write_file(
        &dir.join("nonsilence_phones.txt"),
        &export.inventory.render_nonsilence_phones(),
    )?;
    write_file(&dir.join("silence_phones.txt"), &render_silence_phones())?;
    write_file(&dir.join("optional_silence.txt"), &render_optional_silence())?;
    write_file(&dir.join("extra_questions.txt"), &export.questions().render())?;
    Ok(())
}

/// Write the language model training text and word list.
///
/// Returns the `lm/` directory. Estimating the model itself (e.g. with
/// KenLM's `lmplz`) is left to the caller.
pub fn write_lm_training_data<'a>(
    data_dir: &Path,
    tokens: impl IntoIterator<Item = &'a str>,
    transcripts: &TranscriptMap,
) -> Result<PathBuf> {
    let lm_dir = data_dir.join("lm");
    std::fs::create_dir_all(&lm_dir)?;

    let mut text = String::new();
    for utt in transcripts.values() {
        text.push_str(&utt.transcript);
        text.push('\n');
    }
    write_file(&lm_dir.join("train_nounk.txt"), &text)?;

    let mut wordlist = String::new();
    for token in tokens {
        wordlist.push_str(token);
        wordlist.push('\n');
    }
    write_file(&lm_dir.join("wordlist.txt"), &wordlist)?;

    Ok(lm_dir)
}
