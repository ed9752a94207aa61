//! kaldiprep CLI: build a Kaldi data directory from transcripts and an IPA lexicon.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use kaldiprep_core::kaldi::write_dict_dir;
use kaldiprep_core::phonetics::{DefaultNormalizer, XSampaMapper};
use kaldiprep_core::pipeline::{build_dictionary, run, ExportConfig};

/// Exit status when the export finished but produced empty phones.
const EXIT_DEFECTS: i32 = 2;

// ─── Top-level CLI ───────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "kaldiprep",
    about = "Prepare Kaldi training data from a transcript CSV and an IPA lexicon",
    version,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write train/test data, dictionary and LM training text
    Export(ExportArgs),
    /// Write only the dictionary files for a lexicon
    Dict(DictArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Lexicon file (`key;ipa` per line)
    dict: PathBuf,

    /// Transcript CSV (`audio_path,transcript` per row)
    csv_path: PathBuf,

    /// Limit number of sentences (debug purposes only), 0 = all
    #[arg(short, long, default_value_t = 0)]
    debug: usize,

    /// Ratio of test to train split
    #[arg(long, default_value_t = 0.2)]
    test_split: f64,

    /// Output data directory (replaced on every run)
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// RNG seed for a reproducible train/test split
    #[arg(long)]
    seed: Option<u64>,

    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct DictArgs {
    /// Lexicon file (`key;ipa` per line)
    dict: PathBuf,

    /// Directory for lexicon.txt and the phone lists
    #[arg(long, default_value = "data/dict")]
    output_dir: PathBuf,

    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

// ─── Main ────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let log_level = match &cli.command {
        Command::Export(a) if a.verbose => "debug",
        Command::Dict(a) if a.verbose => "debug",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Command::Export(args) => run_export(args),
        Command::Dict(args) => run_dict(args),
    };

    match result {
        Ok(0) => {}
        Ok(defects) => {
            log::error!("{} pronunciation(s) produced empty phones", defects);
            std::process::exit(EXIT_DEFECTS);
        }
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

// ─── Runners ─────────────────────────────────────────────────────

/// Returns the number of defective pronunciations.
fn run_export(args: ExportArgs) -> Result<usize> {
    if !(0.0..=1.0).contains(&args.test_split) {
        bail!("--test-split must be between 0 and 1, got {}", args.test_split);
    }

    let config = ExportConfig {
        lexicon_path: args.dict,
        transcripts_path: args.csv_path,
        data_dir: args.data_dir,
        test_split: args.test_split,
        debug_limit: args.debug,
        seed: args.seed,
    };

    let summary = run(&config)?;

    println!(
        "{} train / {} test utterances",
        summary.train_utterances, summary.test_utterances
    );
    println!(
        "{} words, {} pronunciations, {} phones",
        summary.words, summary.dictionary_records, summary.surface_phones
    );
    println!("Output: {}", summary.data_dir.display());
    log::info!("All done.");

    Ok(summary.empty_phones.len())
}

fn run_dict(args: DictArgs) -> Result<usize> {
    let (lex, export) = build_dictionary(&args.dict, &DefaultNormalizer, XSampaMapper)?;
    write_dict_dir(&args.output_dir, &export)?;

    println!(
        "{} entries, {} pronunciations, {} phones",
        lex.len(),
        export.records.len(),
        export.inventory.surface_phones().count()
    );
    println!("Output: {}", args.output_dir.display());

    Ok(export.defects.len())
}
