//! Transcript CSV reading and train/test splitting.

use std::collections::BTreeMap;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::error::Result;

/// One `(audio_path, transcript)` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    /// Audio file basename
    pub id: String,
    pub audio_path: String,
    pub transcript: String,
}

/// Utterances keyed by id, iterated in id order.
pub type TranscriptMap = BTreeMap<String, Utterance>;

/// Read a headerless `audio_path,transcript` CSV.
pub fn read_transcripts(path: &Path) -> Result<Vec<Utterance>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut utterances = Vec::new();
    for record in reader.records() {
        let record = record?;
        let audio_path = record.get(0).unwrap_or_default().to_string();
        let transcript = record.get(1).unwrap_or_default().to_string();
        utterances.push(Utterance {
            id: utterance_id(&audio_path),
            audio_path,
            transcript,
        });
    }
    log::info!("Read {} transcripts from {}", utterances.len(), path.display());
    Ok(utterances)
}

/// The file name component of an audio path.
pub fn utterance_id(audio_path: &str) -> String {
    Path::new(audio_path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| audio_path.to_string())
}

/// Shuffle and split into `(train, test)`; the test share is rounded up.
///
/// If seed is provided, the split is deterministic.
pub fn split_train_test(
    utterances: &[Utterance],
    test_ratio: f64,
    seed: Option<u64>,
) -> (Vec<Utterance>, Vec<Utterance>) {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut shuffled = utterances.to_vec();
    shuffled.shuffle(&mut rng);

    let ratio = test_ratio.clamp(0.0, 1.0);
    let n_test = ((shuffled.len() as f64) * ratio).ceil() as usize;
    let train = shuffled.split_off(n_test);
    (train, shuffled)
}

/// Index utterances by id. Later rows win on repeated ids.
pub fn to_map(utterances: impl IntoIterator<Item = Utterance>) -> TranscriptMap {
    utterances.into_iter().map(|u| (u.id.clone(), u)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn utts(n: usize) -> Vec<Utterance> {
        (0..n)
            .map(|i| Utterance {
                id: format!("u{:03}.wav", i),
                audio_path: format!("/audio/u{:03}.wav", i),
                transcript: format!("sentence {}", i),
            })
            .collect()
    }

    #[test]
    fn test_utterance_id_is_basename() {
        assert_eq!(utterance_id("/data/wav/a1.wav"), "a1.wav");
        assert_eq!(utterance_id("b2.wav"), "b2.wav");
    }

    #[test]
    fn test_read_transcripts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ts.csv");
        std::fs::write(&path, "/x/a.wav,hallo welt\n/x/b.wav,\"guten tag, welt\"\n").unwrap();

        let ts = read_transcripts(&path).unwrap();
        assert_eq!(ts.len(), 2);
        assert_eq!(ts[0].id, "a.wav");
        assert_eq!(ts[0].transcript, "hallo welt");
        assert_eq!(ts[1].transcript, "guten tag, welt");
    }

    #[test]
    fn test_split_sizes() {
        let (train, test) = split_train_test(&utts(10), 0.2, Some(1));
        assert_eq!(test.len(), 2);
        assert_eq!(train.len(), 8);

        let (train, test) = split_train_test(&utts(3), 0.2, Some(1));
        assert_eq!(test.len(), 1);
        assert_eq!(train.len(), 2);
    }

    #[test]
    fn test_split_is_partition() {
        let all = utts(25);
        let (train, test) = split_train_test(&all, 0.3, Some(7));
        let train_ids: HashSet<_> = train.iter().map(|u| u.id.clone()).collect();
        let test_ids: HashSet<_> = test.iter().map(|u| u.id.clone()).collect();
        assert!(train_ids.is_disjoint(&test_ids));
        assert_eq!(train_ids.len() + test_ids.len(), all.len());
    }

    #[test]
    fn test_split_deterministic_with_seed() {
        let all = utts(20);
        assert_eq!(split_train_test(&all, 0.25, Some(42)), split_train_test(&all, 0.25, Some(42)));
    }

    #[test]
    fn test_to_map_sorted() {
        let mut v = utts(3);
        v.reverse();
        let map = to_map(v);
        assert_eq!(map.keys().cloned().collect::<Vec<_>>(), vec!["u000.wav", "u001.wav", "u002.wav"]);
    }
}
