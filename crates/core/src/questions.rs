//! Extra clustering questions for Kaldi's decision-tree building.

use serde::Serialize;

use crate::inventory::PhoneInventory;
use crate::phonetics::is_stressed;

/// Non-speech phones: silence, spoken noise, non-spoken noise.
pub const SILENCE_PHONES: [&str; 3] = ["SIL", "SPN", "NSN"];

/// The silence phone used for optional inter-word silence.
pub const OPTIONAL_SILENCE: &str = "SIL";

/// Surface phones split by stress.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusteringQuestions {
    pub unstressed: Vec<String>,
    pub stressed: Vec<String>,
}

/// Partition every surface phone of the inventory by stress marking.
///
/// Canonical-phone order is kept, with each variant set sorted.
pub fn export(inventory: &PhoneInventory) -> ClusteringQuestions {
    let (stressed, unstressed): (Vec<String>, Vec<String>) = inventory
        .surface_phones()
        .map(str::to_string)
        .partition(|p| is_stressed(p));
    ClusteringQuestions {
        unstressed,
        stressed,
    }
}

impl ClusteringQuestions {
    /// Render `extra_questions.txt`: the silence group, then unstressed
    /// phones, then stressed phones, one group per line.
    pub fn render(&self) -> String {
        let mut out = SILENCE_PHONES.join(" ");
        out.push('\n');
        for group in [&self.unstressed, &self.stressed] {
            for p in group {
                out.push_str(p);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

/// Render `silence_phones.txt`.
pub fn render_silence_phones() -> String {
    let mut out = String::new();
    for p in SILENCE_PHONES {
        out.push_str(p);
        out.push('\n');
    }
    out
}

/// Render `optional_silence.txt`.
pub fn render_optional_silence() -> String {
    format!("{}\n", OPTIONAL_SILENCE)
}
