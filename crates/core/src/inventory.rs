//! Phone inventory: surface phones grouped under their canonical phone.
//!
//! Kaldi wants stressed and unstressed realizations of a phone on one line
//! of `nonsilence_phones.txt` so they share a tree root. The canonical
//! phone is the surface phone with its leading stress mark stripped.

use std::collections::{BTreeMap, BTreeSet};

use crate::phonetics::strip_stress;

/// Canonical phone → set of observed surface phones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhoneInventory {
    variants: BTreeMap<String, BTreeSet<String>>,
}

impl PhoneInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// File every non-empty phone of a sequence under its canonical phone.
    ///
    /// Returns how many empty phones were skipped.
    pub fn accumulate<'a, I>(&mut self, phones: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut skipped = 0;
        for p in phones {
            if p.is_empty() {
                skipped += 1;
                continue;
            }
            self.insert(p);
        }
        skipped
    }

    /// File a single surface phone. Re-adding a known phone is a no-op.
    pub fn insert(&mut self, phone: &str) {
        let pws = strip_stress(phone);
        self.variants
            .entry(pws.to_string())
            .or_default()
            .insert(phone.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Number of canonical phones.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Surface variants of one canonical phone.
    pub fn variants_of(&self, canonical: &str) -> Option<&BTreeSet<String>> {
        self.variants.get(canonical)
    }

    /// Canonical phones with their sorted variants, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.variants.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every surface phone, canonical order first, then sorted within a set.
    pub fn surface_phones(&self) -> impl Iterator<Item = &str> {
        self.variants
            .values()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Render `nonsilence_phones.txt`: one line per canonical phone, each
    /// variant followed by a space.
    pub fn render_nonsilence_phones(&self) -> String {
        let mut out = String::new();
        for set in self.variants.values() {
            for p in set {
                out.push_str(p);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_accumulate_groups_stress_variants() {
        let mut inv = PhoneInventory::new();
        inv.accumulate(["'a", "b", "a", "'b", "c"]);
        assert_eq!(inv.len(), 3);
        let a: Vec<&str> = inv.variants_of("a").unwrap().iter().map(String::as_str).collect();
        assert_eq!(a, vec!["'a", "a"]);
        assert_eq!(inv.variants_of("c").unwrap().len(), 1);
    }

    #[test]
    fn test_accumulate_idempotent() {
        let mut once = PhoneInventory::new();
        once.accumulate(["a", "'a"]);
        let mut twice = once.clone();
        twice.accumulate(["a", "'a", "a"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_accumulate_skips_empty() {
        let mut inv = PhoneInventory::new();
        let skipped = inv.accumulate(["", "h", "a", ""]);
        assert_eq!(skipped, 2);
        assert_eq!(inv.surface_phones().collect::<Vec<_>>(), vec!["a", "h"]);
        assert!(inv.variants_of("").is_none());
    }

    #[test]
    fn test_every_phone_in_exactly_one_set() {
        let mut inv = PhoneInventory::new();
        let seq = ["'E", "E", "n", "'n", "t", "'a:", "a:", "a"];
        inv.accumulate(seq);
        for p in seq {
            let containing = inv.iter().filter(|(_, set)| set.contains(p)).count();
            assert_eq!(containing, 1, "{p}");
        }
        let distinct: HashSet<&str> = seq.into_iter().collect();
        assert_eq!(inv.surface_phones().count(), distinct.len());
    }

    #[test]
    fn test_render_nonsilence_phones() {
        let mut inv = PhoneInventory::new();
        inv.accumulate(["h", "'E", "E", "l", "'o"]);
        assert_eq!(inv.render_nonsilence_phones(), "'E E \nh \nl \n'o \n");
    }

    #[test]
    fn test_empty_inventory_renders_nothing() {
        assert!(PhoneInventory::new().render_nonsilence_phones().is_empty());
    }
}
