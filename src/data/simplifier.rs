// ============================================================
// Layer 4 — Text Simplifier
// ============================================================
// Collapses near-duplicate words so spelling variants and
// typos ("colour"/"color", "recieve"/"receive") share one id.
//
// Algorithm:
//   1. Rank candidate words by frequency (most frequent first)
//   2. Walk every unordered pair (i < j) in that order
//   3. If edit_distance(w_i, w_j) < min_dist and neither word
//      has been replaced yet, rewrite every whole-word w_j in
//      the text as w_i, and mark w_j replaced
//
// Because pairs are visited in frequency order, the rarer
// spelling is always the one that disappears.
//
// Pair checks are O(n²) in the number of candidates, so the
// candidates are limited to frequent words: either words seen
// more than `min_freq` times, or the kept words of an already
// trained vocabulary (so held-out text gets the exact same
// rewrites the training text did).
//
// Replacement is case-sensitive: vocabulary words are
// lowercase, so only lowercase occurrences are rewritten.
//
// Reference: Levenshtein (1966) binary codes capable of
//            correcting deletions, insertions and reversals
//            regex crate documentation (word boundaries)

use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::Regex;

use crate::data::vocabulary::Vocabulary;

/// Levenshtein distance over chars with unit costs.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // Single rolling row of the DP table
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for i in 1..=a.len() {
        let mut diag = row[0];
        row[0] = i;
        for j in 1..=b.len() {
            let above = row[j];
            let cost  = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            row[j] = (above + 1)
                .min(row[j - 1] + 1)
                .min(diag + cost);
            diag = above;
        }
    }

    row[b.len()]
}

/// A single rewrite performed by the simplifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub kept:     String,
    pub replaced: String,
}

pub struct Simplifier {
    /// Pairs with edit distance strictly below this are merged
    min_dist: usize,
}

impl Simplifier {
    pub fn new(min_dist: usize) -> Self {
        Self { min_dist }
    }

    /// Simplify using the words of `text` seen more than `min_freq` times.
    pub fn simplify_text(&self, text: &str, min_freq: f64) -> Result<(String, Vec<Replacement>)> {
        let candidates: Vec<String> = Vocabulary::from_text(text)
            .frequent_words(min_freq)
            .into_iter()
            .map(|(w, _)| w)
            .collect();
        self.simplify_with_candidates(text, &candidates)
    }

    /// Simplify using the kept words of a trained vocabulary.
    pub fn simplify_with_vocabulary(
        &self,
        text:       &str,
        vocabulary: &Vocabulary,
    ) -> Result<(String, Vec<Replacement>)> {
        self.simplify_with_candidates(text, vocabulary.kept_words())
    }

    fn simplify_with_candidates(
        &self,
        text:       &str,
        candidates: &[String],
    ) -> Result<(String, Vec<Replacement>)> {
        let replacements = self.plan(candidates);
        let mut out      = text.to_string();

        for r in &replacements {
            let pattern = whole_word(&r.replaced)?;
            out = pattern.replace_all(&out, r.kept.as_str()).into_owned();
        }

        tracing::info!(
            "Simplification merged {} of {} candidate words",
            replacements.len(),
            candidates.len()
        );
        Ok((out, replacements))
    }

    /// Decide which words get merged into which, without touching any text.
    pub fn plan(&self, candidates: &[String]) -> Vec<Replacement> {
        let mut replaced: HashSet<&str> = HashSet::new();
        let mut plan = Vec::new();

        for (i, kept) in candidates.iter().enumerate() {
            for other in &candidates[i + 1..] {
                if replaced.contains(kept.as_str()) || replaced.contains(other.as_str()) {
                    continue;
                }
                if edit_distance(kept, other) < self.min_dist {
                    tracing::debug!("Merging '{}' into '{}'", other, kept);
                    replaced.insert(other.as_str());
                    plan.push(Replacement { kept: kept.clone(), replaced: other.clone() });
                }
            }
        }

        plan
    }
}

/// Regex matching `word` only at word boundaries.
pub fn whole_word(word: &str) -> Result<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(word)))
        .with_context(|| format!("Cannot build word pattern for '{word}'"))
}
