// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// Frequency-ranked word index built from the corpus.
//
// Id assignment:
//   - count every word, remembering the order words were first seen
//   - sort by count, descending; ties keep first-seen order
//   - the most frequent word gets id 1, the next id 2, ...
//   - id 0 is never a word: it is the padding value and the
//     "unknown" id in the tokenizer
//
// `num_words` limits the vocabulary used for encoding to the
// most frequent words (ids 1..=num_words). Words outside that
// range still have an id but are dropped when text is encoded.
//
// The vocabulary is what gets persisted next to the model, so
// the same word index is used for training and for probing.
//
// Reference: Rust Book §8 (Hash Maps)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::preprocessor::Preprocessor;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "VocabularyFile", into = "VocabularyFile")]
pub struct Vocabulary {
    /// (word, count) in first-seen order
    counts:    Vec<(String, usize)>,
    /// word → position in `counts`
    positions: HashMap<String, usize>,
    /// Words sorted by descending count; ranked[i] has id i + 1
    ranked:    Vec<String>,
    /// word → id
    index:     HashMap<String, u32>,
    num_words: Option<usize>,
}

/// On-disk form: only the counts and the size limit, the index
/// is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct VocabularyFile {
    word_counts: Vec<(String, usize)>,
    num_words:   Option<usize>,
}

impl From<VocabularyFile> for Vocabulary {
    fn from(f: VocabularyFile) -> Self {
        let mut vocab = Vocabulary::new();
        for (word, count) in f.word_counts {
            vocab.add(word, count);
        }
        vocab.rebuild_index();
        vocab.num_words = f.num_words;
        vocab
    }
}

impl From<Vocabulary> for VocabularyFile {
    fn from(v: Vocabulary) -> Self {
        Self { word_counts: v.counts, num_words: v.num_words }
    }
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from a single text.
    pub fn from_text(text: &str) -> Self {
        let mut vocab = Self::new();
        vocab.fit_on_text(text);
        vocab
    }

    /// Count the words of `text` and refresh the id assignment.
    /// Can be called repeatedly; counts accumulate.
    pub fn fit_on_text(&mut self, text: &str) {
        for word in Preprocessor::new().words(text) {
            self.add(word, 1);
        }
        self.rebuild_index();
    }

    fn add(&mut self, word: String, count: usize) {
        match self.positions.get(&word) {
            Some(&pos) => self.counts[pos].1 += count,
            None => {
                self.positions.insert(word.clone(), self.counts.len());
                self.counts.push((word, count));
            }
        }
    }

    fn rebuild_index(&mut self) {
        let mut sorted: Vec<&(String, usize)> = self.counts.iter().collect();
        // sort_by is stable, so equal counts stay in first-seen order
        sorted.sort_by(|a, b| b.1.cmp(&a.1));

        self.ranked = sorted.into_iter().map(|(w, _)| w.clone()).collect();
        self.index = self
            .ranked
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), (i + 1) as u32))
            .collect();
    }

    /// Total number of distinct words seen
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn word_count(&self, word: &str) -> Option<usize> {
        self.positions.get(word).map(|&pos| self.counts[pos].1)
    }

    /// The id of `word`, regardless of `num_words`.
    pub fn word_id(&self, word: &str) -> Option<u32> {
        self.index.get(word).copied()
    }

    /// Every word ordered by id (most frequent first).
    pub fn ranked_words(&self) -> &[String] {
        &self.ranked
    }

    /// (word, count) ordered by id.
    pub fn ranked_counts(&self) -> Vec<(String, usize)> {
        self.ranked
            .iter()
            .map(|w| (w.clone(), self.word_count(w).unwrap_or(0)))
            .collect()
    }

    /// Words seen strictly more than `min_freq` times, most frequent first.
    pub fn frequent_words(&self, min_freq: f64) -> Vec<(String, usize)> {
        self.ranked_counts()
            .into_iter()
            .filter(|(_, count)| *count as f64 > min_freq)
            .collect()
    }

    /// Limit encoding to the `num_words` most frequent words.
    pub fn set_num_words(&mut self, num_words: usize) {
        self.num_words = Some(num_words);
    }

    /// Keep only words seen more than `min_freq` times and return them.
    pub fn set_num_words_from_frequency(&mut self, min_freq: f64) -> Vec<(String, usize)> {
        let frequent = self.frequent_words(min_freq);
        self.set_num_words(frequent.len());
        frequent
    }

    /// The words that survive encoding: the top `num_words`, or all of them.
    pub fn kept_words(&self) -> &[String] {
        let n = self.num_words.unwrap_or(self.ranked.len()).min(self.ranked.len());
        &self.ranked[..n]
    }

    /// Whether `id` is produced by encoding (1..=num_words).
    pub fn is_kept_id(&self, id: u32) -> bool {
        id >= 1 && (id as usize) <= self.kept_words().len()
    }

    /// Size of the model's output layer: one class per kept word plus padding.
    pub fn output_classes(&self) -> usize {
        self.kept_words().len() + 1
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_frequency() {
        let v = Vocabulary::from_text("b a a c a b");
        assert_eq!(v.word_id("a"), Some(1));
        assert_eq!(v.word_id("b"), Some(2));
        assert_eq!(v.word_id("c"), Some(3));
        assert_eq!(v.word_id("zzz"), None);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let v = Vocabulary::from_text("dog cat bird");
        assert_eq!(v.ranked_words(), ["dog", "cat", "bird"]);
    }

    #[test]
    fn test_counts_accumulate_across_fits() {
        let mut v = Vocabulary::from_text("one two");
        v.fit_on_text("two two");
        assert_eq!(v.word_count("two"), Some(3));
        assert_eq!(v.word_id("two"), Some(1));
    }

    #[test]
    fn test_frequent_words_is_strict() {
        let v = Vocabulary::from_text("a a a b b c");
        let frequent: Vec<String> = v.frequent_words(2.0).into_iter().map(|(w, _)| w).collect();
        assert_eq!(frequent, vec!["a"]);
    }

    #[test]
    fn test_num_words_limits_kept_words() {
        let mut v = Vocabulary::from_text("a a a b b c");
        let kept = v.set_num_words_from_frequency(1.0);
        assert_eq!(kept.len(), 2);
        assert_eq!(v.kept_words(), ["a", "b"]);
        assert!(v.is_kept_id(2));
        assert!(!v.is_kept_id(3));
        assert!(!v.is_kept_id(0));
        assert_eq!(v.output_classes(), 3);
    }

    #[test]
    fn test_serde_rebuilds_index() {
        let mut v = Vocabulary::from_text("x y y z z z");
        v.set_num_words(2);
        let json = serde_json::to_string(&v).unwrap();
        let back: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.word_id("z"), Some(1));
        assert_eq!(back.kept_words(), ["z", "y"]);
        assert_eq!(back.output_classes(), 3);
    }
}
