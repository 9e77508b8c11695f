// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only talks to the model through this
// trait:
//
//   NextWordModel → Predictor wraps the trained Burn LSTM
//
// The distance measurements are written against NextWordModel,
// so tests swap in a fixed-distribution model.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

// ─── NextWordModel ────────────────────────────────────────────────────────────
/// A trained model that scores the next word after a sequence of word ids.
pub trait NextWordModel {
    /// Length every input sequence must be padded to.
    fn input_len(&self) -> usize;

    /// Number of output classes. Class `k` is word id `k`; class 0 is padding.
    fn output_classes(&self) -> usize;

    /// For each pre-padded sequence of length `input_len()`, return the
    /// probability distribution over the next word id.
    fn next_word_probabilities(&self, sequences: &[Vec<u32>]) -> Result<Vec<Vec<f32>>>;
}
