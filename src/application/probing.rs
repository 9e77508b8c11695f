// ============================================================
// Layer 2 — Distance Probes
// ============================================================
// The two measurements shared by the probe and assess commands.
//
// Model side: "how likely does the model think WORD is after d
// words that are not WORD?"
//   - draw d words uniformly from a candidate list
//   - encode and pre-pad to the model input length
//   - read P(WORD) from the model's next-word distribution
//   - average over many random sequences
//
// Test-data side: "how often are two consecutive occurrences of
// WORD exactly d words apart?"
//   - split held-out text on whole-word WORD
//   - encode each piece; its length is the gap in vocabulary words
//   - the fraction of pieces with length d is the estimate
//
// Both are written against the NextWordModel trait, so they
// run unchanged on the Burn predictor or a test double.

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::sequences::pad_pre;
use crate::data::simplifier::whole_word;
use crate::data::tokenizer::WordTokenizer;
use crate::domain::traits::NextWordModel;

/// Mean probability of `target_id` after `tests` random sequences of
/// `distance` words drawn from `candidates`.
pub fn random_sequence_probability<M, R>(
    model:      &M,
    tokenizer:  &WordTokenizer,
    target_id:  u32,
    candidates: &[String],
    distance:   usize,
    tests:      usize,
    rng:        &mut R,
) -> Result<f64>
where
    M: NextWordModel + ?Sized,
    R: Rng + ?Sized,
{
    if tests == 0 {
        anyhow::bail!("At least one test sequence is required");
    }
    if candidates.is_empty() {
        anyhow::bail!("No candidate words to build random sequences from");
    }
    if target_id as usize >= model.output_classes() {
        anyhow::bail!(
            "Word id {} is outside the model's {} output classes",
            target_id,
            model.output_classes()
        );
    }

    let input_len = model.input_len();
    let mut sequences = Vec::with_capacity(tests);

    for _ in 0..tests {
        let words: Vec<&str> = (0..distance)
            .filter_map(|_| candidates.choose(rng).map(String::as_str))
            .collect();
        let ids = tokenizer.words_to_sequence(&words)?;
        sequences.push(pad_pre(&ids, input_len));
    }

    let rows = model.next_word_probabilities(&sequences)?;
    let sum: f64 = rows
        .iter()
        .map(|row| row.get(target_id as usize).copied().unwrap_or(0.0) as f64)
        .sum();

    Ok(sum / tests as f64)
}

/// For each distance, the fraction of gaps between occurrences of `word`
/// in `text` that are exactly that many vocabulary words long.
pub fn gap_length_distribution(
    text:      &str,
    word:      &str,
    tokenizer: &WordTokenizer,
    distances: &[usize],
) -> Result<Vec<f64>> {
    let pattern = whole_word(word)?;
    let pieces: Vec<&str> = pattern.split(text).collect();
    let lengths: Vec<usize> = tokenizer
        .texts_to_sequences(&pieces)?
        .iter()
        .map(Vec::len)
        .collect();

    let total = pieces.len() as f64;
    Ok(distances
        .iter()
        .map(|&d| lengths.iter().filter(|&&len| len == d).count() as f64 / total)
        .collect())
}
