// ============================================================
// Layer 4 — Word Tokenizer
// ============================================================
// Converts text into sequences of word ids.
//
// The id lookup itself is a HuggingFace `tokenizers` WordLevel
// model with a WhitespaceSplit pre-tokenizer. We build its JSON
// by hand from the Vocabulary (same trick as the tokenizer store
// uses on disk), so the file it saves is a normal tokenizer.json
// any HF-compatible tool can open.
//
//   vocab:  "[UNK]" → 0, then every ranked word → its id
//
// Encoding steps:
//   1. Preprocessor::normalise (lowercase, filter punctuation)
//   2. HF tokenizer splits on whitespace and looks up ids
//   3. Drop id 0 (unknown word) and ids above num_words
//
// Dropping rather than mapping to an unknown token means a
// sequence only ever contains words the model can predict.
//
// Reference: tokenizers crate documentation (WordLevel model)

use std::str::FromStr;

use anyhow::Result;
use tokenizers::Tokenizer;

use crate::data::preprocessor::Preprocessor;
use crate::data::vocabulary::Vocabulary;

pub const UNK_TOKEN: &str = "[UNK]";

pub struct WordTokenizer {
    vocabulary:   Vocabulary,
    inner:        Tokenizer,
    preprocessor: Preprocessor,
}

impl WordTokenizer {
    /// Build the HF WordLevel tokenizer for a fitted vocabulary.
    pub fn from_vocabulary(vocabulary: Vocabulary) -> Result<Self> {
        let json  = tokenizer_json(&vocabulary);
        let inner = Tokenizer::from_str(&json.to_string())
            .map_err(|e| anyhow::anyhow!("Cannot build word tokenizer: {e}"))?;
        Ok(Self::from_parts(vocabulary, inner))
    }

    /// Pair an already loaded HF tokenizer with its vocabulary.
    pub fn from_parts(vocabulary: Vocabulary, inner: Tokenizer) -> Self {
        Self { vocabulary, inner, preprocessor: Preprocessor::new() }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Serialised HF tokenizer, as written to tokenizer.json
    pub fn to_json(&self) -> Result<String> {
        self.inner
            .to_string(true)
            .map_err(|e| anyhow::anyhow!("Cannot serialise tokenizer: {e}"))
    }

    /// Encode one text into word ids, dropping unknown and out-of-range words.
    pub fn text_to_sequence(&self, text: &str) -> Result<Vec<u32>> {
        let normalised = self.preprocessor.normalise(text);
        let encoding   = self
            .inner
            .encode(normalised.as_str(), false)
            .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;

        Ok(encoding
            .get_ids()
            .iter()
            .copied()
            .filter(|&id| self.vocabulary.is_kept_id(id))
            .collect())
    }

    pub fn texts_to_sequences<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vec<u32>>> {
        texts.iter().map(|t| self.text_to_sequence(t.as_ref())).collect()
    }

    /// Encode a list of words, e.g. a random probe sequence.
    pub fn words_to_sequence(&self, words: &[&str]) -> Result<Vec<u32>> {
        self.text_to_sequence(&words.join(" "))
    }
}

fn tokenizer_json(vocabulary: &Vocabulary) -> serde_json::Value {
    let mut vocab = serde_json::Map::new();
    vocab.insert(UNK_TOKEN.to_string(), serde_json::json!(0));
    for (i, word) in vocabulary.ranked_words().iter().enumerate() {
        vocab.insert(word.clone(), serde_json::json!(i + 1));
    }

    serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": {
            "type": "WhitespaceSplit"
        },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": UNK_TOKEN
        }
    })
}
