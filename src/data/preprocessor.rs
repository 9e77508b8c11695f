// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Turns raw corpus text into the word stream every other stage
// agrees on. Vocabulary fitting, encoding and simplification all
// go through `words()`, so a word counted during fitting is
// always the same string that gets looked up during encoding.
//
// Word splitting rules (applied in order):
//   1. Lowercase the text
//   2. Replace every filter character with a space
//        !"#$%&()*+,-./:;<=>?@[\]^_`{|}~  plus tab and newline
//   3. Replace any other whitespace (\r, form feed, no-break
//      space, ...) with a space too
//   4. Split on spaces and drop empty pieces
//
// Step 3 keeps fitting and encoding in agreement: the HF
// WhitespaceSplit pre-tokenizer splits on every Unicode
// whitespace character, so no word may contain one.
//
// Apostrophes are NOT filtered, so "don't" stays one word.
//
// Curly quotes (U+201C U+201D U+2018 U+2019) are not in the
// filter list, so they are stripped from the raw file text
// before anything else sees it.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

/// Characters replaced by a space before splitting into words
pub const FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

const CURLY_QUOTES: [char; 4] = ['\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Remove typographic quotes that would otherwise stick to words.
    pub fn strip_curly_quotes(&self, text: &str) -> String {
        text.chars().filter(|c| !CURLY_QUOTES.contains(c)).collect()
    }

    /// Lowercase, filter punctuation and split into words.
    pub fn words(&self, text: &str) -> Vec<String> {
        self.normalise(text)
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The lowercased, filtered text with words separated by spaces only.
    /// This is the form handed to the tokenizer's whitespace splitter.
    pub fn normalise(&self, text: &str) -> String {
        text.to_lowercase()
            .chars()
            .map(|c| if FILTERS.contains(c) || c.is_whitespace() { ' ' } else { c })
            .collect()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_splits() {
        let p = Preprocessor::new();
        assert_eq!(p.words("The Cat sat"), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn test_filters_punctuation() {
        let p = Preprocessor::new();
        assert_eq!(
            p.words("Hello, world! (yes)\tno-way\nend."),
            vec!["hello", "world", "yes", "no", "way", "end"]
        );
    }

    #[test]
    fn test_every_whitespace_separates_words() {
        let p = Preprocessor::new();
        assert_eq!(p.words("a b\r\nc\u{a0}d\u{c}e"), vec!["a", "b", "c", "d", "e"]);
        assert!(!p.normalise("x\r\u{a0}y").chars().any(|c| c.is_whitespace() && c != ' '));
    }

    #[test]
    fn test_keeps_apostrophes() {
        let p = Preprocessor::new();
        assert_eq!(p.words("Don't stop"), vec!["don't", "stop"]);
    }

    #[test]
    fn test_strips_curly_quotes() {
        let p = Preprocessor::new();
        let raw = "\u{201C}Hi\u{201D} it\u{2019}s \u{2018}me\u{2019}";
        assert_eq!(p.strip_curly_quotes(raw), "Hi its me");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        let p = Preprocessor::new();
        assert!(p.words("").is_empty());
        assert!(p.words("... !!! ---").is_empty());
    }
}
