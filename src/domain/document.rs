// ============================================================
// Layer 3 — Document Domain Type
// ============================================================
// A single corpus file: where it came from and its text.
// By the time a Document exists the curly quotes have already
// been stripped, so downstream code only sees plain text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// The file name, kept for traceability in logs
    pub source: String,

    /// The full text content of the file
    pub text: String,
}

impl Document {
    /// Create a new Document with a source name and text content.
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
        }
    }

    /// Number of bytes of text, used for load logging
    pub fn len(&self) -> usize {
        self.text.len()
    }
}
