// ============================================================
// Layer 4 — Text File Loader
// ============================================================
// Finds and reads the .txt files that make up the corpus.
//
// The corpus is a flat directory of UTF-8 text files, mostly
// one sentence per line. Files are listed in sorted order so a
// given directory always splits into the same training and
// testing halves.
//
// Reading:
//   - either every file, the first n files, or a random sample
//     of n files
//   - each file has its curly quotes stripped (see Preprocessor)
//   - texts are concatenated; a newline is inserted between two
//     files when the first does not already end with one, so the
//     last sentence of one file never merges with the first
//     sentence of the next
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::preprocessor::Preprocessor;
use crate::domain::document::Document;

/// Which of the listed files to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSelection {
    /// Every file
    All,
    /// The first n files in listing order
    First(usize),
    /// n files chosen uniformly at random
    Sample(usize),
}

impl FileSelection {
    /// `n_files == 0` means every file.
    pub fn new(n_files: usize, sample: bool) -> Self {
        match (n_files, sample) {
            (0, _)     => Self::All,
            (n, true)  => Self::Sample(n),
            (n, false) => Self::First(n),
        }
    }
}

pub struct TextFileLoader {
    dir: PathBuf,
}

impl TextFileLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// List every `.txt` file in the directory, sorted by path.
    pub fn find_data_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            anyhow::bail!("Data directory '{}' could not be found", self.dir.display());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Cannot read directory '{}'", self.dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("txt") {
                files.push(path);
            }
        }
        files.sort();

        tracing::info!("Found {} .txt files in '{}'", files.len(), self.dir.display());
        Ok(files)
    }
}

/// Read one file and strip its curly quotes.
pub fn load_document(path: &Path) -> Result<Document> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}' as UTF-8 text", path.display()))?;

    let source = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    Ok(Document::new(source, Preprocessor::new().strip_curly_quotes(&raw)))
}

/// Read the selected files and join their text into one string.
pub fn read_text_files<R: Rng + ?Sized>(
    files:     &[PathBuf],
    selection: FileSelection,
    rng:       &mut R,
) -> Result<String> {
    let chosen: Vec<&PathBuf> = match selection {
        FileSelection::All       => files.iter().collect(),
        FileSelection::First(n)  => files.iter().take(n).collect(),
        FileSelection::Sample(n) => files.choose_multiple(rng, n).collect(),
    };

    let mut text = String::new();
    for path in &chosen {
        let doc = load_document(path)?;
        tracing::debug!("Loaded: {} ({} bytes)", doc.source, doc.len());

        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&doc.text);
    }

    tracing::info!("Read {} files ({} bytes of text)", chosen.len(), text.len());
    Ok(text)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn corpus() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "second file").unwrap();
        fs::write(dir.path().join("a.txt"), "first \u{201C}file\u{201D}\n").unwrap();
        fs::write(dir.path().join("c.txt"), "third").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        dir
    }

    #[test]
    fn test_finds_only_txt_files_sorted() {
        let dir   = corpus();
        let files = TextFileLoader::new(dir.path()).find_data_files().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let loader = TextFileLoader::new("/definitely/not/here");
        assert!(loader.find_data_files().is_err());
    }

    #[test]
    fn test_reads_first_n_and_strips_quotes() {
        let dir   = corpus();
        let files = TextFileLoader::new(dir.path()).find_data_files().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let text = read_text_files(&files, FileSelection::First(2), &mut rng).unwrap();
        assert_eq!(text, "first file\nsecond file");
    }

    #[test]
    fn test_separates_files_without_trailing_newline() {
        let dir   = corpus();
        let files = TextFileLoader::new(dir.path()).find_data_files().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let text = read_text_files(&files, FileSelection::All, &mut rng).unwrap();
        assert_eq!(text, "first file\nsecond file\nthird");
    }

    #[test]
    fn test_sample_reads_requested_count() {
        let dir   = corpus();
        let files = TextFileLoader::new(dir.path()).find_data_files().unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let text = read_text_files(&files, FileSelection::Sample(2), &mut rng).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_selection_from_flags() {
        assert_eq!(FileSelection::new(0, true), FileSelection::All);
        assert_eq!(FileSelection::new(5, true), FileSelection::Sample(5));
        assert_eq!(FileSelection::new(5, false), FileSelection::First(5));
    }

    #[test]
    fn test_load_document_names_source() {
        let dir = corpus();
        let doc = load_document(&dir.path().join("a.txt")).unwrap();
        assert_eq!(doc.source, "a.txt");
        assert_eq!(doc.text, "first file\n");
    }
}
