// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from raw .txt files to tensor batches.
//
//   .txt files
//       │
//       ▼
//   TextFileLoader    → lists, samples and reads corpus files
//       │
//       ▼
//   Simplifier        → merges near-duplicate words (edit distance)
//       │
//       ▼
//   Vocabulary        → frequency-ranked word ids, size limit
//       │
//       ▼
//   WordTokenizer     → text → word ids (HF WordLevel model)
//       │
//       ▼
//   sequences         → prefix sequences, pre-padding
//       │
//       ▼
//   NextWordDataset   → implements Burn's Dataset trait
//       │
//       ▼
//   NextWordBatcher   → stacks samples into tensor batches
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Lists and reads .txt corpus files
pub mod loader;

/// Word splitting and quote stripping
pub mod preprocessor;

/// Frequency-ranked word index
pub mod vocabulary;

/// Text → word id encoding
pub mod tokenizer;

/// Near-duplicate word collapsing
pub mod simplifier;

/// Prefix sequence construction and padding
pub mod sequences;

/// Implements Burn's Dataset trait for next-word samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// File and sample splits
pub mod splitter;
