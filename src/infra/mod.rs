// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the artifacts and plots directories:
//
//   checkpoint.rs      — model weights (Burn CompactRecorder),
//                        model and training configs as JSON
//
//   tokenizer_store.rs — tokenizer.json + vocabulary.json, so
//                        probing uses the training word ids
//
//   metrics.rs         — per-epoch loss/accuracy CSV
//
//   curve_store.rs     — per-word probability-vs-distance CSVs
//                        and SVG charts
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Tokenizer saving and loading
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;

/// Distance curve CSV and chart writer
pub mod curve_store;
