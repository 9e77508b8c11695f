// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here. The data layer only touches
// Burn through its Dataset and Batcher traits.
//
//   model.rs      — Embedding → LSTM → Dense next-word classifier
//
//   trainer.rs    — The training loop: forward pass, cross-entropy,
//                   backward pass, Adam step, metrics and
//                   periodic checkpoints
//
//   inferencer.rs — Loads a checkpoint and turns padded word-id
//                   sequences into next-word probabilities
//
// The compute backend is chosen at build time: Wgpu with the
// default `wgpu` feature, NdArray (CPU) without it.
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Hochreiter & Schmidhuber (1997) LSTM

/// Embedding + LSTM + Dense architecture
pub mod model;

/// Training loop with optional validation and checkpointing
pub mod trainer;

/// Inference engine — next-word probabilities from a checkpoint
pub mod inferencer;

#[cfg(feature = "wgpu")]
pub type InnerBackend = burn::backend::Wgpu;

#[cfg(not(feature = "wgpu"))]
pub type InnerBackend = burn::backend::NdArray;

pub type TrainBackend = burn::backend::Autodiff<InnerBackend>;
