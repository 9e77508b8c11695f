// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers into the three workflows the
// CLI exposes: train a model, probe it at one distance, and
// assess it against held-out text.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination

// The training workflow
pub mod train_use_case;

// Measurements shared by probe and assess
pub mod probing;

// One word, one distance, one probability
pub mod probe_use_case;

// Model curves against held-out text, per word
pub mod assess_use_case;
