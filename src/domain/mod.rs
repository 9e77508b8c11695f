// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits that name the core concepts
// of the experiment:
//
//   - a Document read from the corpus
//   - a DistanceCurve comparing model and test-data probability
//   - the NextWordModel abstraction the measurements run against
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Keeping the model behind a trait means the evaluation
// harness can be unit tested with a fake model, no GPU needed.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A loaded text file from disk
pub mod document;

// Probability-vs-distance measurements for a single word
pub mod distance_curve;

// Core abstractions (traits) that other layers implement
pub mod traits;
