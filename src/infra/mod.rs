// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Adapters to external libraries and the filesystem:
//
//   language.rs        — whatlang-backed LanguageDetector
//   tokenizer_store.rs — loads or builds the training tokenizer
//   checkpoint.rs      — Burn CompactRecorder weights, rolling
//                        per-epoch checkpoints, run config JSON
//   metrics.rs         — per-epoch loss CSV
//
// Reference: Rust Book §9 (Error Handling with anyhow)

/// Language identification for detected sentences
pub mod language;

/// Tokenizer training, saving, and loading
pub mod tokenizer_store;

/// Model checkpoint saving
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
