// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: no printing (Layer 1), no model
// code (Layer 5), no direct file parsing (Layers 4 and 6).
//
// The two use cases are independent. DetectUseCase serves the
// console, one-shot and HTTP surfaces; TrainUseCase is a batch
// job that never sees the detector's store.
//
// Reference: Clean Architecture pattern

// Idiom lookup + language tagging for one sentence
pub mod detect_use_case;

// Causal LM fine-tuning on the idiom corpus
pub mod train_use_case;
