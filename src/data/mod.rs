// ============================================================
// Layer 4 — Data Layer
// ============================================================
// Two independent pipelines share this layer.
//
// Detection (built once at startup, read per request):
//
//   *.json files ──► JsonIdiomLoader ──► IdiomStore ──► matcher::find
//
// Training (one-shot batch job):
//
//   *.json files ──► build_corpus ──► encode_all ──► split_train_val
//                                                        │
//                               CausalLmBatcher ◄── CausalLmDataset
//
// The only code they share is the directory walk in loader.rs.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads idiom JSON files into an IdiomStore
pub mod loader;

/// Insertion-ordered phrase → record dictionary
pub mod store;

/// Substring search and highlighting over the store
pub mod matcher;

/// Flattens idiom files into fixed-template training text
pub mod corpus;

/// Tokenised causal-LM items and Burn's Dataset trait
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits items into train/validation sets
pub mod splitter;
