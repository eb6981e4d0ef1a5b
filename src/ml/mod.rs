// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// Everything that builds or trains the network lives here.
//
//   model.rs   — decoder-only transformer:
//                • token + positional embeddings
//                • causally-masked multi-head self-attention
//                • GELU feed-forward blocks, residuals, layer norm
//                • LM head over the whole vocabulary
//
//   trainer.rs — epoch loop: forward, next-token loss, backward,
//                Adam step, validation, metrics, checkpoints
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Radford et al. (2019) GPT-2

/// Decoder-only causal language model
pub mod model;

/// Training loop with validation and checkpointing
pub mod trainer;
