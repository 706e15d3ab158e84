// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains all Burn framework specific code.
// No other layer imports from burn directly — only this one and
// the data plumbing that feeds it.
//
//   model.rs     — the multi-label linear classifier: one logistic
//                  output column per antibiotic over the k-mer
//                  count vector, with class-weighted BCE loss
//
//   trainer.rs   — the training loop: Adam, seeded data loader,
//                  per-epoch held-out evaluation and checkpointing
//
//   predictor.rs — the inference engine: rebuilds the net from the
//                  persisted package and thresholds sigmoid outputs
//
//   package.rs   — the immutable Model Package assembled from the
//                  fitted vectorizer, the trained net and the
//                  frozen antibiotic ordering

/// Multi-label linear classifier architecture
pub mod model;

/// Full training loop with held-out evaluation and checkpointing
pub mod trainer;

/// Inference engine — loads a checkpoint and classifies vectors
pub mod predictor;

/// The immutable trained bundle loaded by the prediction service
pub mod package;
