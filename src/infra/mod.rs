// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns:
//
//   model_store.rs — saving and loading the model package
//                    (classifier weights via Burn's CompactRecorder,
//                    vectorizer + antibiotic ordering as JSON)
//
//   metrics.rs     — per-epoch training metrics appended to a CSV
//                    file next to the model files

/// Model package saving and loading
pub mod model_store;

/// Training metrics CSV logger
pub mod metrics;
