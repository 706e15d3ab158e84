// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish a specific goal
// (training the model, or classifying one sequence). Workflow
// coordination only — no ML math, no I/O details, no printing.

// The offline training pipeline
pub mod train_use_case;

// The one-shot prediction workflow
pub mod predict_use_case;
