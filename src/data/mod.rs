// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw phenotype CSV
// all the way to tensor batches ready for the training loop.
//
// The pipeline flows in this order:
//
//   phenotype CSV
//       │
//       ▼
//   CsvRecordSource   → drops sparse columns, caps rows,
//       │               yields PhenotypeRecords
//       ▼
//   KmerFeaturizer    → sequence → space-joined k-mer tokens
//       │
//       ▼
//   KmerVectorizer    → token document → sparse count vector
//       │
//       ▼
//   AntibioticPanel   → frozen label ordering + label matrix
//       │
//       ▼
//   split_train_test  → seeded shuffle into train/held-out
//       │
//       ▼
//   ResistanceDataset → implements Burn's Dataset trait
//       │
//       ▼
//   ResistanceBatcher → densifies samples into tensor batches
//
// Each module is responsible for exactly one step.

/// Loads phenotype records from a CSV file
pub mod loader;

/// Extracts overlapping k-mer token documents from raw sequences
pub mod featurizer;

/// Fits a token vocabulary and maps documents to count vectors
pub mod vectorizer;

/// Frozen antibiotic ordering and label-matrix construction
pub mod labels;

/// Seeded shuffle and split into train/held-out sets
pub mod splitter;

/// Implements Burn's Dataset trait for resistance samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
