// ============================================================
// Layer 3 — Phenotype Record Domain Type
// ============================================================
// One row of the training dataset: a sequence, the antibiotic it
// was tested against, and the lab outcome of that test.

use serde::{Deserialize, Serialize};

use crate::domain::phenotype::Phenotype;

/// A single labelled observation from the phenotype dataset.
/// Each record carries exactly one (antibiotic, outcome) pair;
/// the same sequence may appear in many records, once per tested
/// antibiotic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhenotypeRecord {
    /// The raw biological sequence, exactly as it appears in the dataset
    pub sequence: String,

    /// Name of the antibiotic this record was tested against
    pub antibiotic: String,

    /// Parsed test outcome; None when the dataset cell held an
    /// unrecognised value (treated as susceptible downstream)
    pub phenotype: Option<Phenotype>,
}

impl PhenotypeRecord {
    pub fn new(
        sequence:   impl Into<String>,
        antibiotic: impl Into<String>,
        phenotype:  Option<Phenotype>,
    ) -> Self {
        Self {
            sequence:   sequence.into(),
            antibiotic: antibiotic.into(),
            phenotype,
        }
    }
}
