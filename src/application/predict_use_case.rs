// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// One-shot prediction path for the CLI: load the persisted model
// package strictly (an absent or corrupt package is an error here,
// unlike the serving path which degrades) and classify a single
// sequence.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::domain::phenotype::Phenotype;
use crate::infra::model_store::ModelStore;
use crate::ml::package::ModelPackage;

pub struct PredictUseCase {
    package: ModelPackage,
}

impl PredictUseCase {
    pub fn new(model_dir: &str) -> Result<Self> {
        let store   = ModelStore::new(model_dir);
        let package = store.load_package()?;
        Ok(Self { package })
    }

    /// Classify one sequence against every antibiotic on the panel.
    pub fn predict(&self, sequence: &str) -> Result<BTreeMap<String, Phenotype>> {
        self.package.predict(sequence)
    }
}
