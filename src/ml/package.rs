// ============================================================
// Layer 5 — Model Package
// ============================================================
// The immutable bundle produced by training and loaded wholesale
// by the prediction service: the fitted vectorizer, the trained
// classifier and the frozen antibiotic ordering, plus the k used
// at training time. Nothing in here is ever mutated after
// construction — a new package means a new process.

use std::collections::BTreeMap;

use anyhow::{ensure, Result};

use crate::data::featurizer::KmerFeaturizer;
use crate::data::labels::AntibioticPanel;
use crate::data::vectorizer::KmerVectorizer;
use crate::domain::phenotype::Phenotype;
use crate::ml::predictor::SequencePredictor;

pub struct ModelPackage {
    featurizer: KmerFeaturizer,
    vectorizer: KmerVectorizer,
    predictor:  SequencePredictor,
    panel:      AntibioticPanel,
}

impl ModelPackage {
    pub fn new(
        featurizer: KmerFeaturizer,
        vectorizer: KmerVectorizer,
        predictor:  SequencePredictor,
        panel:      AntibioticPanel,
    ) -> Self {
        Self { featurizer, vectorizer, predictor, panel }
    }

    /// Classify one raw sequence: normalise, re-run the training-time
    /// featurization, transform with the frozen vocabulary, and name
    /// each binary decision from the persisted antibiotic ordering.
    ///
    /// Read-only with respect to the package; a degenerate input
    /// (shorter than k, or fully out-of-vocabulary) flows through as
    /// an all-zero vector and still yields a full per-antibiotic map.
    pub fn predict(&self, sequence: &str) -> Result<BTreeMap<String, Phenotype>> {
        let normalized = sequence.trim().to_uppercase();
        let document   = self.featurizer.featurize(&normalized);
        let features   = self.vectorizer.transform_one(&document);

        if features.is_zero() {
            tracing::debug!(
                "Sequence featurized to an all-zero vector (len {}, k {})",
                normalized.len(),
                self.featurizer.k(),
            );
        }

        let decisions = self.predictor.predict_binary(&features)?;
        ensure!(
            decisions.len() == self.panel.len(),
            "Classifier emitted {} decisions for {} antibiotics",
            decisions.len(),
            self.panel.len(),
        );

        Ok(self
            .panel
            .names()
            .iter()
            .cloned()
            .zip(decisions.into_iter().map(Phenotype::from_binary))
            .collect())
    }
}
