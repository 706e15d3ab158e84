// ============================================================
// Layer 6 — Model Store
// ============================================================
// Persists and restores the model package.
//
// What gets saved per training run:
//   1. Classifier weights (.mpk.gz)   — via Burn's CompactRecorder
//   2. latest_epoch.json              — which epoch was last saved
//   3. package.json                   — k, fitted vocabulary and the
//                                       frozen antibiotic ordering
//   4. train_config.json              — the full training configuration,
//                                       kept for reproducibility
//
// The antibiotic ordering is persisted explicitly: prediction-time
// output columns are named from this file, never recomputed, so the
// label attribution cannot drift between training and serving.
//
// File layout:
//   model/
//     model_epoch_1.mpk.gz
//     ...
//     latest_epoch.json
//     package.json
//     train_config.json
//
// `load_package` is all-or-nothing: if any piece is missing or does
// not deserialize, the whole load fails and no partial package is
// ever handed out.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};

use crate::application::train_use_case::TrainConfig;
use crate::data::featurizer::KmerFeaturizer;
use crate::data::labels::AntibioticPanel;
use crate::data::vectorizer::KmerVectorizer;
use crate::ml::model::ResistanceNet;
use crate::ml::package::ModelPackage;
use crate::ml::predictor::SequencePredictor;

/// Everything the serving process needs besides the raw weights:
/// the training-time k, the fitted vocabulary and the frozen
/// antibiotic ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMeta {
    pub kmer_len:    usize,
    pub antibiotics: Vec<String>,
    pub vectorizer:  KmerVectorizer,
}

/// Manages saving and loading of everything under the model directory.
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Create a new ModelStore.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Save classifier weights for a given epoch and update the
    /// latest-epoch pointer the loader follows.
    pub fn save_model<B: AutodiffBackend>(
        &self,
        model: &ResistanceNet<B>,
        epoch: usize,
    ) -> Result<()> {
        // Build the file path (without extension — recorder adds it)
        let path = self.dir.join(format!("model_epoch_{epoch}"));

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", path.display())
            })?;

        let latest_path = self.dir.join("latest_epoch.json");
        fs::write(&latest_path, serde_json::to_string(&epoch)?)
            .with_context(|| "Failed to write latest_epoch.json")?;

        tracing::debug!("Saved checkpoint: epoch {}", epoch);
        Ok(())
    }

    /// Load classifier weights from the latest saved checkpoint into
    /// a freshly initialised model of the matching architecture.
    pub fn load_model<B: Backend>(
        &self,
        model:  ResistanceNet<B>,
        device: &B::Device,
    ) -> Result<ResistanceNet<B>> {
        let epoch = self.latest_epoch()?;
        let path  = self.dir.join(format!("model_epoch_{epoch}"));

        tracing::info!("Loading checkpoint from epoch {}", epoch);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display())
            })?;

        Ok(model.load_record(record))
    }

    /// Save the package metadata (k, vocabulary, antibiotic ordering).
    /// This must be written before training starts so a crash mid-run
    /// never leaves weights without their matching vocabulary.
    pub fn save_meta(&self, meta: &PackageMeta) -> Result<()> {
        let path = self.dir.join("package.json");
        let json = serde_json::to_string(meta)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write package metadata to '{}'", path.display()))?;
        tracing::debug!("Saved package metadata to '{}'", path.display());
        Ok(())
    }

    /// Load the package metadata.
    pub fn load_meta(&self) -> Result<PackageMeta> {
        let path = self.dir.join("package.json");
        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read package metadata from '{}'. \
                     Make sure you have run 'train' first.",
                    path.display()
                )
            })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save the training configuration for the record.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        Ok(())
    }

    /// Assemble the full model package from disk. Atomic in effect:
    /// any missing or corrupt piece fails the whole load, so callers
    /// get a fully valid package or an error — never a partial one.
    pub fn load_package(&self) -> Result<ModelPackage> {
        let meta = self.load_meta()?;

        let predictor = SequencePredictor::from_store(
            self,
            meta.vectorizer.vocab_size(),
            meta.antibiotics.len(),
        )?;

        let featurizer = KmerFeaturizer::new(meta.kmer_len);
        let panel      = AntibioticPanel::from_names(meta.antibiotics);

        tracing::info!(
            "Model package loaded: k={}, vocab={}, {} antibiotics",
            meta.kmer_len,
            meta.vectorizer.vocab_size(),
            panel.len(),
        );

        Ok(ModelPackage::new(featurizer, meta.vectorizer, predictor, panel))
    }

    /// Read latest_epoch.json and return the epoch number.
    fn latest_epoch(&self) -> Result<usize> {
        let path = self.dir.join("latest_epoch.json");
        let s = fs::read_to_string(&path)
            .with_context(|| {
                "Cannot find 'latest_epoch.json'. \
                 Have you run 'train' first?"
            })?;
        Ok(serde_json::from_str::<usize>(&s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::module::AutodiffModule;
    use crate::ml::model::ResistanceNetConfig;

    type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
    type InferBackend = burn::backend::NdArray;

    #[test]
    fn test_meta_round_trip_preserves_package() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());

        let vectorizer = KmerVectorizer::fit(&["ACGTAC CGTACG", "TTTACG"]);
        let meta = PackageMeta {
            kmer_len:    6,
            antibiotics: vec!["ampicillin".into(), "penicillin".into()],
            vectorizer,
        };

        store.save_meta(&meta).unwrap();
        let restored = store.load_meta().unwrap();

        assert_eq!(restored.kmer_len, 6);
        assert_eq!(restored.antibiotics, meta.antibiotics);
        assert_eq!(restored.vectorizer.vocab_size(), meta.vectorizer.vocab_size());
        assert_eq!(
            restored.vectorizer.transform_one("ACGTAC TTTACG").to_dense(),
            meta.vectorizer.transform_one("ACGTAC TTTACG").to_dense()
        );
    }

    #[test]
    fn test_weights_round_trip_preserves_predictions() {
        let dir    = tempfile::tempdir().unwrap();
        let store  = ModelStore::new(dir.path());
        let device = Default::default();

        let trained: ResistanceNet<TrainBackend> =
            ResistanceNetConfig::new(8, 3).init(&device);
        store.save_model(&trained, 1).unwrap();

        let fresh: ResistanceNet<InferBackend> =
            ResistanceNetConfig::new(8, 3).init(&device);
        let loaded = store.load_model(fresh, &device).unwrap();

        let input = Tensor::<InferBackend, 1>::from_floats(
            [1.0, 0.0, 2.0, 0.0, 1.0, 0.0, 0.0, 3.0].as_slice(), &device,
        ).reshape([1, 8]);

        let before: Vec<f32> = trained.valid()
            .forward(input.clone())
            .into_data().to_vec().unwrap();
        let after: Vec<f32> = loaded
            .forward(input)
            .into_data().to_vec().unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_package_round_trip_end_to_end() {
        let dir    = tempfile::tempdir().unwrap();
        let store  = ModelStore::new(dir.path());
        let device = Default::default();

        let vectorizer = KmerVectorizer::fit(&["ACGTAC CGTACG GTACGT TACGTA ACGTAC"]);
        let meta = PackageMeta {
            kmer_len:    6,
            antibiotics: vec!["ampicillin".into(), "penicillin".into()],
            vectorizer,
        };

        let model: ResistanceNet<TrainBackend> =
            ResistanceNetConfig::new(meta.vectorizer.vocab_size(), 2).init(&device);
        store.save_meta(&meta).unwrap();
        store.save_model(&model, 1).unwrap();

        let package = store.load_package().unwrap();

        // A normal sequence gets one decision per persisted antibiotic,
        // in the persisted order.
        let predictions = package.predict("ACGTACGTAC").unwrap();
        let names: Vec<String> = predictions.keys().cloned().collect();
        assert_eq!(names, ["ampicillin", "penicillin"]);

        // A sequence shorter than k featurizes to an all-zero vector
        // and must still yield the full mapping, not an error.
        let degenerate = package.predict("ACG").unwrap();
        assert_eq!(degenerate.len(), 2);

        // Reloading the same package gives identical predictions.
        let reloaded = store.load_package().unwrap();
        assert_eq!(reloaded.predict("ACGTACGTAC").unwrap(), predictions);
    }

    #[test]
    fn test_load_package_fails_wholesale_when_pieces_missing() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());

        // No metadata at all
        assert!(store.load_package().is_err());

        // Metadata alone is not enough — weights are still missing,
        // and the loader must not hand out a partial package.
        let meta = PackageMeta {
            kmer_len:    6,
            antibiotics: vec!["penicillin".into()],
            vectorizer:  KmerVectorizer::fit(&["ACGTAC"]),
        };
        store.save_meta(&meta).unwrap();
        assert!(store.load_package().is_err());
    }
}
