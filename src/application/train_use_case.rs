// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load phenotype records      (Layer 4 - data)
//   Step 2: Featurize sequences         (Layer 4 - data)
//   Step 3: Fit vectorizer, transform   (Layer 4 - data)
//   Step 4: Freeze antibiotic panel     (Layer 4 - data)
//   Step 5: Build label matrix          (Layer 4 - data)
//   Step 6: Split train/held-out        (Layer 4 - data)
//   Step 7: Compute class weights       (Layer 5 - ml)
//   Step 8: Persist package metadata    (Layer 6 - infra)
//   Step 9: Run training loop           (Layer 5 - ml)

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::{ResistanceDataset, ResistanceSample},
    featurizer::KmerFeaturizer,
    labels::{build_label_matrix, AntibioticPanel},
    loader::CsvRecordSource,
    splitter::split_train_test,
    vectorizer::KmerVectorizer,
};
use crate::domain::traits::RecordSource;
use crate::infra::model_store::{ModelStore, PackageMeta};
use crate::ml::trainer::{run_training, ClassWeights};

// ─── Training Configuration ──────────────────────────────────────────────────
// All knobs for a training run. The reproducibility constants (row
// cap, split seed, held-out fraction, k, missing-column threshold)
// are deliberate configuration values rather than embedded constants.
// Serialisable so the exact run parameters are kept with the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:         String,
    pub model_dir:         String,
    pub kmer_len:          usize,
    pub max_rows:          usize,
    pub missing_threshold: f64,
    pub test_fraction:     f64,
    pub seed:              u64,
    pub epochs:            usize,
    pub batch_size:        usize,
    pub lr:                f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:         "data/phenotypes.csv".to_string(),
            model_dir:         "model".to_string(),
            kmer_len:          6,
            max_rows:          10_000,
            missing_threshold: 0.5,
            test_fraction:     0.2,
            seed:              42,
            epochs:            25,
            batch_size:        32,
            lr:                1e-2,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load phenotype records ────────────────────────────────────
        // The loader drops mostly-empty columns and caps the row count
        // before anything else sees the data.
        tracing::info!("Loading dataset from '{}'", cfg.data_path);
        let source  = CsvRecordSource::new(&cfg.data_path, cfg.missing_threshold, cfg.max_rows);
        let records = source.load_all()?;
        ensure!(!records.is_empty(), "No usable records in '{}'", cfg.data_path);

        // ── Step 2: Featurize sequences into k-mer documents ──────────────────
        let featurizer = KmerFeaturizer::new(cfg.kmer_len);
        let documents: Vec<String> = records
            .iter()
            .map(|r| featurizer.featurize(&r.sequence))
            .collect();

        // ── Step 3: Fit vectorizer on the full retained set, transform ────────
        let vectorizer = KmerVectorizer::fit(&documents);
        ensure!(
            vectorizer.vocab_size() > 0,
            "Empty vocabulary — every sequence is shorter than k={}",
            cfg.kmer_len
        );
        let features = vectorizer.transform(&documents);
        tracing::info!(
            "Vectorizer fitted: {} distinct {}-mers",
            vectorizer.vocab_size(),
            cfg.kmer_len
        );

        // ── Step 4: Freeze the antibiotic ordering ────────────────────────────
        // This ordering is persisted with the package; losing it would
        // silently misattribute every future prediction.
        let panel = AntibioticPanel::from_records(&records);
        ensure!(!panel.is_empty(), "No antibiotic names in the dataset");
        tracing::info!("Antibiotic panel: {} drugs", panel.len());

        // ── Step 5: Binarize phenotypes into the label matrix ─────────────────
        let label_rows = build_label_matrix(&records, &panel);

        // ── Step 6: Pair features with labels, split train/held-out ───────────
        let samples: Vec<ResistanceSample> = features
            .into_iter()
            .zip(label_rows)
            .map(|(features, labels)| ResistanceSample { features, labels })
            .collect();

        let (train_samples, test_samples) =
            split_train_test(samples, cfg.test_fraction, cfg.seed);
        tracing::info!(
            "Split: {} train, {} held out (seed {})",
            train_samples.len(),
            test_samples.len(),
            cfg.seed
        );

        // ── Step 7: Class weights from the training partition only ────────────
        let train_label_rows: Vec<Vec<f32>> = train_samples
            .iter()
            .map(|s| s.labels.clone())
            .collect();
        let class_weights = ClassWeights::balanced(&train_label_rows, panel.len());

        // ── Step 8: Persist config + package metadata before training ─────────
        // Metadata first: a crash mid-training must never leave weights
        // on disk without the vocabulary and ordering that decode them.
        let store = ModelStore::new(&cfg.model_dir);
        store.save_config(cfg)?;
        store.save_meta(&PackageMeta {
            kmer_len:    cfg.kmer_len,
            antibiotics: panel.names().to_vec(),
            vectorizer:  vectorizer.clone(),
        })?;

        // ── Step 9: Run training loop (Layer 5) ───────────────────────────────
        let vocab_size      = vectorizer.vocab_size();
        let num_antibiotics = panel.len();
        run_training(
            cfg,
            ResistanceDataset::new(train_samples),
            ResistanceDataset::new(test_samples),
            class_weights,
            vocab_size,
            num_antibiotics,
            store,
        )?;

        Ok(())
    }
}
