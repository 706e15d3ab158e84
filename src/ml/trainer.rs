// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + held-out evaluation loop using Burn's DataLoader
// and Adam.
//
//   - Training uses MyBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on MyInnerBackend (NdArray)
//   - The held-out batcher must also use MyInnerBackend

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::activation,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::ResistanceBatcher, dataset::ResistanceDataset};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::infra::model_store::ModelStore;
use crate::ml::model::{ResistanceNet, ResistanceNetConfig};

type MyBackend      = burn::backend::Autodiff<burn::backend::NdArray>;
type MyInnerBackend = burn::backend::NdArray;

/// Per-antibiotic loss weights, inverse to each class's frequency
/// within that antibiotic's own label column. Each antibiotic has
/// its own resistant/susceptible prevalence, so the correction is
/// per column, never global.
#[derive(Debug, Clone)]
pub struct ClassWeights {
    pub positive: Vec<f32>,
    pub negative: Vec<f32>,
}

impl ClassWeights {
    /// Balanced weights from the training partition's label rows:
    /// w_class = n / (2 * count_class), per column. Counts are
    /// clamped at 1 so a single-class column (behaviour undefined
    /// for that antibiotic) cannot divide by zero.
    pub fn balanced(label_rows: &[Vec<f32>], num_labels: usize) -> Self {
        let n = label_rows.len() as f32;
        let mut positive = Vec::with_capacity(num_labels);
        let mut negative = Vec::with_capacity(num_labels);

        for col in 0..num_labels {
            let pos = label_rows.iter().filter(|row| row[col] >= 0.5).count() as f32;
            let neg = n - pos;
            positive.push(n / (2.0 * pos.max(1.0)));
            negative.push(n / (2.0 * neg.max(1.0)));
        }

        Self { positive, negative }
    }

    fn to_tensors<B: Backend>(&self, device: &B::Device) -> (Tensor<B, 1>, Tensor<B, 1>) {
        (
            Tensor::<B, 1>::from_floats(self.positive.as_slice(), device),
            Tensor::<B, 1>::from_floats(self.negative.as_slice(), device),
        )
    }
}

pub fn run_training(
    cfg:             &TrainConfig,
    train_dataset:   ResistanceDataset,
    test_dataset:    ResistanceDataset,
    class_weights:   ClassWeights,
    vocab_size:      usize,
    num_antibiotics: usize,
    store:           ModelStore,
) -> Result<()> {
    let device = burn::backend::ndarray::NdArrayDevice::default();
    tracing::info!(
        "Training on {} samples ({} held out), vocab={}, antibiotics={}",
        train_dataset.sample_count(),
        test_dataset.sample_count(),
        vocab_size,
        num_antibiotics,
    );

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = ResistanceNetConfig::new(vocab_size, num_antibiotics);
    let mut model: ResistanceNet<MyBackend> = model_cfg.init(&device);

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Class weight tensors, one set per backend ─────────────────────────────
    let (train_w_pos, train_w_neg) = class_weights.to_tensors::<MyBackend>(&device);
    let (test_w_pos,  test_w_neg)  = class_weights.to_tensors::<MyInnerBackend>(&device);

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = ResistanceBatcher::<MyBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Held-out data loader (InnerBackend — no autodiff overhead) ────────────
    let test_batcher = ResistanceBatcher::<MyInnerBackend>::new(device.clone());
    let test_loader  = DataLoaderBuilder::new(test_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(test_dataset);

    let metrics_logger = MetricsLogger::new(&cfg.model_dir)?;
    let mut best_test_loss = f64::INFINITY;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(
                batch.features,
                batch.labels,
                train_w_pos.clone(),
                train_w_neg.clone(),
            );

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Held-out evaluation phase ─────────────────────────────────────────
        let model_valid = model.valid();

        let mut test_loss_sum = 0.0f64;
        let mut test_batches  = 0usize;
        let mut correct_cells = 0usize;
        let mut total_cells   = 0usize;

        for batch in test_loader.iter() {
            let (loss, logits) = model_valid.forward_loss(
                batch.features,
                batch.labels.clone(),
                test_w_pos.clone(),
                test_w_neg.clone(),
            );

            test_loss_sum += loss.into_scalar().elem::<f64>();
            test_batches  += 1;

            // Per-cell accuracy: each (sample, antibiotic) decision
            // is an independent binary prediction.
            let [batch_size, num_labels] = logits.dims();
            let predicted = activation::sigmoid(logits).greater_elem(0.5).int();
            let actual    = batch.labels.greater_elem(0.5).int();

            let correct: i64 = predicted
                .equal(actual)
                .int().sum().into_scalar().elem::<i64>();

            correct_cells += correct as usize;
            total_cells   += batch_size * num_labels;
        }

        let avg_test_loss = if test_batches > 0 { test_loss_sum / test_batches as f64 } else { f64::NAN };
        let label_acc     = if total_cells  > 0 { correct_cells as f64 / total_cells as f64 } else { 0.0 };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | test_loss={:.4} | label_acc={:.1}%",
            epoch, cfg.epochs, avg_train_loss, avg_test_loss, label_acc * 100.0,
        );

        let metrics = EpochMetrics::new(epoch, avg_train_loss, avg_test_loss, label_acc);
        metrics_logger.log(&metrics)?;

        if metrics.is_improvement(best_test_loss) {
            best_test_loss = metrics.test_loss;
            tracing::debug!("New best held-out loss at epoch {}", epoch);
        }

        store.save_model(&model, epoch)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!("Training complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_weights_per_column() {
        // Column 0: 1 positive of 4 rows; column 1: 2 positives of 4.
        let rows = vec![
            vec![1.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
        ];
        let w = ClassWeights::balanced(&rows, 2);

        assert_eq!(w.positive[0], 4.0 / 2.0); // n/(2*1)
        assert_eq!(w.negative[0], 4.0 / 6.0); // n/(2*3)
        assert_eq!(w.positive[1], 1.0);       // n/(2*2)
        assert_eq!(w.negative[1], 1.0);
    }

    #[test]
    fn test_single_class_column_does_not_divide_by_zero() {
        let rows = vec![vec![0.0], vec![0.0]];
        let w = ClassWeights::balanced(&rows, 1);
        assert!(w.positive[0].is_finite());
        assert!(w.negative[0].is_finite());
    }
}
