// ============================================================
// Layer 4 — Resistance Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec of sparse
// ResistanceSamples into dense tensors.
//
// How batching works here:
//   Input:  Vec of N samples, each with a sparse count vector of
//           dimension V (the fitted vocabulary size) and a label
//           row of width A (the antibiotic panel size)
//   Output: ResistanceBatch with features [N, V] and labels [N, A]
//
// Densification happens here, per batch, so the full training set
// never has to exist as a dense matrix in memory.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::ResistanceSample;

/// A batch of resistance samples ready for the model forward pass.
/// Both tensors have batch_size as their first dimension.
#[derive(Debug, Clone)]
pub struct ResistanceBatch<B: Backend> {
    /// K-mer count vectors — shape: [batch_size, vocab_size]
    pub features: Tensor<B, 2>,

    /// Per-antibiotic {0,1} labels — shape: [batch_size, num_antibiotics]
    pub labels: Tensor<B, 2>,
}

/// The batcher struct — holds the target device so tensors
/// are created in the right place.
#[derive(Clone, Debug)]
pub struct ResistanceBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ResistanceBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<ResistanceSample, ResistanceBatch<B>> for ResistanceBatcher<B> {
    /// Scatter each sample's sparse entries into one flat dense
    /// buffer, then reshape to [batch, vocab]. Labels are already
    /// dense rows and only need flattening.
    fn batch(&self, items: Vec<ResistanceSample>) -> ResistanceBatch<B> {
        let batch_size = items.len();
        // All vectors share the fitted vocabulary dimensionality
        let vocab_size = items[0].features.dim;
        let num_labels = items[0].labels.len();

        let mut features_flat = vec![0.0f32; batch_size * vocab_size];
        for (row, sample) in items.iter().enumerate() {
            let offset = row * vocab_size;
            for &(col, count) in &sample.features.entries {
                features_flat[offset + col as usize] = count;
            }
        }

        let labels_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.labels.iter().copied())
            .collect();

        let features = Tensor::<B, 1>::from_floats(
            features_flat.as_slice(), &self.device
        ).reshape([batch_size, vocab_size]);

        let labels = Tensor::<B, 1>::from_floats(
            labels_flat.as_slice(), &self.device
        ).reshape([batch_size, num_labels]);

        ResistanceBatch { features, labels }
    }
}
