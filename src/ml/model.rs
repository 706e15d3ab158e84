use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct ResistanceNetConfig {
    pub vocab_size:      usize,
    pub num_antibiotics: usize,
}

impl ResistanceNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ResistanceNet<B> {
        let head = LinearConfig::new(self.vocab_size, self.num_antibiotics).init(device);
        ResistanceNet { head }
    }
}

/// One logistic decision per antibiotic over the k-mer count vector.
///
/// A single linear layer with one output column per antibiotic: each
/// column has its own weights and bias, and the loss decomposes as a
/// sum of per-column terms, so no decision ever depends on another
/// antibiotic's column.
#[derive(Module, Debug)]
pub struct ResistanceNet<B: Backend> {
    pub head: Linear<B>,
}

impl<B: Backend> ResistanceNet<B> {
    /// features: [batch, vocab_size] → logits: [batch, num_antibiotics]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        self.head.forward(features)
    }

    /// Class-weighted binary cross-entropy over all label columns.
    ///
    /// `pos_weight` / `neg_weight` are per-antibiotic ([num_antibiotics])
    /// and scale the loss terms of class 1 / class 0 within each column,
    /// correcting that column's own class imbalance. Computed from the
    /// training partition only.
    pub fn forward_loss(
        &self,
        features:   Tensor<B, 2>,
        targets:    Tensor<B, 2>,
        pos_weight: Tensor<B, 1>,
        neg_weight: Tensor<B, 1>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(features);
        let [batch_size, num_labels] = logits.dims();

        // Clamp keeps log() finite when the sigmoid saturates.
        let probs = activation::sigmoid(logits.clone()).clamp(1e-7, 1.0 - 1e-7);

        let w_pos = pos_weight.unsqueeze::<2>().expand([batch_size, num_labels]);
        let w_neg = neg_weight.unsqueeze::<2>().expand([batch_size, num_labels]);

        let pos_term = targets.clone() * probs.clone().log() * w_pos;
        let neg_term = (targets.neg() + 1.0) * (probs.neg() + 1.0).log() * w_neg;

        let loss = (pos_term + neg_term).mean().neg();
        (loss, logits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_forward_output_width_equals_antibiotic_count() {
        let device = Default::default();
        let model: ResistanceNet<TestBackend> =
            ResistanceNetConfig::new(8, 3).init(&device);

        let input = Tensor::<TestBackend, 1>::from_floats(
            [0.0; 8].as_slice(), &device,
        ).reshape([1, 8]);

        let logits = model.forward(input);
        assert_eq!(logits.dims(), [1, 3]);
    }

    #[test]
    fn test_zero_vector_still_produces_full_output() {
        // A sequence shorter than k featurizes to an all-zero vector;
        // the model must still emit one logit per antibiotic.
        let device = Default::default();
        let model: ResistanceNet<TestBackend> =
            ResistanceNetConfig::new(16, 5).init(&device);

        let input = Tensor::<TestBackend, 1>::from_floats(
            vec![0.0f32; 16].as_slice(), &device,
        ).reshape([1, 16]);

        let logits = model.forward(input);
        assert_eq!(logits.dims(), [1, 5]);
    }

    #[test]
    fn test_loss_is_finite_on_unbalanced_batch() {
        let device = Default::default();
        let model: ResistanceNet<TestBackend> =
            ResistanceNetConfig::new(4, 2).init(&device);

        let features = Tensor::<TestBackend, 1>::from_floats(
            [1.0, 0.0, 2.0, 0.0, 0.0, 1.0, 0.0, 3.0].as_slice(), &device,
        ).reshape([2, 4]);
        let targets = Tensor::<TestBackend, 1>::from_floats(
            [1.0, 0.0, 0.0, 0.0].as_slice(), &device,
        ).reshape([2, 2]);
        let pos = Tensor::<TestBackend, 1>::from_floats([1.0, 1.0].as_slice(), &device);
        let neg = Tensor::<TestBackend, 1>::from_floats([1.0, 1.0].as_slice(), &device);

        let (loss, logits) = model.forward_loss(features, targets, pos, neg);
        assert_eq!(logits.dims(), [2, 2]);
        let loss_val: f64 = loss.into_scalar().elem::<f64>();
        assert!(loss_val.is_finite());
    }
}
