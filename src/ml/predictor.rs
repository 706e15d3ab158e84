// ============================================================
// Layer 5 — Sequence Predictor
// ============================================================
use anyhow::Result;
use burn::{prelude::*, tensor::activation};

use crate::data::vectorizer::FeatureVector;
use crate::infra::model_store::ModelStore;
use crate::ml::model::{ResistanceNet, ResistanceNetConfig};

type InferBackend = burn::backend::NdArray;

/// Inference-side classifier: the trained net rebuilt from the
/// persisted package, answering one count vector at a time.
pub struct SequencePredictor {
    model:  ResistanceNet<InferBackend>,
    device: burn::backend::ndarray::NdArrayDevice,
}

impl SequencePredictor {
    /// Rebuild the architecture from the persisted dimensions and
    /// load the latest checkpointed weights into it.
    pub fn from_store(
        store:           &ModelStore,
        vocab_size:      usize,
        num_antibiotics: usize,
    ) -> Result<Self> {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let model_cfg = ResistanceNetConfig::new(vocab_size, num_antibiotics);
        let model: ResistanceNet<InferBackend> = model_cfg.init(&device);
        let model = store.load_model(model, &device)?;
        tracing::info!("Classifier weights loaded from checkpoint");
        Ok(Self { model, device })
    }

    /// One independent resistant(true)/susceptible(false) decision per
    /// antibiotic column. Output length always equals the number of
    /// columns the net was trained with, whatever the input counts.
    pub fn predict_binary(&self, features: &FeatureVector) -> Result<Vec<bool>> {
        let dense = features.to_dense();
        let input = Tensor::<InferBackend, 1>::from_floats(
            dense.as_slice(), &self.device,
        ).reshape([1, features.dim]);

        let logits = self.model.forward(input);
        let probs: Vec<f32> = activation::sigmoid(logits)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read prediction tensor: {e:?}"))?;

        Ok(probs.into_iter().map(|p| p > 0.5).collect())
    }
}
