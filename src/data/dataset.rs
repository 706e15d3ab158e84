use burn::data::dataset::Dataset;

use crate::data::vectorizer::FeatureVector;

/// One featurized training sample: the sparse count vector for a
/// sequence plus its label-matrix row (one {0,1} cell per panel
/// antibiotic).
#[derive(Debug, Clone)]
pub struct ResistanceSample {
    pub features: FeatureVector,
    pub labels:   Vec<f32>,
}

pub struct ResistanceDataset {
    samples: Vec<ResistanceSample>,
}

impl ResistanceDataset {
    pub fn new(samples: Vec<ResistanceSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<ResistanceSample> for ResistanceDataset {
    fn get(&self, index: usize) -> Option<ResistanceSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
