// ============================================================
// Layer 4 — K-mer Count Vectorizer
// ============================================================
// Learns a fixed vocabulary of k-mer tokens at training time and
// maps any token document to a count vector over that vocabulary.
//
// Fit once, then frozen: `transform` never adds tokens, and tokens
// that were not seen at fit time are silently dropped. That drop is
// an explicit policy — an unseen k-mer contributes nothing to the
// feature vector, and the output dimensionality is always the
// fitted vocabulary size.
//
// Indices are assigned in lexicographic token order so the mapping
// is deterministic for a given training corpus and survives a
// serde round trip unchanged.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// A sparse count vector over the fitted vocabulary.
/// `entries` holds (column index, count) pairs sorted by index;
/// `dim` is the full vocabulary size so an empty entry list still
/// denotes an all-zero vector of the right width.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub dim:     usize,
    pub entries: Vec<(u32, f32)>,
}

impl FeatureVector {
    /// Densify into a Vec of length `dim`. Used by the batcher and
    /// by tests; the sparse form is the working representation.
    pub fn to_dense(&self) -> Vec<f32> {
        let mut dense = vec![0.0; self.dim];
        for &(idx, count) in &self.entries {
            dense[idx as usize] = count;
        }
        dense
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The fitted vocabulary: every distinct k-mer token observed at
/// training time, mapped to a stable column index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KmerVectorizer {
    vocab: HashMap<String, u32>,
}

impl KmerVectorizer {
    /// Build the vocabulary from the union of whitespace-separated
    /// tokens across all training documents.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut distinct: BTreeSet<&str> = BTreeSet::new();
        for doc in documents {
            for token in doc.as_ref().split_whitespace() {
                distinct.insert(token);
            }
        }

        let vocab = distinct
            .into_iter()
            .enumerate()
            .map(|(idx, token)| (token.to_string(), idx as u32))
            .collect();
        Self { vocab }
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Map one token document to its count vector. Unknown tokens
    /// are dropped; an empty document yields an all-zero vector.
    pub fn transform_one(&self, document: &str) -> FeatureVector {
        let mut counts: HashMap<u32, f32> = HashMap::new();
        for token in document.split_whitespace() {
            if let Some(&idx) = self.vocab.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(u32, f32)> = counts.into_iter().collect();
        entries.sort_unstable_by_key(|&(idx, _)| idx);

        FeatureVector {
            dim: self.vocab.len(),
            entries,
        }
    }

    /// Map a batch of documents. Output order matches input order.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Vec<FeatureVector> {
        documents
            .iter()
            .map(|doc| self.transform_one(doc.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted() -> KmerVectorizer {
        KmerVectorizer::fit(&["ACG CGT", "ACG TTT"])
    }

    #[test]
    fn test_vocab_is_distinct_tokens() {
        let v = fitted();
        assert_eq!(v.vocab_size(), 3); // ACG, CGT, TTT
    }

    #[test]
    fn test_counts_repeated_tokens() {
        let v  = fitted();
        let fv = v.transform_one("ACG ACG CGT");
        let dense = fv.to_dense();
        assert_eq!(dense.len(), 3);
        // Lexicographic order: ACG=0, CGT=1, TTT=2
        assert_eq!(dense, vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unseen_tokens_dropped_without_error() {
        let v  = fitted();
        let fv = v.transform_one("GGG AAA");
        assert!(fv.is_zero());
        assert_eq!(fv.dim, 3);
        assert_eq!(fv.to_dense(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_document_yields_zero_vector() {
        let v  = fitted();
        let fv = v.transform_one("");
        assert!(fv.is_zero());
        assert_eq!(fv.to_dense().len(), 3);
    }

    #[test]
    fn test_transform_never_grows_vocabulary() {
        let v = fitted();
        let before = v.vocab_size();
        let _ = v.transform(&["ZZZ YYY XXX"]);
        assert_eq!(v.vocab_size(), before);
    }

    #[test]
    fn test_serde_round_trip_preserves_indices() {
        let v = fitted();
        let json     = serde_json::to_string(&v).unwrap();
        let restored: KmerVectorizer = serde_json::from_str(&json).unwrap();
        assert_eq!(
            v.transform_one("ACG CGT TTT").to_dense(),
            restored.transform_one("ACG CGT TTT").to_dense()
        );
    }
}
