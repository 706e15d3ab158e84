// ============================================================
// Layer 4 — K-mer Featurizer
// ============================================================
// Converts a raw biological sequence into a space-joined document
// of overlapping fixed-length substrings (k-mers). Overlapping
// substrings act as a bag-of-words surrogate for local sequence
// motifs: position is discarded in exchange for a fixed-size
// representation regardless of input length.
//
// Cleaning applied before token extraction:
//   1. Uppercase the whole sequence
//   2. Remove every ambiguity symbol ('N')
//
// A cleaned sequence of length L yields max(0, L-k+1) tokens in
// left-to-right order. Sequences shorter than k yield the empty
// document; the vectorizer maps that to an all-zero vector.

/// The ambiguity symbol stripped from sequences before tokenisation
const AMBIGUITY_SYMBOL: char = 'N';

/// Stateless k-mer extractor. Pure: the same input always yields
/// the same document, and no call can fail.
#[derive(Debug, Clone, Copy)]
pub struct KmerFeaturizer {
    k: usize,
}

impl KmerFeaturizer {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Uppercase and strip ambiguity symbols.
    pub fn clean(&self, sequence: &str) -> String {
        sequence
            .to_uppercase()
            .chars()
            .filter(|&c| c != AMBIGUITY_SYMBOL)
            .collect()
    }

    /// Produce the space-joined k-mer token document for one sequence.
    pub fn featurize(&self, sequence: &str) -> String {
        let cleaned: Vec<char> = self.clean(sequence).chars().collect();
        if cleaned.len() < self.k {
            return String::new();
        }

        let tokens: Vec<String> = cleaned
            .windows(self.k)
            .map(|w| w.iter().collect())
            .collect();
        tokens.join(" ")
    }
}
