// ============================================================
// Layer 3 — Phenotype Domain Type
// ============================================================
// The binary outcome of a lab test for one (sample, antibiotic)
// pair. This is both the training label and the prediction output.

use serde::{Deserialize, Serialize};

/// Resistant/susceptible outcome for a single antibiotic.
/// Serialises to the strings "Resistant" / "Susceptible", which is
/// also the wire format of the prediction response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phenotype {
    Resistant,
    Susceptible,
}

impl Phenotype {
    /// Parse a raw phenotype cell from the dataset.
    /// Anything other than the two known labels returns None;
    /// the label-matrix builder maps None to 0 (susceptible).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Resistant"   => Some(Phenotype::Resistant),
            "Susceptible" => Some(Phenotype::Susceptible),
            _             => None,
        }
    }

    /// Build a phenotype from a binary classifier decision (1 → resistant).
    pub fn from_binary(resistant: bool) -> Self {
        if resistant { Phenotype::Resistant } else { Phenotype::Susceptible }
    }

    /// The training-label encoding: resistant = 1.0, susceptible = 0.0.
    pub fn as_binary(self) -> f32 {
        match self {
            Phenotype::Resistant   => 1.0,
            Phenotype::Susceptible => 0.0,
        }
    }

    /// Human-readable status string, identical to the serialised form.
    pub fn label(self) -> &'static str {
        match self {
            Phenotype::Resistant   => "Resistant",
            Phenotype::Susceptible => "Susceptible",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_labels() {
        assert_eq!(Phenotype::parse("Resistant"),    Some(Phenotype::Resistant));
        assert_eq!(Phenotype::parse(" Susceptible "), Some(Phenotype::Susceptible));
    }

    #[test]
    fn test_parse_unknown_label() {
        assert_eq!(Phenotype::parse("Intermediate"), None);
        assert_eq!(Phenotype::parse(""), None);
    }

    #[test]
    fn test_binary_round_trip() {
        assert_eq!(Phenotype::from_binary(true).as_binary(),  1.0);
        assert_eq!(Phenotype::from_binary(false).as_binary(), 0.0);
    }

    #[test]
    fn test_serialises_to_status_string() {
        let json = serde_json::to_string(&Phenotype::Resistant).unwrap();
        assert_eq!(json, "\"Resistant\"");
    }
}
