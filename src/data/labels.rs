// ============================================================
// Layer 4 — Antibiotic Panel and Label Matrix
// ============================================================
// The panel is the ordered, deduplicated list of antibiotic names
// seen in the training data. The ordering is assigned once, here,
// and persisted inside the model package — prediction output
// columns are named from the persisted ordering, never recomputed.
//
// The label matrix has one row per training record and one column
// per panel antibiotic. A record only observes its own antibiotic,
// so exactly one cell per row can be non-zero; every unobserved
// (record, antibiotic) cell defaults to 0 (susceptible). That
// default is a modelling assumption, not a measured value.

use serde::{Deserialize, Serialize};

use crate::domain::record::PhenotypeRecord;

/// The frozen antibiotic ordering. Names are sorted and
/// deduplicated, so the same training data always produces the
/// same column layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntibioticPanel {
    names: Vec<String>,
}

impl AntibioticPanel {
    /// Collect the distinct antibiotic names from the training records.
    pub fn from_records(records: &[PhenotypeRecord]) -> Self {
        let mut names: Vec<String> = records
            .iter()
            .map(|r| r.antibiotic.clone())
            .collect();
        names.sort_unstable();
        names.dedup();
        Self { names }
    }

    /// Rebuild a panel from a persisted ordering.
    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column index of an antibiotic, if it is on the panel.
    pub fn index_of(&self, antibiotic: &str) -> Option<usize> {
        self.names.iter().position(|n| n == antibiotic)
    }
}

/// Build the label matrix: one row per record, one column per
/// panel antibiotic. Unrecognised phenotype values binarize to 0,
/// matching the unobserved-cell default.
pub fn build_label_matrix(records: &[PhenotypeRecord], panel: &AntibioticPanel) -> Vec<Vec<f32>> {
    records
        .iter()
        .map(|record| {
            let mut row = vec![0.0; panel.len()];
            if let Some(col) = panel.index_of(&record.antibiotic) {
                if let Some(phenotype) = record.phenotype {
                    row[col] = phenotype.as_binary();
                }
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::phenotype::Phenotype;

    fn records() -> Vec<PhenotypeRecord> {
        vec![
            PhenotypeRecord::new("ACGT", "penicillin",   Phenotype::parse("Resistant")),
            PhenotypeRecord::new("ACGT", "ampicillin",   Phenotype::parse("Susceptible")),
            PhenotypeRecord::new("TTTT", "penicillin",   Phenotype::parse("Susceptible")),
            PhenotypeRecord::new("GGGG", "ciprofloxacin", Phenotype::parse("Resistant")),
        ]
    }

    #[test]
    fn test_panel_sorted_and_deduplicated() {
        let panel = AntibioticPanel::from_records(&records());
        assert_eq!(panel.names(), ["ampicillin", "ciprofloxacin", "penicillin"]);
    }

    #[test]
    fn test_one_observed_cell_per_row() {
        let recs  = records();
        let panel = AntibioticPanel::from_records(&recs);
        let y     = build_label_matrix(&recs, &panel);

        assert_eq!(y.len(), 4);
        // Row 0: penicillin resistant → [0, 0, 1]
        assert_eq!(y[0], vec![0.0, 0.0, 1.0]);
        // Row 1: ampicillin susceptible → all zero
        assert_eq!(y[1], vec![0.0, 0.0, 0.0]);
        // Row 3: ciprofloxacin resistant → [0, 1, 0]
        assert_eq!(y[3], vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unparsed_phenotype_defaults_to_zero() {
        let recs = vec![
            PhenotypeRecord::new("ACGT", "penicillin", Phenotype::parse("Intermediate")),
        ];
        let panel = AntibioticPanel::from_records(&recs);
        let y     = build_label_matrix(&recs, &panel);
        assert_eq!(y[0], vec![0.0]);
    }

    #[test]
    fn test_column_count_matches_panel() {
        let recs  = records();
        let panel = AntibioticPanel::from_records(&recs);
        let y     = build_label_matrix(&recs, &panel);
        assert!(y.iter().all(|row| row.len() == panel.len()));
    }
}
