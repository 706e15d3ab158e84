// ============================================================
// Layer 4 — Phenotype CSV Loader
// ============================================================
// Loads the raw tabular dataset using the csv crate and applies
// the two static data-quality heuristics that run before any
// other pipeline step:
//
//   1. Drop columns whose missing-value fraction exceeds the
//      configured threshold (an empty or whitespace-only cell
//      counts as missing).
//   2. Keep only a bounded prefix of rows.
//
// The loader then maps each surviving row to a PhenotypeRecord
// from the three data columns. Rows with an unparseable phenotype
// are kept — the label-matrix builder binarizes them to 0 — but
// they are counted and reported once at warn level so the masking
// is visible in the logs.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::domain::phenotype::Phenotype;
use crate::domain::record::PhenotypeRecord;
use crate::domain::traits::RecordSource;

const SEQUENCE_COLUMN:   &str = "Epitope Sequence";
const ANTIBIOTIC_COLUMN: &str = "Antibiotic";
const PHENOTYPE_COLUMN:  &str = "Resistant Phenotype";

/// Loads phenotype records from a CSV file.
/// Implements the RecordSource trait from Layer 3.
pub struct CsvRecordSource {
    path:              PathBuf,
    missing_threshold: f64,
    max_rows:          usize,
}

impl CsvRecordSource {
    pub fn new(path: impl Into<PathBuf>, missing_threshold: f64, max_rows: usize) -> Self {
        Self {
            path: path.into(),
            missing_threshold,
            max_rows,
        }
    }
}

impl RecordSource for CsvRecordSource {
    fn load_all(&self) -> Result<Vec<PhenotypeRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Cannot open dataset '{}'", self.path.display()))?;

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| "Cannot read CSV header row")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let rows: Vec<csv::StringRecord> = reader
            .records()
            .collect::<Result<_, _>>()
            .with_context(|| format!("Malformed row in '{}'", self.path.display()))?;

        if rows.is_empty() {
            bail!("Dataset '{}' contains no data rows", self.path.display());
        }

        // Static data-quality heuristic: columns that are mostly empty
        // carry no usable signal and are removed before anything else.
        let kept = columns_below_missing_threshold(&headers, &rows, self.missing_threshold);
        let dropped = headers.len() - kept.len();
        if dropped > 0 {
            tracing::info!(
                "Dropped {} column(s) with > {:.0}% missing values",
                dropped,
                self.missing_threshold * 100.0
            );
        }

        let seq_col  = required_column(&kept, &headers, SEQUENCE_COLUMN)?;
        let abx_col  = required_column(&kept, &headers, ANTIBIOTIC_COLUMN)?;
        let phen_col = required_column(&kept, &headers, PHENOTYPE_COLUMN)?;

        let mut records   = Vec::new();
        let mut unparsed  = 0usize;

        for row in rows.iter().take(self.max_rows) {
            let sequence   = row.get(seq_col).unwrap_or("").trim();
            let antibiotic = row.get(abx_col).unwrap_or("").trim();
            let raw_phen   = row.get(phen_col).unwrap_or("").trim();

            if sequence.is_empty() || antibiotic.is_empty() {
                continue;
            }

            let phenotype = Phenotype::parse(raw_phen);
            if phenotype.is_none() {
                unparsed += 1;
            }
            records.push(PhenotypeRecord::new(sequence, antibiotic, phenotype));
        }

        if unparsed > 0 {
            tracing::warn!(
                "{} row(s) had an unrecognised phenotype value — binarized to 0 (susceptible)",
                unparsed
            );
        }

        tracing::info!(
            "Loaded {} records from '{}' (row cap {})",
            records.len(),
            self.path.display(),
            self.max_rows
        );
        Ok(records)
    }
}

/// Indices of the columns whose missing-value fraction is within the
/// threshold. An empty or whitespace-only cell counts as missing.
fn columns_below_missing_threshold(
    headers:   &[String],
    rows:      &[csv::StringRecord],
    threshold: f64,
) -> Vec<usize> {
    let total = rows.len() as f64;
    (0..headers.len())
        .filter(|&col| {
            let missing = rows
                .iter()
                .filter(|row| row.get(col).map_or(true, |cell| cell.trim().is_empty()))
                .count() as f64;
            missing / total <= threshold
        })
        .collect()
}

/// Resolve a named column, requiring that it both exists in the header
/// and survived the missing-value drop.
fn required_column(kept: &[usize], headers: &[String], name: &str) -> Result<usize> {
    let idx = headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("Dataset is missing required column '{name}'"))?;

    if !kept.contains(&idx) {
        bail!("Required column '{name}' exceeded the missing-value threshold");
    }
    Ok(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_records_and_parses_phenotypes() {
        let file = write_csv(
            "Epitope Sequence,Antibiotic,Resistant Phenotype\n\
             ACGTACGT,penicillin,Resistant\n\
             TTTTACGT,ampicillin,Susceptible\n",
        );
        let source  = CsvRecordSource::new(file.path(), 0.5, 10_000);
        let records = source.load_all().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].antibiotic, "penicillin");
        assert_eq!(records[0].phenotype, Some(Phenotype::Resistant));
        assert_eq!(records[1].phenotype, Some(Phenotype::Susceptible));
    }

    #[test]
    fn test_row_cap_applies() {
        let file = write_csv(
            "Epitope Sequence,Antibiotic,Resistant Phenotype\n\
             AAAA,penicillin,Resistant\n\
             CCCC,penicillin,Resistant\n\
             GGGG,penicillin,Resistant\n",
        );
        let source  = CsvRecordSource::new(file.path(), 0.5, 2);
        let records = source.load_all().unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_mostly_empty_required_column_is_an_error() {
        let file = write_csv(
            "Epitope Sequence,Antibiotic,Resistant Phenotype\n\
             ACGT,penicillin,\n\
             TTTT,ampicillin,\n\
             GGGG,ampicillin,Resistant\n",
        );
        let source = CsvRecordSource::new(file.path(), 0.5, 10_000);
        let err    = source.load_all().unwrap_err();
        assert!(err.to_string().contains("Resistant Phenotype"));
    }

    #[test]
    fn test_unknown_phenotype_kept_as_none() {
        let file = write_csv(
            "Epitope Sequence,Antibiotic,Resistant Phenotype\n\
             ACGT,penicillin,Intermediate\n",
        );
        let source  = CsvRecordSource::new(file.path(), 0.5, 10_000);
        let records = source.load_all().unwrap();
        assert_eq!(records[0].phenotype, None);
    }

    #[test]
    fn test_missing_required_column_is_an_error() {
        let file   = write_csv("Sequence,Drug\nACGT,penicillin\n");
        let source = CsvRecordSource::new(file.path(), 0.5, 10_000);
        assert!(source.load_all().is_err());
    }
}
