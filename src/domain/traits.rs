// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits so that
// concrete data sources can be swapped without touching the
// orchestration code.

use anyhow::Result;
use crate::domain::record::PhenotypeRecord;

/// Any component that can produce the labelled phenotype records
/// used for training.
///
/// Implementations:
///   - CsvRecordSource → loads from a phenotype CSV file
pub trait RecordSource {
    /// Load all available records from this source.
    fn load_all(&self) -> Result<Vec<PhenotypeRecord>>;
}
