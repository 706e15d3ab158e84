// ============================================================
// Layer 2 — Prediction Service
// ============================================================
// Holds the one loaded model package for the lifetime of the
// process and answers single-sequence prediction requests.
//
// Two states:
//   Unloaded — initial; no package in memory. Every prediction
//              request fails fast with ModelUnavailable.
//   Loaded   — a package was deserialized successfully at startup
//              and is never mutated afterwards.
//
// The package sits behind a swappable reference: readers clone the
// Arc out of the lock and run the whole featurize → transform →
// classify chain outside it, so concurrent requests never contend
// and can never observe a partially constructed package. Load is
// the only writer, and it replaces the whole reference at once.
// A failed request leaves the package loaded and untouched.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::domain::phenotype::Phenotype;
use crate::infra::model_store::ModelStore;
use crate::ml::package::ModelPackage;

/// The prediction-time error taxonomy surfaced to the transport.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No model package is loaded — the service is degraded and the
    /// caller should treat this as service-unavailable.
    #[error("Model not loaded")]
    ModelUnavailable,

    /// The pipeline failed after the package was consulted. The
    /// package stays loaded; only this request is affected.
    #[error("Prediction error: {0}")]
    Prediction(anyhow::Error),
}

impl From<anyhow::Error> for ServiceError {
    fn from(e: anyhow::Error) -> Self {
        ServiceError::Prediction(e)
    }
}

pub struct PredictionService {
    package: RwLock<Option<Arc<ModelPackage>>>,
}

impl PredictionService {
    /// A service with no package — every predict call fails fast
    /// until a load succeeds.
    pub fn unloaded() -> Self {
        Self { package: RwLock::new(None) }
    }

    /// Startup construction: try the one-time load and degrade to
    /// Unloaded on failure instead of crashing the process. There is
    /// no retry — a degraded service stays degraded until restart.
    pub fn with_startup_load(store: &ModelStore) -> Self {
        let service = Self::unloaded();
        match service.load(store) {
            Ok(())  => {}
            Err(e)  => {
                tracing::error!("Error loading model package: {e:#}");
                tracing::warn!("Serving in degraded mode — predictions will fail until retrained");
            }
        }
        service
    }

    /// Load a package from the store, replacing the whole reference
    /// atomically. On error the previous state is left untouched.
    pub fn load(&self, store: &ModelStore) -> anyhow::Result<()> {
        let package = store.load_package()?;
        let mut slot = self.package.write().expect("package lock poisoned");
        *slot = Some(Arc::new(package));
        Ok(())
    }

    /// Whether a package is currently resident. Exposed directly by
    /// the transport's health endpoint.
    pub fn is_loaded(&self) -> bool {
        self.package.read().expect("package lock poisoned").is_some()
    }

    /// Classify one sequence against every antibiotic on the panel.
    /// Read-only: the package reference is cloned out of the lock and
    /// the pipeline runs without holding it.
    pub fn predict(
        &self,
        sequence: &str,
    ) -> Result<BTreeMap<String, Phenotype>, ServiceError> {
        let package = {
            let slot = self.package.read().expect("package lock poisoned");
            slot.clone().ok_or(ServiceError::ModelUnavailable)?
        };

        let predictions = package.predict(sequence)?;
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unloaded_service_fails_fast() {
        let service = PredictionService::unloaded();
        assert!(!service.is_loaded());

        let err = service.predict("ACGTACGTAC").unwrap_err();
        assert!(matches!(err, ServiceError::ModelUnavailable));
    }

    #[test]
    fn test_startup_load_degrades_on_missing_package() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());

        // Empty directory: the load fails, the service must come up
        // Unloaded rather than propagate the error.
        let service = PredictionService::with_startup_load(&store);
        assert!(!service.is_loaded());
    }

    #[test]
    fn test_failed_load_reports_unavailable_not_panic() {
        let service = PredictionService::unloaded();
        for _ in 0..3 {
            assert!(matches!(
                service.predict(""),
                Err(ServiceError::ModelUnavailable)
            ));
        }
    }
}
