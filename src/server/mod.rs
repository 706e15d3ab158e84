// ============================================================
// Layer 1 — HTTP Transport
// ============================================================
// Thin axum front over the prediction service. Routing, payload
// shapes and status mapping only — all prediction logic lives in
// the service layer.
//
// Routes:
//   GET  /         — service banner
//   POST /predict  — {"sequence": ...} → {"predictions": {name: status}}
//   GET  /health   — liveness + whether a model package is loaded
//
// Status mapping:
//   ModelUnavailable → 503 (degraded startup, no package on disk)
//   Prediction(_)    → 500 (single bad request; package stays loaded)

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::domain::phenotype::Phenotype;
use crate::service::{PredictionService, ServiceError};

/// Shared application context passed to all handlers
#[derive(Clone)]
pub struct AppContext {
    pub service: Arc<PredictionService>,
}

#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    pub sequence: String,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub predictions: BTreeMap<String, Phenotype>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status:       &'static str,
    pub model_loaded: bool,
}

/// Run the HTTP API server until the process is stopped.
pub async fn run(addr: SocketAddr, service: Arc<PredictionService>) -> Result<()> {
    let app = build_router(AppContext { service });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("amr-predict listening on http://{addr}");
    info!("Health check: http://{addr}/health");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router with all routes and the CORS layer.
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/predict", post(predict))
        .route("/health", get(health))
        .with_state(ctx)
        .layer(CorsLayer::permissive())
}

/// GET /
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Antibiotic Resistance Prediction API",
        "status":  "active",
    }))
}

/// POST /predict
async fn predict(
    State(ctx): State<AppContext>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, (StatusCode, String)> {
    match ctx.service.predict(&request.sequence) {
        Ok(predictions) => Ok(Json(PredictionResponse { predictions })),
        Err(e @ ServiceError::ModelUnavailable) => {
            Err((StatusCode::SERVICE_UNAVAILABLE, e.to_string()))
        }
        Err(e @ ServiceError::Prediction(_)) => {
            tracing::warn!("Prediction request failed: {e:#}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// GET /health
///
/// `model_loaded` is a direct read of the service state, not a
/// separate computation.
async fn health(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status:       "healthy",
        model_loaded: ctx.service.is_loaded(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_payload_shape() {
        let req: PredictionRequest =
            serde_json::from_str(r#"{"sequence": "ACGTACGTAC"}"#).unwrap();
        assert_eq!(req.sequence, "ACGTACGTAC");
    }

    #[test]
    fn test_response_statuses_are_strings() {
        let mut predictions = BTreeMap::new();
        predictions.insert("penicillin".to_string(), Phenotype::Resistant);
        predictions.insert("ampicillin".to_string(), Phenotype::Susceptible);

        let json = serde_json::to_value(&PredictionResponse { predictions }).unwrap();
        assert_eq!(json["predictions"]["penicillin"], "Resistant");
        assert_eq!(json["predictions"]["ampicillin"], "Susceptible");
    }

    #[test]
    fn test_health_reports_model_state() {
        let json = serde_json::to_value(&HealthResponse {
            status:       "healthy",
            model_loaded: false,
        }).unwrap();
        assert_eq!(json["model_loaded"], false);
    }
}
