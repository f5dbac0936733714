use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::domain::types::{PlanRequest, PlanResult};
use crate::error::PlanError;
use crate::planner::Planner;

/// The HTTP shell: a thin layer over the planner. CORS is wide open, as the
/// service sits behind the operator's own frontend.
pub fn router(planner: Arc<Planner>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/optimize", post(optimize))
        .layer(CorsLayer::permissive())
        .with_state(planner)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "pigroute",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn optimize(
    State(planner): State<Arc<Planner>>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResult>, ApiError> {
    // Planning is CPU-bound and can run for seconds per day; keep it off the
    // runtime's worker threads.
    let result = tokio::task::spawn_blocking(move || planner.plan(&request))
        .await
        .map_err(|e| {
            error!("planner task panicked: {e}");
            ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                detail: "internal planning failure".into(),
            }
        })??;

    Ok(Json(result))
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        let status = match &err {
            PlanError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PlanError::DeadlineExceeded { .. } | PlanError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        ApiError {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
