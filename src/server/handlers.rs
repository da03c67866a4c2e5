// HTTP request handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::middleware::RequestId;
use super::CompareServer;
use crate::compare::ComparisonResult;

/// Create the main application router
pub fn create_router(server: Arc<CompareServer>) -> Router {
    Router::new()
        .route("/compare", post(handle_compare))
        .route("/health", get(health_check))
        .with_state(server)
}

/// Request body for POST /compare
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    #[serde(default, alias = "text_a")]
    pub text1: String,
    #[serde(default, alias = "text_b")]
    pub text2: String,
}

/// Handle POST /compare
async fn handle_compare(
    State(server): State<Arc<CompareServer>>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<ComparisonResult>, AppError> {
    let text1 = request.text1.trim();
    let text2 = request.text2.trim();

    if text1.is_empty() || text2.is_empty() {
        return Err(AppError::bad_request("Please enter both texts"));
    }

    let request_id = request_id.map(|Extension(RequestId(id))| id.to_string());
    tracing::info!(
        request_id = request_id.as_deref().unwrap_or("-"),
        text1_len = text1.len(),
        text2_len = text2.len(),
        "Comparing texts"
    );

    let result = server.comparator().compare(text1, text2).await;
    Ok(Json(result))
}

/// Health status response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub oracle_configured: bool,
    pub oracle_provider: Option<String>,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Handle GET /health
pub async fn health_check(State(server): State<Arc<CompareServer>>) -> Json<HealthStatus> {
    let oracle = server.comparator().oracle();
    Json(HealthStatus {
        status: "healthy".to_string(),
        oracle_configured: oracle.is_some(),
        oracle_provider: oracle.map(|o| o.name().to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: server.uptime_seconds(),
    })
}

/// Application error with an HTTP status
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = %self.message, "Request failed");
        } else {
            tracing::debug!(status = self.status.as_u16(), error = %self.message, "Request rejected");
        }

        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}
