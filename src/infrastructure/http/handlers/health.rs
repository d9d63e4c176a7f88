//! Health Handler
//!
//! 存活探针，不检查凭据，无副作用

use axum::Json;
use serde::Serialize;

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
