//! HTTP Routes
//!
//! API Endpoints:
//! - /api/tts      POST  合成朗读音频（audio/mpeg）
//! - /api/health   ANY   健康检查
//!
//! OPTIONS 由 CORS 中间件处理；其余路由 / 方法一律 404

use axum::{
    routing::{any, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", any(handlers::health))
        .route(
            "/api/tts",
            post(handlers::synthesize).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
}
