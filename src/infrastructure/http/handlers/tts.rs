//! TTS Handler - 朗读合成

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::infrastructure::http::dto::SynthesizeRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /api/tts
///
/// 顺序：凭据检查 -> 读取请求体（有上限）-> 解析 -> 合成。
/// 音频完整缓冲后才写响应
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();

    state.synthesize_handler.ensure_configured()?;

    let body = read_body(request, state.max_body_bytes).await?;
    let command = SynthesizeRequest::parse(&body)?.into_command();

    tracing::debug!(request_id = %request_id, body_len = body.len(), "Narration request accepted");

    let result = state.synthesize_handler.handle(command).await?;

    tracing::debug!(
        request_id = %request_id,
        audio_size = result.audio.len(),
        "Sending narration audio"
    );

    Ok((
        [
            (header::CONTENT_TYPE, result.content_type.to_string()),
            (header::CONTENT_LENGTH, result.audio.len().to_string()),
        ],
        result.audio,
    )
        .into_response())
}

/// 读取请求体，超过上限即放弃
async fn read_body(request: Request, limit: usize) -> Result<Bytes, ApiError> {
    let declared = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    if let Some(len) = declared {
        if len > limit as u64 {
            tracing::warn!(declared = len, limit, "Request body exceeds limit, abandoning");
            return Err(ApiError::PayloadTooLarge);
        }
    }

    axum::body::to_bytes(request.into_body(), limit)
        .await
        .map_err(|e| {
            tracing::warn!(limit, error = %e, "Failed to read request body, abandoning");
            ApiError::PayloadTooLarge
        })
}
