//! Application State
//!
//! 请求之间不共享可变状态

use std::sync::Arc;

use axum::http::HeaderValue;

use crate::application::{SynthesizeNarrationHandler, TtsEnginePort};

/// 默认请求体上限
pub const DEFAULT_MAX_BODY_BYTES: usize = 1_000_000;

/// 应用状态
pub struct AppState {
    pub synthesize_handler: SynthesizeNarrationHandler,
    /// Access-Control-Allow-Origin
    pub allowed_origin: HeaderValue,
    pub max_body_bytes: usize,
}

impl AppState {
    /// 创建应用状态
    ///
    /// `tts_engine` 为 None 表示未配置凭据，/api/tts 将逐请求失败
    pub fn new(
        tts_engine: Option<Arc<dyn TtsEnginePort>>,
        default_voice_id: impl Into<String>,
        allowed_origin: HeaderValue,
    ) -> Self {
        Self {
            synthesize_handler: SynthesizeNarrationHandler::new(tts_engine, default_voice_id),
            allowed_origin,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}
