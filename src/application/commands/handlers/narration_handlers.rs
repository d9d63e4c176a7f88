//! Narration Command Handlers

use std::sync::Arc;

use crate::application::audio::drain_to_bytes;
use crate::application::commands::{SynthesizeNarration, SynthesizeNarrationResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{SynthesisRequest, TtsEnginePort};
use crate::domain::narration::NarrationRequest;

/// 返回给调用方的音频类型
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// SynthesizeNarration Handler - 合成朗读音频
///
/// 无跨请求状态，每次调用都会请求服务商，失败不重试
pub struct SynthesizeNarrationHandler {
    /// 未配置凭据时为 None
    tts_engine: Option<Arc<dyn TtsEnginePort>>,
    default_voice_id: String,
}

impl SynthesizeNarrationHandler {
    pub fn new(
        tts_engine: Option<Arc<dyn TtsEnginePort>>,
        default_voice_id: impl Into<String>,
    ) -> Self {
        Self {
            tts_engine,
            default_voice_id: default_voice_id.into(),
        }
    }

    /// 凭据检查，在读取请求体之前调用
    pub fn ensure_configured(&self) -> Result<&Arc<dyn TtsEnginePort>, ApplicationError> {
        self.tts_engine.as_ref().ok_or(ApplicationError::NotConfigured)
    }

    pub async fn handle(
        &self,
        command: SynthesizeNarration,
    ) -> Result<SynthesizeNarrationResponse, ApplicationError> {
        let tts_engine = self.ensure_configured()?;

        let request = NarrationRequest::resolve(
            command.text.as_deref(),
            command.voice_id.as_deref(),
            &self.default_voice_id,
        )?;

        tracing::info!(
            voice_id = %request.voice_id,
            text_chars = request.text.char_count(),
            "Synthesizing narration"
        );

        let payload = tts_engine
            .convert(&request.voice_id, SynthesisRequest::new(request.text))
            .await?;
        let kind = payload.kind();

        let audio = drain_to_bytes(payload)
            .await?
            .ok_or(ApplicationError::UnusableAudio)?;

        tracing::info!(
            voice_id = %request.voice_id,
            payload = kind,
            audio_size = audio.len(),
            "Narration synthesized"
        );

        Ok(SynthesizeNarrationResponse {
            audio,
            content_type: AUDIO_CONTENT_TYPE,
        })
    }
}
