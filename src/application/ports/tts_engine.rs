//! TTS Engine Port - TTS 服务商抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use serde::Serialize;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::domain::narration::{NarrationText, VoiceId};

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 多语言模型
pub const MODEL_ID: &str = "eleven_multilingual_v2";

/// MP3, 44.1kHz, 128kbps
pub const OUTPUT_FORMAT: &str = "mp3_44100_128";

/// 音色塑形参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.35,
            similarity_boost: 0.85,
        }
    }
}

/// 合成请求
///
/// 模型、输出格式与音色参数是固定策略，不接受请求方配置
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: NarrationText,
    pub model_id: &'static str,
    pub output_format: &'static str,
    pub voice_settings: VoiceSettings,
}

impl SynthesisRequest {
    pub fn new(text: NarrationText) -> Self {
        Self {
            text,
            model_id: MODEL_ID,
            output_format: OUTPUT_FORMAT,
            voice_settings: VoiceSettings::default(),
        }
    }
}

/// 服务商返回的音频
///
/// 可能是完整缓冲、缓冲上的视图、拉取式读取器或推送式分块流
pub enum AudioPayload {
    /// 服务商未返回任何内容
    Empty,
    Buffer(Bytes),
    /// 大缓冲中的固定窗口
    View {
        buffer: Bytes,
        offset: usize,
        len: usize,
    },
    Reader(Pin<Box<dyn AsyncRead + Send>>),
    Stream(BoxStream<'static, Result<Bytes, TtsError>>),
}

impl AudioPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Buffer(_) => "buffer",
            Self::View { .. } => "view",
            Self::Reader(_) => "reader",
            Self::Stream(_) => "stream",
        }
    }
}

impl fmt::Debug for AudioPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffer(buffer) => f.debug_tuple("Buffer").field(&buffer.len()).finish(),
            Self::View { offset, len, .. } => f
                .debug_struct("View")
                .field("offset", offset)
                .field("len", len)
                .finish(),
            other => f.write_str(other.kind()),
        }
    }
}

/// TTS Engine Port
///
/// 外部 TTS 服务商的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 使用指定音色合成语音
    async fn convert(
        &self,
        voice_id: &VoiceId,
        request: SynthesisRequest,
    ) -> Result<AudioPayload, TtsError>;
}
