//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 不调用服务商，按配置的形态返回固定音频，并记录每次调用

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{stream, StreamExt};
use std::io::Cursor;
use std::sync::Mutex;

use crate::application::ports::{
    AudioPayload, SynthesisRequest, TtsEnginePort, TtsError, VoiceSettings,
};
use crate::domain::narration::VoiceId;

/// 返回的音频形态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeAudioShape {
    Empty,
    Buffer,
    View,
    Reader,
    Stream,
    /// 服务商报错
    Fail,
}

/// 记录的调用
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub voice_id: String,
    pub text: String,
    pub model_id: &'static str,
    pub output_format: &'static str,
    pub voice_settings: VoiceSettings,
}

/// Fake TTS Client
pub struct FakeTtsClient {
    shape: FakeAudioShape,
    audio: Bytes,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTtsClient {
    pub fn new(shape: FakeAudioShape) -> Self {
        Self::with_audio(shape, Bytes::from_static(b"ID3\x04\x00\x00fake-mp3-frames"))
    }

    pub fn with_audio(shape: FakeAudioShape, audio: impl Into<Bytes>) -> Self {
        Self {
            shape,
            audio: audio.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 固定返回的音频
    pub fn audio(&self) -> Bytes {
        self.audio.clone()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn payload(&self) -> Result<AudioPayload, TtsError> {
        let audio = self.audio.clone();
        let payload = match self.shape {
            FakeAudioShape::Empty => AudioPayload::Empty,
            FakeAudioShape::Buffer => AudioPayload::Buffer(audio),
            FakeAudioShape::View => {
                // 前后各填充 8 字节
                let mut padded = vec![0u8; 8];
                padded.extend_from_slice(&audio);
                padded.extend_from_slice(&[0u8; 8]);
                AudioPayload::View {
                    buffer: Bytes::from(padded),
                    offset: 8,
                    len: audio.len(),
                }
            }
            FakeAudioShape::Reader => AudioPayload::Reader(Box::pin(Cursor::new(audio.to_vec()))),
            FakeAudioShape::Stream => {
                let chunks: Vec<Result<Bytes, TtsError>> = audio
                    .chunks(4)
                    .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
                    .collect();
                AudioPayload::Stream(stream::iter(chunks).boxed())
            }
            FakeAudioShape::Fail => {
                return Err(TtsError::ServiceError("HTTP 503: fake outage".to_string()))
            }
        };
        Ok(payload)
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn convert(
        &self,
        voice_id: &VoiceId,
        request: SynthesisRequest,
    ) -> Result<AudioPayload, TtsError> {
        tracing::debug!(
            voice_id = %voice_id,
            shape = ?self.shape,
            "FakeTtsClient: returning fixed audio"
        );

        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedCall {
                voice_id: voice_id.to_string(),
                text: request.text.to_string(),
                model_id: request.model_id,
                output_format: request.output_format,
                voice_settings: request.voice_settings,
            });

        self.payload()
    }
}
