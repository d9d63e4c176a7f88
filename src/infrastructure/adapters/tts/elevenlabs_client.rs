//! ElevenLabs TTS Client - 调用 ElevenLabs 语音合成 API
//!
//! 实现 TtsEnginePort trait
//!
//! 外部 API:
//! POST https://api.elevenlabs.io/v1/text-to-speech/{voice_id}?output_format=mp3_44100_128
//! Header: xi-api-key
//! Request: {"text": "...", "model_id": "...", "voice_settings": {...}}  (JSON)
//! Response: audio/mpeg binary（分块流式返回）

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use reqwest::{Client, Url};
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{
    AudioPayload, SynthesisRequest, TtsEnginePort, TtsError, VoiceSettings,
};
use crate::domain::narration::VoiceId;

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct ConvertHttpRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    /// API 密钥
    pub api_key: String,
    /// API 基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl ElevenLabsClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.elevenlabs.io".to_string(),
            timeout_secs: 120,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// ElevenLabs 客户端
pub struct ElevenLabsClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl ElevenLabsClient {
    /// 创建新的 ElevenLabs 客户端
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, TtsError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TtsError::NetworkError(format!("Invalid base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(TtsError::NetworkError(format!(
                "Invalid base URL: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    /// 获取合成 URL
    fn convert_url(&self, voice_id: &VoiceId, output_format: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v1", "text-to-speech", voice_id.as_str()]);
        }
        url.query_pairs_mut()
            .append_pair("output_format", output_format);
        url
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TtsError {
    if e.is_timeout() {
        TtsError::Timeout
    } else if e.is_connect() {
        TtsError::NetworkError(format!("Cannot connect to ElevenLabs: {}", e))
    } else {
        TtsError::NetworkError(e.to_string())
    }
}

#[async_trait]
impl TtsEnginePort for ElevenLabsClient {
    async fn convert(
        &self,
        voice_id: &VoiceId,
        request: SynthesisRequest,
    ) -> Result<AudioPayload, TtsError> {
        let url = self.convert_url(voice_id, request.output_format);
        let body = ConvertHttpRequest {
            text: request.text.as_str(),
            model_id: request.model_id,
            voice_settings: request.voice_settings,
        };

        tracing::debug!(
            url = %url,
            voice_id = %voice_id,
            model_id = request.model_id,
            text_len = body.text.len(),
            "Sending ElevenLabs convert request"
        );

        let response = self
            .client
            .post(url)
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        tracing::debug!(
            voice_id = %voice_id,
            content_length = ?response.content_length(),
            "ElevenLabs response streaming"
        );

        let stream = response.bytes_stream().map_err(map_reqwest_error).boxed();
        Ok(AudioPayload::Stream(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::audio::drain_to_bytes;
    use crate::domain::narration::NarrationText;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_KEY: &str = "test-key-123";

    fn client_for(server: &MockServer) -> ElevenLabsClient {
        let config = ElevenLabsClientConfig::new(TEST_KEY)
            .with_base_url(server.uri())
            .with_timeout(5);
        ElevenLabsClient::new(config).unwrap()
    }

    fn request(text: &str) -> SynthesisRequest {
        SynthesisRequest::new(NarrationText::new(text).unwrap())
    }

    #[test]
    fn test_config_builder() {
        let config = ElevenLabsClientConfig::new("key")
            .with_base_url("http://example.com:9000")
            .with_timeout(60);
        assert_eq!(config.base_url, "http://example.com:9000");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(ElevenLabsClientConfig::new("key").base_url, "https://api.elevenlabs.io");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ElevenLabsClientConfig::new("key").with_base_url("not a url");
        assert!(ElevenLabsClient::new(config).is_err());
    }

    #[test]
    fn test_convert_url() {
        let config = ElevenLabsClientConfig::new("key").with_base_url("http://localhost:9000/");
        let client = ElevenLabsClient::new(config).unwrap();
        let url = client.convert_url(&VoiceId::new("abc123").unwrap(), "mp3_44100_128");
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/v1/text-to-speech/abc123?output_format=mp3_44100_128"
        );
    }

    #[tokio::test]
    async fn test_convert_success() {
        let server = MockServer::start().await;
        let audio = b"ID3\x04\x00mp3-frames".to_vec();

        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/v1"))
            .and(query_param("output_format", "mp3_44100_128"))
            .and(header("xi-api-key", TEST_KEY))
            .and(body_json(serde_json::json!({
                "text": "Hello world",
                "model_id": "eleven_multilingual_v2",
                "voice_settings": {
                    "stability": 0.35,
                    "similarity_boost": 0.85
                }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(audio.clone()),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let payload = client
            .convert(&VoiceId::new("v1").unwrap(), request("Hello world"))
            .await
            .unwrap();
        assert_eq!(payload.kind(), "stream");

        let bytes = drain_to_bytes(payload).await.unwrap().unwrap();
        assert_eq!(&bytes[..], &audio[..]);
    }

    #[tokio::test]
    async fn test_convert_service_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .convert(&VoiceId::new("v1").unwrap(), request("Hello"))
            .await
            .unwrap_err();

        match err {
            TtsError::ServiceError(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("invalid api key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_convert_connection_refused() {
        let config = ElevenLabsClientConfig::new(TEST_KEY)
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(5);
        let client = ElevenLabsClient::new(config).unwrap();

        let err = client
            .convert(&VoiceId::new("v1").unwrap(), request("Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::NetworkError(_) | TtsError::Timeout));
    }
}
