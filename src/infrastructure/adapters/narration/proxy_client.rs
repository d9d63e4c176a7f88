//! Proxy Narration Client - 调用朗读代理获取音频
//!
//! 实现 NarrationSourcePort trait
//!
//! 朗读代理 API:
//! POST http://localhost:8787/api/tts
//! Request: {"text": "..."}  (JSON)
//! Response: audio/mpeg binary，失败时为 text/plain 错误消息

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{NarrationFetchError, NarrationSourcePort};

/// 朗读请求体 (JSON)
#[derive(Debug, Serialize)]
struct NarrationHttpRequest<'a> {
    text: &'a str,
}

/// 朗读代理客户端配置
#[derive(Debug, Clone)]
pub struct ProxyNarrationClientConfig {
    /// 朗读代理端点
    pub endpoint: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ProxyNarrationClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8787/api/tts".to_string(),
            timeout_secs: 120,
        }
    }
}

impl ProxyNarrationClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// 朗读代理客户端
pub struct ProxyNarrationClient {
    client: Client,
    endpoint: String,
}

impl ProxyNarrationClient {
    pub fn new(config: ProxyNarrationClientConfig) -> Result<Self, NarrationFetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NarrationFetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    async fn request(&self, text: &str) -> Result<Bytes, NarrationFetchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&NarrationHttpRequest { text })
            .send()
            .await
            .map_err(|e| NarrationFetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NarrationFetchError::Status {
                status: status.as_u16(),
                message: if message.is_empty() {
                    "Audio request failed.".to_string()
                } else {
                    message
                },
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| NarrationFetchError::Network(format!("Failed to read audio: {}", e)))
    }
}

#[async_trait]
impl NarrationSourcePort for ProxyNarrationClient {
    async fn fetch(
        &self,
        text: &str,
        cancel: CancellationToken,
    ) -> Result<Bytes, NarrationFetchError> {
        tracing::debug!(endpoint = %self.endpoint, text_len = text.len(), "Requesting narration");

        tokio::select! {
            _ = cancel.cancelled() => Err(NarrationFetchError::Cancelled),
            result = self.request(text) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ProxyNarrationClient {
        let config = ProxyNarrationClientConfig::new(format!("{}/api/tts", server.uri()));
        ProxyNarrationClient::new(config).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = ProxyNarrationClientConfig::default();
        assert_eq!(config.endpoint, "http://localhost:8787/api/tts");
        assert_eq!(config.with_timeout(30).timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tts"))
            .and(body_json(serde_json::json!({"text": "Hello world"})))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp3".to_vec()))
            .mount(&server)
            .await;

        let audio = client_for(&server)
            .fetch("Hello world", CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(&audio[..], b"mp3");
    }

    #[tokio::test]
    async fn test_fetch_error_status_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Missing ELEVENLABS_API_KEY"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch("Hello", CancellationToken::new())
            .await
            .unwrap_err();
        match err {
            NarrationFetchError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Missing ELEVENLABS_API_KEY");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_error_with_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch("Hello", CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Audio request failed."));
    }

    #[tokio::test]
    async fn test_fetch_cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"late".to_vec())
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let cancel = CancellationToken::new();
        let client = client_for(&server);
        let pending = client.fetch("Hello", cancel.clone());
        cancel.cancel();

        let err = tokio::time::timeout(Duration::from_secs(2), pending)
            .await
            .expect("cancellation should resolve promptly")
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
