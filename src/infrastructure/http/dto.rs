//! Data Transfer Objects

use serde::Deserialize;

use crate::application::{ApplicationError, SynthesizeNarration};

/// POST /api/tts 请求体
#[derive(Debug, Default, Deserialize)]
pub struct SynthesizeRequest {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default, rename = "voiceId")]
    pub voice_id: Option<String>,
}

impl SynthesizeRequest {
    /// 解析请求体
    ///
    /// - 空请求体视为 `{}`
    /// - 非对象的 JSON（null、数组、数字）视为缺少字段
    /// - 非法 JSON 或字段不是字符串 -> MalformedRequest
    pub fn parse(body: &[u8]) -> Result<Self, ApplicationError> {
        if body.is_empty() {
            return Ok(Self::default());
        }

        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| ApplicationError::malformed(format!("Invalid JSON: {}", e)))?;

        if !value.is_object() {
            return Ok(Self::default());
        }

        serde_json::from_value(value)
            .map_err(|e| ApplicationError::malformed(format!("Invalid field: {}", e)))
    }

    pub fn into_command(self) -> SynthesizeNarration {
        SynthesizeNarration {
            text: self.text,
            voice_id: self.voice_id,
        }
    }
}
