//! Narration Context - Value Objects

use serde::{Deserialize, Serialize};

use super::NarrationError;

/// 朗读文本
///
/// 不变量: 去除首尾空白后非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationText(String);

impl NarrationText {
    pub fn new(text: impl AsRef<str>) -> Result<Self, NarrationError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(NarrationError::MissingText);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 字符数（用于日志）
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl std::fmt::Display for NarrationText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音色标识（对 TTS 服务商不透明）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, NarrationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(NarrationError::MissingVoiceId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// 解析请求中的音色，空值回退到默认音色
    pub fn resolve(requested: Option<&str>, default_voice: &str) -> Result<Self, NarrationError> {
        match requested.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self::new(id),
            None => Self::new(default_voice),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 朗读请求
///
/// 每次 HTTP 调用创建，响应发送后丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationRequest {
    pub text: NarrationText,
    pub voice_id: VoiceId,
}

impl NarrationRequest {
    /// 按顺序校验：先 text，后 voiceId
    pub fn resolve(
        text: Option<&str>,
        voice_id: Option<&str>,
        default_voice: &str,
    ) -> Result<Self, NarrationError> {
        let text = NarrationText::new(text.unwrap_or_default())?;
        let voice_id = VoiceId::resolve(voice_id, default_voice)?;
        Ok(Self { text, voice_id })
    }
}
