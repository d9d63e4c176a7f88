//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::ports::TtsError;
use crate::domain::narration::NarrationError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 未配置服务商凭据（按请求失败，不影响进程）
    #[error("Missing ELEVENLABS_API_KEY")]
    NotConfigured,

    /// 客户端输入错误
    #[error(transparent)]
    InvalidInput(#[from] NarrationError),

    /// 请求体无法解析
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 服务商返回无法归一化
    #[error("Unable to process audio response")]
    UnusableAudio,
}

impl ApplicationError {
    /// 创建请求解析错误
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest(message.into())
    }
}

impl From<TtsError> for ApplicationError {
    fn from(err: TtsError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}
