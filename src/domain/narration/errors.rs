//! Narration Context - Errors

use thiserror::Error;

/// 客户端输入错误
///
/// Display 文本即返回给调用方的纯文本消息
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrationError {
    #[error("Missing text")]
    MissingText,

    #[error("Missing voiceId")]
    MissingVoiceId,
}
