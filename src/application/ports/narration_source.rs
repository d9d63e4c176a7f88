//! Narration Source Port - 朗读音频获取
//!
//! 前端播放器获取音频的抽象，远程实现调用朗读代理

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// 获取音频错误
#[derive(Debug, Error)]
pub enum NarrationFetchError {
    /// 调用方主动取消，静默处理
    #[error("Request cancelled")]
    Cancelled,

    #[error("Network error: {0}")]
    Network(String),

    /// 代理返回非 2xx
    #[error("Audio request failed ({status}): {message}")]
    Status { status: u16, message: String },
}

impl NarrationFetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Narration Source Port
#[async_trait]
pub trait NarrationSourcePort: Send + Sync {
    /// 获取朗读音频
    ///
    /// `cancel` 触发后应尽快返回 `Cancelled`
    async fn fetch(&self, text: &str, cancel: CancellationToken)
        -> Result<Bytes, NarrationFetchError>;
}
