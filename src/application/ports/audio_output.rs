//! Audio Output Port - 音频播放抽象
//!
//! 对应浏览器中的媒体元素；播放结束/失败通过 PlaybackNotifier 回报

use bytes::Bytes;
use thiserror::Error;
use tokio::sync::mpsc;

/// 播放错误
#[derive(Debug, Error)]
pub enum AudioOutputError {
    #[error("Playback failed: {0}")]
    Playback(String),
}

/// 播放回报信号
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackSignal {
    /// 自然播放结束
    Ended,
    Failed(String),
}

/// 带代次的播放回报
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackReport {
    pub generation: u64,
    pub signal: PlaybackSignal,
}

/// 播放回报句柄
///
/// 绑定到发起播放的请求代次，过期代次的回报会被控制器忽略
#[derive(Debug, Clone)]
pub struct PlaybackNotifier {
    generation: u64,
    tx: mpsc::UnboundedSender<PlaybackReport>,
}

impl PlaybackNotifier {
    pub fn new(generation: u64, tx: mpsc::UnboundedSender<PlaybackReport>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ended(&self) {
        self.send(PlaybackSignal::Ended);
    }

    pub fn failed(&self, reason: impl Into<String>) {
        self.send(PlaybackSignal::Failed(reason.into()));
    }

    fn send(&self, signal: PlaybackSignal) {
        // 控制器已销毁时丢弃
        let _ = self.tx.send(PlaybackReport {
            generation: self.generation,
            signal,
        });
    }
}

/// Audio Output Port
///
/// 由单个播放器实例独占
pub trait AudioOutputPort: Send {
    /// 运行环境是否支持音频播放
    fn is_available(&self) -> bool;

    /// 装载音频；之前的音频源由控制器先行释放
    fn load(&mut self, audio: Bytes) -> Result<(), AudioOutputError>;

    /// 从头开始播放已装载的音频
    fn play(&mut self, notifier: PlaybackNotifier) -> Result<(), AudioOutputError>;

    /// 暂停并回到开头
    fn stop(&mut self);

    /// 释放已装载的音频源
    fn release(&mut self);
}
