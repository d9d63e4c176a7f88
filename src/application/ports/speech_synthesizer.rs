//! Speech Synthesizer Port - 设备端语音合成
//!
//! 不经过网络，speak 调用后立即进入朗读状态

use super::audio_output::{AudioOutputError, PlaybackNotifier};

/// Speech Synthesizer Port
pub trait SpeechSynthesizerPort: Send {
    /// 设备是否支持语音合成
    fn is_available(&self) -> bool;

    /// 开始朗读，结束/失败通过 notifier 回报
    fn speak(&mut self, text: &str, notifier: PlaybackNotifier) -> Result<(), AudioOutputError>;

    /// 取消设备端朗读
    fn cancel(&mut self);
}
