//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine、NarrationSource、AudioOutput、SpeechSynthesizer）
//! - commands: 朗读合成命令及处理器
//! - audio: 服务商音频归一化
//! - player: 前端朗读播放状态机
//! - error: 应用层错误定义

pub mod audio;
pub mod commands;
pub mod error;
pub mod player;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{SynthesizeNarrationHandler, AUDIO_CONTENT_TYPE},
    SynthesizeNarration, SynthesizeNarrationResponse,
};

pub use error::ApplicationError;

pub use player::{NarrationBackend, NarrationPlayer, PlayerEvent};

pub use ports::{
    // Audio output
    AudioOutputError,
    AudioOutputPort,
    PlaybackNotifier,
    PlaybackReport,
    PlaybackSignal,
    // Narration source
    NarrationFetchError,
    NarrationSourcePort,
    // Speech synthesizer
    SpeechSynthesizerPort,
    // TTS engine
    AudioPayload,
    SynthesisRequest,
    TtsEnginePort,
    TtsError,
    VoiceSettings,
};
