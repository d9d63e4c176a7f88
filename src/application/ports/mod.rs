//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_output;
mod narration_source;
mod speech_synthesizer;
mod tts_engine;

pub use audio_output::{
    AudioOutputError, AudioOutputPort, PlaybackNotifier, PlaybackReport, PlaybackSignal,
};
pub use narration_source::{NarrationFetchError, NarrationSourcePort};
pub use speech_synthesizer::SpeechSynthesizerPort;
pub use tts_engine::{
    AudioPayload, SynthesisRequest, TtsEnginePort, TtsError, VoiceSettings, MODEL_ID,
    OUTPUT_FORMAT,
};
