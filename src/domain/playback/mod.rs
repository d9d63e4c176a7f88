//! Playback Context - 播放状态机
//!
//! 朗读按钮的四态模型：idle / loading / speaking / error

mod state;

pub use state::{ButtonView, PlaybackState, GENERATION_FAILED_MESSAGE, PLAYBACK_FAILED_MESSAGE};
