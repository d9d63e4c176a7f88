//! Narration Player - 前端朗读播放
//!
//! 两种可互换的后端策略：远程朗读代理 + 媒体输出，或设备端语音合成

mod controller;

pub use controller::{NarrationBackend, NarrationPlayer, PlayerEvent};
