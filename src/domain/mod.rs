//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Narration Context: 朗读请求与音色解析
//! - Gallery Context: 展览页面与作品内容
//! - Playback Context: 朗读按钮的播放状态机

pub mod gallery;
pub mod narration;
pub mod playback;
