//! Narration Context - 朗读限界上下文
//!
//! 职责:
//! - 朗读文本校验
//! - 音色 ID 解析（含默认音色回退）

mod errors;
mod value_objects;

pub use errors::NarrationError;
pub use value_objects::{NarrationRequest, NarrationText, VoiceId};
