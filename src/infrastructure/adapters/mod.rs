//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod narration;
pub mod tts;

pub use narration::*;
pub use tts::*;
