//! 应用层 - 命令
//!
//! 朗读代理只有一个写操作：合成朗读音频

mod narration_commands;

pub mod handlers;

pub use narration_commands::*;
