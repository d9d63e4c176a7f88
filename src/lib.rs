//! ZeroTag - 展品朗读
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Narration: 朗读文本与音色
//! - Gallery: 展品与页面
//! - Playback: 播放状态与按钮呈现
//!
//! 应用层 (application/):
//! - Ports: TtsEngine, NarrationSource, AudioOutput, SpeechSynthesizer
//! - Commands: 朗读合成命令处理器
//! - Player: 朗读播放状态机
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 朗读代理（/api/tts, /api/health）
//! - Adapters: ElevenLabs 客户端、代理客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
