//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// ElevenLabs 配置
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// Access-Control-Allow-Origin 的值
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// 请求体上限（字节）
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_allowed_origin() -> String {
    "*".to_string()
}

fn default_max_body_bytes() -> usize {
    1_000_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: default_allowed_origin(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// ElevenLabs 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ElevenLabsConfig {
    /// API 凭据，未配置时服务仍启动
    #[serde(default)]
    pub api_key: Option<String>,

    /// 请求未指定 voiceId 时使用
    #[serde(default)]
    pub default_voice_id: String,

    #[serde(default = "default_elevenlabs_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_elevenlabs_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_voice_id: String::new(),
            base_url: default_elevenlabs_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ElevenLabsConfig {
    /// 有效的 API 凭据，空白视为未配置
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
