//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 兼容环境变量（PORT、ELEVENLABS_API_KEY、ELEVENLABS_VOICE_ID、ALLOWED_ORIGIN）
//! 2. 环境变量（前缀 `ZEROTAG_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use http::HeaderValue;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 兼容环境变量 -> 配置键
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("ALLOWED_ORIGIN", "server.allowed_origin"),
    ("ELEVENLABS_API_KEY", "elevenlabs.api_key"),
    ("ELEVENLABS_VOICE_ID", "elevenlabs.default_voice_id"),
];

/// 加载应用配置
///
/// 先读取 `.env`（如存在），再按优先级合并配置
///
/// # 环境变量示例
/// - `ZEROTAG_SERVER__PORT=8080`
/// - `ZEROTAG_ELEVENLABS__BASE_URL=http://localhost:9000`
/// - `ELEVENLABS_API_KEY=sk-...`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_env_file(None)?;
    build_config(config_path, std::env::vars().collect())
}

/// 读取 `.env` 到进程环境变量
///
/// 文件不存在时忽略；文件存在但无法解析时返回错误（此时日志尚未初始化）
fn load_env_file(path: Option<&Path>) -> Result<(), ConfigError> {
    let result = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::LoadError(format!(
            "Failed to read .env file: {}",
            e
        ))),
    }
}

/// 用给定的环境变量快照构建配置
fn build_config(
    config_path: Option<&Path>,
    vars: HashMap<String, String>,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8787)?
        .set_default("server.allowed_origin", "*")?
        .set_default("server.max_body_bytes", 1_000_000)?
        .set_default("elevenlabs.default_voice_id", "")?
        .set_default("elevenlabs.base_url", "https://api.elevenlabs.io")?
        .set_default("elevenlabs.timeout_secs", 120)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量
    // 前缀: ZEROTAG_
    // 层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("ZEROTAG")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(Some(vars.clone())),
    );

    // 4. 兼容环境变量（最高优先级），空值忽略
    for (var, key) in LEGACY_ENV_KEYS {
        let value = vars
            .get(*var)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        builder = builder.set_override_option(*key, value)?;
    }

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.server.max_body_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "Request body limit cannot be 0".to_string(),
        ));
    }

    if HeaderValue::from_str(&config.server.allowed_origin).is_err() {
        return Err(ConfigError::ValidationError(format!(
            "Allowed origin is not a valid header value: {:?}",
            config.server.allowed_origin
        )));
    }

    if config.elevenlabs.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "ElevenLabs base URL cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Allowed Origin: {}", config.server.allowed_origin);
    tracing::info!("Max Body: {} bytes", config.server.max_body_bytes);
    tracing::info!("ElevenLabs URL: {}", config.elevenlabs.base_url);
    tracing::info!(
        "ElevenLabs API Key: {}",
        if config.elevenlabs.api_key().is_some() {
            "configured"
        } else {
            "missing"
        }
    );
    if config.elevenlabs.default_voice_id.is_empty() {
        tracing::info!("Default Voice: (none)");
    } else {
        tracing::info!("Default Voice: {}", config.elevenlabs.default_voice_id);
    }
    tracing::info!("ElevenLabs Timeout: {}s", config.elevenlabs.timeout_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_sources() {
        let file = write_config("");
        let config = build_config(Some(file.path()), HashMap::new()).unwrap();
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.server.allowed_origin, "*");
        assert_eq!(config.server.max_body_bytes, 1_000_000);
        assert!(config.elevenlabs.api_key().is_none());
        assert!(config.elevenlabs.default_voice_id.is_empty());
    }

    #[test]
    fn test_file_then_prefixed_env() {
        let file = write_config(
            r#"
            [server]
            port = 9000
            allowed_origin = "https://file.example"

            [elevenlabs]
            default_voice_id = "file-voice"
            "#,
        );
        let config = build_config(
            Some(file.path()),
            vars(&[("ZEROTAG_SERVER__PORT", "9100")]),
        )
        .unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.allowed_origin, "https://file.example");
        assert_eq!(config.elevenlabs.default_voice_id, "file-voice");
    }

    #[test]
    fn test_legacy_env_names_win() {
        let file = write_config("[server]\nport = 9000\n");
        let config = build_config(
            Some(file.path()),
            vars(&[
                ("ZEROTAG_SERVER__PORT", "9100"),
                ("PORT", "3000"),
                ("ELEVENLABS_API_KEY", "sk-test"),
                ("ELEVENLABS_VOICE_ID", "voice-env"),
                ("ALLOWED_ORIGIN", "https://zerotag.art"),
            ]),
        )
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.allowed_origin, "https://zerotag.art");
        assert_eq!(config.elevenlabs.api_key(), Some("sk-test"));
        assert_eq!(config.elevenlabs.default_voice_id, "voice-env");
    }

    #[test]
    fn test_empty_legacy_values_ignored() {
        let file = write_config("");
        let config = build_config(
            Some(file.path()),
            vars(&[("PORT", ""), ("ELEVENLABS_API_KEY", " ")]),
        )
        .unwrap();
        assert_eq!(config.server.port, 8787);
        assert!(config.elevenlabs.api_key().is_none());
    }

    #[test]
    fn test_invalid_port_rejected() {
        let file = write_config("");
        let result = build_config(Some(file.path()), vars(&[("PORT", "not-a-port")]));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_env_file_ignored() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_file(Some(&dir.path().join(".env"))).is_ok());
    }

    #[test]
    fn test_unparsable_env_file_is_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "ZEROTAG_TEST_BROKEN=\"unterminated\n").unwrap();
        let result = load_env_file(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_body_limit() {
        let mut config = AppConfig::default();
        config.server.max_body_bytes = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_bad_origin() {
        let mut config = AppConfig::default();
        config.server.allowed_origin = "https://a.example\nX-Injected: 1".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_base_url() {
        let mut config = AppConfig::default();
        config.elevenlabs.base_url = String::new();
        assert!(validate_config(&config).is_err());
    }
}
