//! ZeroTag - 展品朗读代理
//!
//! 启动流程：配置 -> 日志 -> ElevenLabs 客户端 -> HTTP 服务器

use std::sync::Arc;

use http::HeaderValue;
use tracing_subscriber::EnvFilter;

use zerotag::application::TtsEnginePort;
use zerotag::config::{load_config, print_config, LogConfig};
use zerotag::infrastructure::adapters::{ElevenLabsClient, ElevenLabsClientConfig};
use zerotag::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：兼容环境变量 > ZEROTAG_ 环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("ZeroTag - narration proxy");
    print_config(&config);

    // 凭据缺失不阻止启动，/api/tts 逐请求返回 500
    let tts_engine: Option<Arc<dyn TtsEnginePort>> = match config.elevenlabs.api_key() {
        Some(api_key) => {
            let client_config = ElevenLabsClientConfig::new(api_key)
                .with_base_url(&config.elevenlabs.base_url)
                .with_timeout(config.elevenlabs.timeout_secs);
            Some(Arc::new(ElevenLabsClient::new(client_config)?))
        }
        None => {
            tracing::warn!("ELEVENLABS_API_KEY is not set, /api/tts will fail until configured");
            None
        }
    };

    let allowed_origin = HeaderValue::from_str(&config.server.allowed_origin)?;
    let state = AppState::new(
        tts_engine,
        config.elevenlabs.default_voice_id.clone(),
        allowed_origin,
    )
    .with_max_body_bytes(config.server.max_body_bytes);

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志，RUST_LOG 优先
fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},zerotag={},tower_http=debug", log.level, log.level);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
