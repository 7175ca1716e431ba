use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voiceforge_relay::controllers::voice::VoiceController;
use voiceforge_relay::domain::voice::VoiceService;
use voiceforge_relay::infrastructure::config::{Config, LogFormat};
use voiceforge_relay::infrastructure::http::start_http_server;
use voiceforge_relay::infrastructure::repositories::HttpVoiceCloneRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting VoiceForge relay v{} on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.host,
        config.port
    );

    match config.colab_url() {
        Some(url) => tracing::info!(colab_url = url, "Upstream voice-cloning service configured"),
        None => tracing::warn!("COLAB_URL is not set; /generate will answer 503 until it is"),
    }

    tracing::info!(
        timeout_secs = config.upstream_timeout_secs,
        max_upload_mb = config.max_upload_mb,
        "Upstream limits"
    );

    let config = Arc::new(config);

    // Wire repository -> service -> controller
    let voice_clone_repo = Arc::new(HttpVoiceCloneRepository::new(config.upstream_timeout())?);
    let voice_service = Arc::new(VoiceService::new(voice_clone_repo, config.clone()));
    let voice_controller = Arc::new(VoiceController::new(voice_service));

    start_http_server(config, voice_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "voiceforge_relay=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
