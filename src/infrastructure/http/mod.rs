pub mod request_id;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{health, voice::VoiceController};
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Room left in the /generate body cap for the text field and multipart framing
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the application router with all routes and layers
pub fn create_router(config: Arc<Config>, voice_controller: Arc<VoiceController>) -> Router {
    let upload_limit = config.max_upload_bytes() + FORM_OVERHEAD_BYTES;

    // Voice routes; the upload cap replaces axum's 2 MB default
    let voice_routes = Router::new()
        .route(
            "/generate",
            post(VoiceController::generate).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(voice_controller);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .with_state(config)
        .merge(voice_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    voice_controller: Arc<VoiceController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(config.clone(), voice_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
