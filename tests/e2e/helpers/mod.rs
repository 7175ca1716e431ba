use axum::Router;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use voiceforge_relay::{
    controllers::voice::VoiceController,
    domain::voice::VoiceService,
    infrastructure::{
        config::{Config, LogFormat},
        http::create_router,
        repositories::HttpVoiceCloneRepository,
    },
};

pub mod mock_upstream;

use api_client::TestClient;
use mock_upstream::MockUpstream;

/// Relay timeout used by every test context, in seconds
pub const TEST_UPSTREAM_TIMEOUT_SECS: u64 = 1;

/// Relay wired to a running mock upstream
pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub config: Config,
    pub upstream: MockUpstream,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let upstream = MockUpstream::start().await;
            let config = test_config(&upstream.base_url);
            let client = spawn_relay(config.clone()).await;

            Self {
                client,
                config,
                upstream,
            }
        }
    }
}

/// Relay started with an empty COLAB_URL
pub struct UnconfiguredContext {
    pub client: TestClient,
}

impl AsyncTestContext for UnconfiguredContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let client = spawn_relay(test_config("")).await;
            Self { client }
        }
    }
}

/// Relay pointed at a port where nothing is listening
pub struct UnreachableContext {
    pub client: TestClient,
}

impl AsyncTestContext for UnreachableContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let listener = std::net::TcpListener::bind("127.0.0.1:0")
                .expect("Failed to reserve a port");
            let addr = listener.local_addr().expect("Failed to get local addr");
            drop(listener);

            let client = spawn_relay(test_config(&format!("http://{}", addr))).await;
            Self { client }
        }
    }
}

pub fn test_config(colab_url: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0, // Will be assigned by the OS
        colab_url: colab_url.to_string(),
        upstream_timeout_secs: TEST_UPSTREAM_TIMEOUT_SECS,
        max_upload_mb: 10,
        log_format: LogFormat::Pretty,
    }
}

fn create_app(config: Config) -> Router {
    let config = Arc::new(config);
    let voice_clone_repo = Arc::new(
        HttpVoiceCloneRepository::new(config.upstream_timeout())
            .expect("Failed to build upstream client"),
    );
    let voice_service = Arc::new(VoiceService::new(voice_clone_repo, config.clone()));
    let voice_controller = Arc::new(VoiceController::new(voice_service));

    create_router(config, voice_controller)
}

async fn spawn_relay(config: Config) -> TestClient {
    let app = create_app(config);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestClient::new(&format!("http://{}", addr))
}
