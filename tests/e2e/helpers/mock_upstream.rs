use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use futures::StreamExt;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// How long the mock stalls on "hang" and "stall"; comfortably past the relay's test timeout
pub const HANG_FOR: Duration = Duration::from_secs(5);

/// Deterministic fake WAV payload, large enough to span several chunks
pub fn mock_audio() -> Vec<u8> {
    let mut audio = b"RIFF\x00\x00\x00\x00WAVEfmt ".to_vec();
    audio.extend((0..256 * 1024).map(|i| (i % 251) as u8));
    audio
}

/// What the upstream saw for one `/clone` call
#[derive(Debug, Clone, Default)]
pub struct RecordedCall {
    pub text: Option<String>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub audio: Vec<u8>,
}

#[derive(Clone, Default)]
struct MockState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// Handle to a running mock upstream
pub struct MockUpstream {
    pub base_url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let state = MockState::default();
        let calls = state.calls.clone();

        let app = Router::new()
            .route("/clone", post(clone_handler))
            .layer(DefaultBodyLimit::disable())
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock upstream");
        let addr = listener.local_addr().expect("Failed to get mock upstream addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            // Trailing slash on purpose: the relay must not produce `//clone`
            base_url: format!("http://{}/", addr),
            calls,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

async fn clone_handler(State(state): State<MockState>, mut multipart: Multipart) -> Response {
    let mut call = RecordedCall::default();

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name().unwrap_or_default().to_string().as_str() {
            "text" => call.text = field.text().await.ok(),
            "reference_audio" => {
                call.filename = field.file_name().map(str::to_string);
                call.content_type = field.content_type().map(str::to_string);
                call.audio = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            }
            _ => {}
        }
    }

    let text = call.text.clone().unwrap_or_default();
    state.calls.lock().push(call);

    match text.as_str() {
        "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "long-error" => (StatusCode::INTERNAL_SERVER_ERROR, "e".repeat(500)).into_response(),
        "teapot" => StatusCode::IM_A_TEAPOT.into_response(),
        "hang" => {
            tokio::time::sleep(HANG_FOR).await;
            (StatusCode::OK, [(header::CONTENT_TYPE, "audio/wav")], mock_audio()).into_response()
        }
        "stall" => {
            let head = futures::stream::once(async { Ok(Bytes::from_static(b"RIFF")) });
            let tail = futures::stream::once(async {
                tokio::time::sleep(HANG_FOR).await;
                Ok::<_, std::io::Error>(Bytes::from(mock_audio()))
            });
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "audio/wav")],
                Body::from_stream(head.chain(tail)),
            )
                .into_response()
        }
        "stall-error" => {
            let head = futures::stream::once(async { Ok(Bytes::from_static(b"partial ")) });
            let tail = futures::stream::once(async {
                tokio::time::sleep(HANG_FOR).await;
                Ok::<_, std::io::Error>(Bytes::from_static(b"error"))
            });
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Body::from_stream(head.chain(tail)),
            )
                .into_response()
        }
        _ => (StatusCode::OK, [(header::CONTENT_TYPE, "audio/wav")], mock_audio()).into_response(),
    }
}
