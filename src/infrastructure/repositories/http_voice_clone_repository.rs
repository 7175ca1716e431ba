use super::voice_clone_repository::VoiceCloneRepository;
use crate::domain::voice::{ReferenceAudio, SynthesisRequest, VoiceCloneError};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// Path of the cloning endpoint on the upstream backend
const CLONE_PATH: &str = "clone";

/// Content type sent for reference audio when the client declared none
const DEFAULT_AUDIO_CONTENT_TYPE: &str = "audio/wav";

/// Upstream error bodies are cut to this many characters
const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// Voice-cloning repository backed by a remote HTTP service.
///
/// Sends `POST {base_url}/clone` with multipart fields `text` and `reference_audio`.
pub struct HttpVoiceCloneRepository {
    http_client: reqwest::Client,
}

impl HttpVoiceCloneRepository {
    /// Build the repository with a single client whose total request timeout is `timeout`
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http_client })
    }

    fn clone_url(base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), CLONE_PATH)
    }

    fn build_form(request: SynthesisRequest) -> Result<Form, VoiceCloneError> {
        let audio_part = Self::audio_part(request.reference_audio)?;
        Ok(Form::new()
            .text("text", request.text)
            .part("reference_audio", audio_part))
    }

    fn audio_part(audio: ReferenceAudio) -> Result<Part, VoiceCloneError> {
        let declared = audio
            .content_type
            .as_deref()
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or(DEFAULT_AUDIO_CONTENT_TYPE);

        let length = audio.data.len() as u64;
        let part = |data: Bytes| {
            Part::stream_with_length(reqwest::Body::from(data), length)
                .file_name(audio.filename.clone())
        };

        match part(audio.data.clone()).mime_str(declared) {
            Ok(part) => Ok(part),
            Err(e) => {
                tracing::warn!(
                    content_type = declared,
                    error = %e,
                    "Unparseable reference audio content type, falling back to default"
                );
                part(audio.data)
                    .mime_str(DEFAULT_AUDIO_CONTENT_TYPE)
                    .map_err(|e| VoiceCloneError::Other(e.into()))
            }
        }
    }
}

/// Classify a transport failure the way callers need to see it
fn classify_transport_error(err: reqwest::Error) -> VoiceCloneError {
    if err.is_timeout() {
        tracing::error!(error = %err, "Upstream request timed out");
        VoiceCloneError::Timeout
    } else if err.is_connect() {
        tracing::error!(error = %err, "Failed to connect to upstream server");
        VoiceCloneError::Unreachable(err.to_string())
    } else {
        tracing::error!(error = %err, "Unexpected upstream transport error");
        VoiceCloneError::Other(err.into())
    }
}

/// Keep at most `MAX_ERROR_DETAIL_CHARS` characters of an upstream error body
fn truncate_detail(body: &str) -> String {
    if body.is_empty() {
        return "Unknown error".to_string();
    }
    body.chars().take(MAX_ERROR_DETAIL_CHARS).collect()
}

#[async_trait]
impl VoiceCloneRepository for HttpVoiceCloneRepository {
    async fn clone_voice(
        &self,
        base_url: &str,
        request: SynthesisRequest,
    ) -> Result<Bytes, VoiceCloneError> {
        let url = Self::clone_url(base_url);
        let start_time = std::time::Instant::now();

        tracing::info!(
            url = %url,
            filename = %request.reference_audio.filename,
            audio_size = request.reference_audio.size(),
            "Calling upstream voice-cloning service"
        );

        let form = Self::build_form(request)?;
        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.map_err(classify_transport_error)?;
            let detail = truncate_detail(&body);
            tracing::error!(
                status = status.as_u16(),
                detail = %detail,
                "Upstream returned an error"
            );
            return Err(VoiceCloneError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        // The relay timeout also covers the body; nothing is answered until it is complete
        let audio = response.bytes().await.map_err(classify_transport_error)?;

        tracing::debug!(
            latency_ms = start_time.elapsed().as_millis(),
            audio_size = audio.len(),
            "Upstream audio received"
        );

        Ok(audio)
    }
}
