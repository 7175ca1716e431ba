use axum::{
    body::Body,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
};
use std::sync::Arc;

use crate::{
    domain::voice::{
        validation::validate_audio_extension, ReferenceAudio, SynthesisRequest, VoiceCloneError,
        VoiceService, VoiceServiceApi,
    },
    error::{AppError, AppResult},
};

const TEXT_FIELD: &str = "text";
const AUDIO_FIELD: &str = "reference_audio";

const GENERATED_CONTENT_TYPE: &str = "audio/wav";
const GENERATED_DISPOSITION: &str = "attachment; filename=generated_voice.wav";

pub struct VoiceController {
    voice_service: Arc<VoiceService>,
}

impl VoiceController {
    pub fn new(voice_service: Arc<VoiceService>) -> Self {
        Self { voice_service }
    }

    /// POST /generate - Clone the reference voice and speak the given text
    ///
    /// Nothing of the body is read while the upstream is unset.
    pub async fn generate(
        State(controller): State<Arc<VoiceController>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        if !controller.voice_service.is_configured() {
            return Err(AppError::from(VoiceCloneError::NotConfigured));
        }

        let multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
        let request = controller.read_form(multipart).await?;

        let audio = controller
            .voice_service
            .generate(request)
            .await
            .map_err(AppError::from)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(GENERATED_CONTENT_TYPE),
        );
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static(GENERATED_DISPOSITION),
        );

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }

    /// Collect `text` and `reference_audio` from the form; unknown fields are skipped.
    ///
    /// The audio extension is checked from the part headers before its bytes are read,
    /// so a mislabelled upload is reported as such whatever its size.
    async fn read_form(&self, mut multipart: Multipart) -> AppResult<SynthesisRequest> {
        let mut text = None;
        let mut reference_audio = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| self.multipart_error(e))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                TEXT_FIELD => {
                    text = Some(field.text().await.map_err(|e| self.multipart_error(e))?);
                }
                AUDIO_FIELD => {
                    let filename = field.file_name().map(str::to_string).ok_or_else(|| {
                        AppError::BadRequest(format!("{} must be a file upload", AUDIO_FIELD))
                    })?;
                    validate_audio_extension(&filename)?;
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await.map_err(|e| self.multipart_error(e))?;

                    reference_audio = Some(ReferenceAudio {
                        filename,
                        data,
                        content_type,
                    });
                }
                other => {
                    tracing::debug!(field = other, "Ignoring unexpected form field");
                }
            }
        }

        let text = text
            .ok_or_else(|| AppError::BadRequest(format!("Missing form field: {}", TEXT_FIELD)))?;
        let reference_audio = reference_audio
            .ok_or_else(|| AppError::BadRequest(format!("Missing form field: {}", AUDIO_FIELD)))?;

        Ok(SynthesisRequest {
            text,
            reference_audio,
        })
    }

    /// A body over the upload cap surfaces as the same error as an oversized file
    fn multipart_error(&self, err: MultipartError) -> AppError {
        if err.status() != StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::BadRequest(err.body_text());
        }

        if !self.voice_service.is_configured() {
            AppError::from(VoiceCloneError::NotConfigured)
        } else {
            AppError::from(VoiceCloneError::FileTooLarge {
                max_bytes: self.voice_service.max_file_size(),
            })
        }
    }
}
