use super::dto::SynthesisRequest;
use super::error::VoiceCloneError;
use super::validation::{validate_audio_file, validate_text};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::VoiceCloneRepository;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

const TEXT_PREVIEW_CHARS: usize = 50;

pub struct VoiceService {
    voice_clone_repo: Arc<dyn VoiceCloneRepository>,
    config: Arc<Config>,
}

impl VoiceService {
    pub fn new(voice_clone_repo: Arc<dyn VoiceCloneRepository>, config: Arc<Config>) -> Self {
        Self {
            voice_clone_repo,
            config,
        }
    }
}

#[async_trait]
pub trait VoiceServiceApi: Send + Sync {
    /// Whether an upstream URL is set; nothing can be generated otherwise
    fn is_configured(&self) -> bool;

    /// Largest reference audio upload accepted, in bytes
    fn max_file_size(&self) -> usize;

    /// Relay a synthesis request to the upstream voice-cloning backend
    ///
    /// This operation:
    /// - Fails fast with `NotConfigured` when no upstream URL is set
    /// - Validates the prompt text
    /// - Validates the reference audio (extension, then size)
    /// - Forwards text and audio upstream and returns the complete audio body
    async fn generate(&self, request: SynthesisRequest) -> Result<Bytes, VoiceCloneError>;
}

#[async_trait]
impl VoiceServiceApi for VoiceService {
    fn is_configured(&self) -> bool {
        self.config.is_upstream_configured()
    }

    fn max_file_size(&self) -> usize {
        self.config.max_upload_bytes()
    }

    async fn generate(&self, request: SynthesisRequest) -> Result<Bytes, VoiceCloneError> {
        let base_url = self.config.colab_url().ok_or(VoiceCloneError::NotConfigured)?;

        validate_text(&request.text)?;

        let audio = &request.reference_audio;
        validate_audio_file(&audio.filename, audio.size(), self.max_file_size())?;

        let preview: String = request.text.chars().take(TEXT_PREVIEW_CHARS).collect();
        tracing::info!(
            text_preview = %preview,
            text_length = request.text.chars().count(),
            filename = %audio.filename,
            file_size = audio.size(),
            "Processing voice generation request"
        );

        let audio = self.voice_clone_repo.clone_voice(base_url, request).await?;

        tracing::info!(audio_size = audio.len(), "Voice generation successful");

        Ok(audio)
    }
}
