use crate::domain::voice::{SynthesisRequest, VoiceCloneError};
use async_trait::async_trait;
use bytes::Bytes;

/// Repository for voice-cloning synthesis.
/// Abstracts the remote backend that turns text plus a reference sample into audio.
///
/// Implementations are responsible for:
/// - Encoding the request in the backend's wire format
/// - Classifying transport failures (unreachable, timeout, other)
/// - Turning non-success replies into `VoiceCloneError::Upstream`
/// - Reading the whole reply, so a body that stalls or breaks is an error rather than short audio
#[async_trait]
pub trait VoiceCloneRepository: Send + Sync {
    /// Send a synthesis request to the backend rooted at `base_url`
    ///
    /// Returns the complete audio body of a successful reply
    ///
    /// # Errors
    /// Returns error if the backend cannot be reached, times out, or rejects the request
    async fn clone_voice(
        &self,
        base_url: &str,
        request: SynthesisRequest,
    ) -> Result<Bytes, VoiceCloneError>;
}
