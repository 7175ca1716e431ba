use bytes::Bytes;

/// Reference voice sample uploaded by the caller
#[derive(Debug, Clone)]
pub struct ReferenceAudio {
    pub filename: String,
    pub data: Bytes,
    /// Content type declared by the client, if any
    pub content_type: Option<String>,
}

impl ReferenceAudio {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Request for POST /generate, assembled from the multipart form
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub reference_audio: ReferenceAudio,
}
