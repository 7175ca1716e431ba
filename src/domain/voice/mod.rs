pub mod dto;
pub mod error;
pub mod service;
pub mod validation;

pub use dto::{ReferenceAudio, SynthesisRequest};
pub use error::VoiceCloneError;
pub use service::{VoiceService, VoiceServiceApi};
