pub mod http_voice_clone_repository;
pub mod voice_clone_repository;

pub use http_voice_clone_repository::HttpVoiceCloneRepository;
pub use voice_clone_repository::VoiceCloneRepository;
