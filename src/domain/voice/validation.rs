use super::error::VoiceCloneError;
use std::path::Path;

/// Reference audio extensions accepted by the upstream
pub const ALLOWED_EXTENSIONS: [&str; 4] = [".wav", ".mp3", ".m4a", ".ogg"];

pub const MIN_TEXT_CHARS: usize = 1;
pub const MAX_TEXT_CHARS: usize = 1000;

/// Validate the prompt text, counted in characters rather than bytes
pub fn validate_text(text: &str) -> Result<(), VoiceCloneError> {
    let char_count = text.chars().count();

    if char_count < MIN_TEXT_CHARS {
        return Err(VoiceCloneError::InvalidText(
            "Text cannot be empty".to_string(),
        ));
    }

    if char_count > MAX_TEXT_CHARS {
        return Err(VoiceCloneError::InvalidText(format!(
            "Text must be {} characters or less",
            MAX_TEXT_CHARS
        )));
    }

    Ok(())
}

/// Validate a reference audio upload by extension, then by size.
///
/// Only the file name is inspected; the bytes themselves are never sniffed.
pub fn validate_audio_file(
    filename: &str,
    file_size: usize,
    max_file_size: usize,
) -> Result<(), VoiceCloneError> {
    validate_audio_extension(filename)?;

    if file_size > max_file_size {
        return Err(VoiceCloneError::FileTooLarge {
            max_bytes: max_file_size,
        });
    }

    Ok(())
}

/// Extension half of the audio check, usable before any bytes are read
pub fn validate_audio_extension(filename: &str) -> Result<(), VoiceCloneError> {
    let allowed = audio_extension(filename)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);
    if allowed {
        Ok(())
    } else {
        Err(VoiceCloneError::InvalidFormat)
    }
}

/// Lowercased extension including the leading dot, e.g. `.wav`
fn audio_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}
