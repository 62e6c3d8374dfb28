//! Optional speech-to-text input.
//!
//! Platforms without a speech engine use [`NoDictation`], which always
//! reports [`DictationError::Unsupported`].

use chatpane_types::error::DictationError;

/// Produces one utterance of text for the input box.
pub trait DictationProvider: Send + Sync {
    fn request_dictation(
        &self,
    ) -> impl std::future::Future<Output = Result<String, DictationError>> + Send;
}

/// Provider for platforms without speech recognition.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDictation;

impl DictationProvider for NoDictation {
    async fn request_dictation(&self) -> Result<String, DictationError> {
        Err(DictationError::Unsupported)
    }
}
