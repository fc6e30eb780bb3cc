use std::time::Duration;

use thiserror::Error;

// === HistoryError ===

/// Errors related to the generation history store.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// A history record must carry a non-blank prompt.
    #[error("History prompt must not be empty")]
    EmptyPrompt,
    /// The storage slot could not be read or written.
    #[error("History persistence error: {0}")]
    Persistence(String),
    /// The storage slot refused the write because it is full.
    #[error("History storage quota exceeded: {0}")]
    QuotaExceeded(String),
    /// The record list could not be encoded.
    #[error("History serialization error: {0}")]
    Serialization(String),
}

// === GenerationError ===

/// Errors returned by the remote website generation endpoint.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request never produced a response.
    #[error("Generation network error: {0}")]
    Network(String),
    /// The endpoint answered with a non-success status code.
    #[error("Generation endpoint returned status {0}")]
    Status(u16),
    /// The response body was not the expected JSON shape.
    #[error("Generation response malformed: {0}")]
    MalformedPayload(String),
    /// No response arrived within the configured timeout.
    #[error("Generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

// === SessionError ===

/// Errors related to the generation session controller.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    /// Validation failure: the prompt is empty or whitespace only.
    #[error("Please describe your website idea first!")]
    EmptyPrompt,
    /// A generation is already in flight for this session.
    #[error("A generation is already in progress")]
    Busy,
    /// `finish` was called without a matching `begin`.
    #[error("No generation is in progress")]
    NotGenerating,
}

// === ExportError ===

/// Errors related to packaging a website as a ZIP archive.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Building the archive failed.
    #[error("Archive error: {0}")]
    Archive(String),
    /// Writing the archive to disk failed.
    #[error("Export I/O error: {0}")]
    Io(String),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(e: zip::result::ZipError) -> Self {
        ExportError::Archive(e.to_string())
    }
}

// === PreviewError ===

/// Errors related to preview presentation.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// The host refused to enter or leave fullscreen.
    #[error("Fullscreen unavailable: {0}")]
    Fullscreen(String),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
