use std::time::Duration;

use sitewright::types::errors::*;

// === HistoryError Tests ===

#[test]
fn history_error_display_variants() {
    assert_eq!(HistoryError::EmptyPrompt.to_string(), "History prompt must not be empty");
    assert_eq!(
        HistoryError::Persistence("disk gone".to_string()).to_string(),
        "History persistence error: disk gone"
    );
    assert_eq!(
        HistoryError::QuotaExceeded("slot full".to_string()).to_string(),
        "History storage quota exceeded: slot full"
    );
    assert_eq!(
        HistoryError::Serialization("bad utf-8".to_string()).to_string(),
        "History serialization error: bad utf-8"
    );
}

#[test]
fn history_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(HistoryError::EmptyPrompt);
    assert!(err.source().is_none());
}

// === GenerationError Tests ===

#[test]
fn generation_error_display_variants() {
    assert_eq!(
        GenerationError::Network("connection refused".to_string()).to_string(),
        "Generation network error: connection refused"
    );
    assert_eq!(
        GenerationError::Status(503).to_string(),
        "Generation endpoint returned status 503"
    );
    assert_eq!(
        GenerationError::MalformedPayload("expected value".to_string()).to_string(),
        "Generation response malformed: expected value"
    );
}

#[test]
fn generation_timeout_reports_whole_seconds() {
    let err = GenerationError::Timeout(Duration::from_millis(30_400));
    assert_eq!(err.to_string(), "Generation timed out after 30s");
}

// === SessionError Tests ===

#[test]
fn session_error_messages_are_user_facing() {
    assert_eq!(
        SessionError::EmptyPrompt.to_string(),
        "Please describe your website idea first!"
    );
    assert_eq!(SessionError::Busy.to_string(), "A generation is already in progress");
    assert_eq!(SessionError::NotGenerating.to_string(), "No generation is in progress");
}

// === ExportError Tests ===

#[test]
fn export_error_display_variants() {
    assert_eq!(
        ExportError::Archive("bad entry".to_string()).to_string(),
        "Archive error: bad entry"
    );
    assert_eq!(
        ExportError::Io("permission denied".to_string()).to_string(),
        "Export I/O error: permission denied"
    );
}

#[test]
fn export_error_from_zip_error() {
    let zip_err = zip::result::ZipError::FileNotFound;
    let err: ExportError = zip_err.into();
    assert!(matches!(err, ExportError::Archive(_)));
}

// === PreviewError Tests ===

#[test]
fn preview_error_display() {
    assert_eq!(
        PreviewError::Fullscreen("denied".to_string()).to_string(),
        "Fullscreen unavailable: denied"
    );
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("file not found".to_string()).to_string(),
        "Settings I/O error: file not found"
    );
    assert_eq!(
        SettingsError::SerializationError("unexpected EOF".to_string()).to_string(),
        "Settings serialization error: unexpected EOF"
    );
    assert_eq!(
        SettingsError::InvalidKey("nope".to_string()).to_string(),
        "Invalid settings key: nope"
    );
    assert_eq!(
        SettingsError::InvalidValue("not a number".to_string()).to_string(),
        "Invalid settings value: not a number"
    );
}
