//! Generation session controller for Sitewright.
//!
//! Owns the prompt and the artifact currently shown in the preview and the
//! code editors. A generation always ends in `Ready`: when the remote call
//! fails, the fallback demo site takes its place and is recorded in history
//! just like a real result.
//!
//! ```text
//! Idle ──begin──▶ Generating ──finish──▶ Ready
//!                     ▲                    │
//!                     └───────begin────────┘
//! ```

use std::time::Duration;

use crate::managers::history_manager::HistoryManagerTrait;
use crate::services::generation_client::{generate_with_timeout, GenerationClient};
use crate::types::artifact::{Artifact, CodeField};
use crate::types::errors::{GenerationError, HistoryError, SessionError};
use crate::types::generation::GeneratedCode;
use crate::types::history::{HistoryRecord, HistoryUpdate};
use crate::types::session::{GenerationOutcome, Notification, NotificationKind, SessionState};

/// Trait defining the session controller operations.
pub trait SessionManagerTrait {
    fn state(&self) -> SessionState;
    fn begin(&mut self, prompt: &str) -> Result<(), SessionError>;
    fn finish(
        &mut self,
        history: &mut dyn HistoryManagerTrait,
        result: Result<GeneratedCode, GenerationError>,
    ) -> Result<GenerationOutcome, SessionError>;
    fn load_from_history(&mut self, record: &HistoryRecord) -> Result<Notification, SessionError>;
    fn edit_field(&mut self, field: CodeField, value: String);
    fn save_edits(&mut self, history: &mut dyn HistoryManagerTrait) -> Result<Option<HistoryRecord>, HistoryError>;
}

/// One page-level generation session.
#[derive(Debug)]
pub struct GenerationSession {
    state: SessionState,
    prompt: String,
    artifact: Artifact,
    /// History record the current artifact was written to or loaded from.
    source_id: Option<String>,
    last_failure: Option<String>,
}

impl Default for GenerationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            prompt: String::new(),
            artifact: Artifact::default(),
            source_id: None,
            last_failure: None,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }

    /// Error message of the most recent failed generation, cleared on success.
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.state == SessionState::Generating
    }

    /// Full round trip: validate, call the collaborator under `timeout`, record.
    pub async fn submit(
        &mut self,
        history: &mut dyn HistoryManagerTrait,
        client: &dyn GenerationClient,
        timeout: Duration,
        prompt: &str,
    ) -> Result<GenerationOutcome, SessionError> {
        self.begin(prompt)?;
        let result = generate_with_timeout(client, prompt, timeout).await;
        self.finish(history, result)
    }
}

impl SessionManagerTrait for GenerationSession {
    fn state(&self) -> SessionState {
        self.state
    }

    /// Validates the prompt and takes the single in-flight slot.
    fn begin(&mut self, prompt: &str) -> Result<(), SessionError> {
        if prompt.trim().is_empty() {
            return Err(SessionError::EmptyPrompt);
        }
        if self.state == SessionState::Generating {
            return Err(SessionError::Busy);
        }

        self.prompt = prompt.to_string();
        self.state = SessionState::Generating;
        tracing::info!(prompt_len = prompt.len(), "generation started");
        Ok(())
    }

    /// Settles a generation started by `begin`, recording it in `history`.
    fn finish(
        &mut self,
        history: &mut dyn HistoryManagerTrait,
        result: Result<GeneratedCode, GenerationError>,
    ) -> Result<GenerationOutcome, SessionError> {
        if self.state != SessionState::Generating {
            return Err(SessionError::NotGenerating);
        }

        let mut notifications = Vec::new();
        let (artifact, used_fallback) = match result {
            Ok(code) => {
                self.last_failure = None;
                notifications.push(Notification::new(
                    NotificationKind::Success,
                    "Success!",
                    "Your website has been created successfully!",
                ));
                (Artifact::from(code), false)
            }
            Err(e) => {
                tracing::warn!(error = %e, "generation failed, using fallback site");
                self.last_failure = Some(e.to_string());
                notifications.push(Notification::new(
                    NotificationKind::Error,
                    "Error",
                    "Failed to generate website. Please try again.",
                ));
                (Artifact::fallback(), true)
            }
        };

        let record = match history.append(&self.prompt, artifact.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::error!(error = %e, "could not save generation to history");
                notifications.push(Notification::new(
                    NotificationKind::Warning,
                    "History not saved",
                    e.to_string(),
                ));
                None
            }
        };

        self.artifact = artifact.clone();
        self.source_id = record.as_ref().map(|r| r.id.clone());
        self.state = SessionState::Ready;

        Ok(GenerationOutcome {
            prompt: self.prompt.clone(),
            artifact,
            used_fallback,
            record,
            notifications,
        })
    }

    /// Shows a stored record as if it had just been generated. The store is not touched.
    fn load_from_history(&mut self, record: &HistoryRecord) -> Result<Notification, SessionError> {
        if self.state == SessionState::Generating {
            return Err(SessionError::Busy);
        }

        self.prompt = record.prompt.clone();
        self.artifact = record.code.clone();
        self.source_id = Some(record.id.clone());
        self.state = SessionState::Ready;
        Ok(Notification::new(
            NotificationKind::Info,
            "Loaded from history",
            "You can now edit and update this website",
        ))
    }

    /// Edits the live artifact only; history keeps its snapshot.
    fn edit_field(&mut self, field: CodeField, value: String) {
        self.artifact.set_field(field, value);
    }

    /// Writes the live artifact back into the record it came from, on explicit request.
    fn save_edits(&mut self, history: &mut dyn HistoryManagerTrait) -> Result<Option<HistoryRecord>, HistoryError> {
        let Some(id) = self.source_id.clone() else {
            return Ok(None);
        };
        let updated = history.update(&id, HistoryUpdate::from_artifact(&self.artifact))?;
        if updated.is_none() {
            self.source_id = None;
        }
        Ok(updated)
    }
}
