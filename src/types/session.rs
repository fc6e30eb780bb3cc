use serde::{Deserialize, Serialize};

use super::artifact::Artifact;
use super::history::HistoryRecord;

/// Lifecycle of a generation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Generating,
    Ready,
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient toast shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: &str, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

/// What a finished generation produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub prompt: String,
    pub artifact: Artifact,
    /// `true` when the fallback demo replaced a failed generation.
    pub used_fallback: bool,
    /// The history record written for this generation, if persisting succeeded.
    pub record: Option<HistoryRecord>,
    pub notifications: Vec<Notification>,
}
