use serde::{Deserialize, Serialize};

use super::artifact::Artifact;

/// A persisted snapshot of one prompt and the website generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub prompt: String,
    /// Creation or last-modified time, epoch milliseconds.
    pub timestamp: i64,
    pub code: Artifact,
}

/// Partial update for a history record.
///
/// `None` leaves a field untouched; `Some(String::new())` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryUpdate {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub css: Option<String>,
    #[serde(default)]
    pub js: Option<String>,
}

impl HistoryUpdate {
    /// Update carrying every code field of `artifact`.
    pub fn from_artifact(artifact: &Artifact) -> Self {
        Self {
            prompt: None,
            html: Some(artifact.html.clone()),
            css: Some(artifact.css.clone()),
            js: Some(artifact.js.clone()),
        }
    }
}
