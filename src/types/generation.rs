use serde::{Deserialize, Serialize};

use super::artifact::Artifact;

/// Request body sent to the generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub description: String,
}

/// Response body of the generation endpoint. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedCode {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub css: Option<String>,
    #[serde(default)]
    pub js: Option<String>,
}

impl From<GeneratedCode> for Artifact {
    fn from(code: GeneratedCode) -> Self {
        Artifact {
            html: code.html.unwrap_or_default(),
            css: code.css.unwrap_or_default(),
            js: code.js.unwrap_or_default(),
        }
    }
}
