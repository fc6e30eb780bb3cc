use serde::{Deserialize, Serialize};

/// Default remote endpoint that turns a description into `{html, css, js}`.
pub const DEFAULT_GENERATION_ENDPOINT: &str = "https://gemini-backend-5boq.onrender.com/api/generate";

/// Default project name used for preview titles and archive names.
pub const DEFAULT_PROJECT_NAME: &str = "website-project";

/// Top-level application settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

/// Settings for the remote generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GENERATION_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Settings for ZIP export and the preview title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportSettings {
    pub project_name: String,
    /// Where archives are written. `None` means the platform download directory.
    pub download_dir: Option<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            download_dir: None,
        }
    }
}
