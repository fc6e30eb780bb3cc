//! App Core for Sitewright.
//!
//! Central struct holding the database, settings, history store, the live
//! generation session and the generation client.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::database::{Database, SqliteSlotStorage};
use crate::managers::history_manager::HistoryManager;
use crate::managers::session_manager::GenerationSession;
use crate::services::export_service;
use crate::services::generation_client::{GenerationClient, HttpGenerationClient};
use crate::services::preview_renderer;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::{ExportError, GenerationError};

/// Central application struct.
pub struct App {
    pub db: Arc<Database>,
    pub settings_engine: SettingsEngine,
    pub history: HistoryManager,
    pub session: GenerationSession,
    pub generator: Arc<dyn GenerationClient>,
}

impl App {
    /// Opens the database at `db_path` (`":memory:"` for a throwaway one),
    /// loads settings and builds the HTTP generation client from them.
    pub fn new(db_path: &str, settings_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_database(Database::open(db_path)?, settings_path)
    }

    /// Same as [`App::new`] on the database at [`Database::default_path`].
    pub fn open_default() -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_database(Database::open_default()?, None)
    }

    fn with_database(db: Database, settings_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(settings_path);
        if let Err(e) = settings_engine.load() {
            tracing::warn!(error = %e, "settings unreadable, using defaults");
        }

        let generator = HttpGenerationClient::from_settings(&settings_engine.get_settings().generation)
            .map_err(|e| format!("generation client init failed: {}", e))?;

        Ok(Self::with_parts(Arc::new(db), settings_engine, Arc::new(generator)))
    }

    /// Assembles an App from already-built parts, e.g. a stub generator in tests.
    pub fn with_parts(
        db: Arc<Database>,
        settings_engine: SettingsEngine,
        generator: Arc<dyn GenerationClient>,
    ) -> Self {
        let history = HistoryManager::new(Box::new(SqliteSlotStorage::new(db.clone())));
        Self {
            db,
            settings_engine,
            history,
            session: GenerationSession::new(),
            generator,
        }
    }

    /// Rebuilds the HTTP client after generation settings changed.
    pub fn reload_generator(&mut self) -> Result<(), GenerationError> {
        let client = HttpGenerationClient::from_settings(&self.settings_engine.get_settings().generation)?;
        tracing::info!(endpoint = %client.endpoint(), "generation client reconfigured");
        self.generator = Arc::new(client);
        Ok(())
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.settings_engine.get_settings().generation.timeout_secs)
    }

    pub fn project_name(&self) -> &str {
        &self.settings_engine.get_settings().export.project_name
    }

    /// Preview document for the session's current artifact.
    pub fn preview_document(&self) -> String {
        preview_renderer::compose(self.session.artifact(), self.project_name())
    }

    /// Writes the session's current artifact as a ZIP into the download directory.
    pub fn export_current(&self) -> Result<PathBuf, ExportError> {
        let dir = self.settings_engine.download_dir();
        export_service::write_archive(self.session.artifact(), self.project_name(), &dir)
    }
}
