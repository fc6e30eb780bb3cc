// Sitewright services
// Services provide stateless or external functionality: generation, export, preview, settings.

pub mod export_service;
pub mod generation_client;
pub mod preview_renderer;
pub mod settings_engine;
