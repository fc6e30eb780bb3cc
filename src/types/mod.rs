// Sitewright shared type definitions
// Each submodule defines types used across the application.

pub mod artifact;
pub mod errors;
pub mod generation;
pub mod history;
pub mod session;
pub mod settings;
