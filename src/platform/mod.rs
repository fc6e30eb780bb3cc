// Sitewright platform abstraction
// Resolves per-OS config, data and download directories at compile time via `cfg(target_os)`.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
use linux as os;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
use macos as os;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
use windows as os;

/// Directory holding `settings.json`.
pub fn get_config_dir() -> PathBuf {
    os::get_config_dir()
}

/// Directory holding the SQLite database.
pub fn get_data_dir() -> PathBuf {
    os::get_data_dir()
}

/// Default destination for exported archives.
pub fn get_download_dir() -> PathBuf {
    os::get_download_dir()
}
