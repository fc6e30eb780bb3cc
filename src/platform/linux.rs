// Sitewright platform paths for Linux
// Config:    $XDG_CONFIG_HOME/sitewright   (~/.config/sitewright)
// Data:      $XDG_DATA_HOME/sitewright     (~/.local/share/sitewright)
// Downloads: $XDG_DOWNLOAD_DIR             (~/Downloads)

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "sitewright";

fn home() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `xdg` joined with the app dir if set, else `~/<fallback...>/sitewright`.
fn xdg_app_dir(xdg: Option<String>, home: PathBuf, fallback: &[&str]) -> PathBuf {
    match xdg.filter(|v| !v.is_empty()) {
        Some(base) => PathBuf::from(base).join(APP_DIR),
        None => fallback.iter().fold(home, |p, seg| p.join(seg)).join(APP_DIR),
    }
}

pub fn get_config_dir() -> PathBuf {
    xdg_app_dir(env::var("XDG_CONFIG_HOME").ok(), home(), &[".config"])
}

pub fn get_data_dir() -> PathBuf {
    xdg_app_dir(env::var("XDG_DATA_HOME").ok(), home(), &[".local", "share"])
}

/// Downloads are shared with other apps, so no app subdirectory.
pub fn get_download_dir() -> PathBuf {
    match env::var("XDG_DOWNLOAD_DIR").ok().filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => home().join("Downloads"),
    }
}
