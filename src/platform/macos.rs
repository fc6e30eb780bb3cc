// Sitewright platform paths for macOS
// Config/Data: ~/Library/Application Support/Sitewright
// Downloads:   ~/Downloads

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

fn app_support() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("Sitewright")
}

pub fn get_config_dir() -> PathBuf {
    app_support()
}

pub fn get_data_dir() -> PathBuf {
    app_support()
}

pub fn get_download_dir() -> PathBuf {
    home_dir().join("Downloads")
}
