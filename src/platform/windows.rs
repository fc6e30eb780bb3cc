// Sitewright platform paths for Windows
// Config/Data: %APPDATA%\Sitewright
// Downloads:   %USERPROFILE%\Downloads

use std::env;
use std::path::PathBuf;

fn roaming() -> PathBuf {
    PathBuf::from(
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming")),
    )
}

pub fn get_config_dir() -> PathBuf {
    roaming().join("Sitewright")
}

pub fn get_data_dir() -> PathBuf {
    roaming().join("Sitewright")
}

pub fn get_download_dir() -> PathBuf {
    let profile = env::var("USERPROFILE").unwrap_or_else(|_| String::from("C:\\Users\\Default"));
    PathBuf::from(profile).join("Downloads")
}
