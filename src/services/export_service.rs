//! ZIP export of a generated website.
//!
//! The archive always holds exactly four entries: `index.html`,
//! `styles.css`, `script.js` and a `README.md` describing them.

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::types::artifact::Artifact;
use crate::types::errors::ExportError;
use crate::types::settings::DEFAULT_PROJECT_NAME;

pub const HTML_ENTRY: &str = "index.html";
pub const CSS_ENTRY: &str = "styles.css";
pub const JS_ENTRY: &str = "script.js";
pub const README_ENTRY: &str = "README.md";

/// Archive extension appended to the project name.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// README placed next to the three source files.
pub fn readme(project_name: &str) -> String {
    format!(
        "# {}\n\nThis project was generated with Sitewright.\n\n## Files\n\n\
         - {}: Main HTML file\n- {}: CSS styles\n- {}: JavaScript functionality\n\n\
         ## How to use\n\n1. Extract all files to the same folder\n\
         2. Open {} in your browser\n3. To make edits, use any code editor\n",
        project_name, HTML_ENTRY, CSS_ENTRY, JS_ENTRY, HTML_ENTRY
    )
}

/// Packages `artifact` into an in-memory ZIP archive.
///
/// Entry timestamps are pinned, so identical inputs produce identical bytes
/// for a given `zip` crate version.
pub fn to_archive(artifact: &Artifact, project_name: &str) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        let entries = [
            (HTML_ENTRY, artifact.html.as_str()),
            (CSS_ENTRY, artifact.css.as_str()),
            (JS_ENTRY, artifact.js.as_str()),
        ];
        for (name, content) in entries {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())
                .map_err(|e| ExportError::Archive(e.to_string()))?;
        }

        zip.start_file(README_ENTRY, options)?;
        zip.write_all(readme(project_name).as_bytes())
            .map_err(|e| ExportError::Archive(e.to_string()))?;

        zip.finish()?;
    }
    Ok(buffer)
}

/// Turns a project name into a safe file stem: lowercase ASCII alphanumerics
/// separated by single dashes.
pub fn slugify(project_name: &str) -> String {
    let mut slug = String::with_capacity(project_name.len());
    let mut pending_dash = false;
    for c in project_name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// File name the archive is saved under.
pub fn archive_file_name(project_name: &str) -> String {
    let stem = slugify(project_name);
    let stem = if stem.is_empty() { DEFAULT_PROJECT_NAME.to_string() } else { stem };
    format!("{}.{}", stem, ARCHIVE_EXTENSION)
}

/// Builds the archive and writes it into `dir`, returning the written path.
pub fn write_archive(artifact: &Artifact, project_name: &str, dir: &Path) -> Result<PathBuf, ExportError> {
    let bytes = to_archive(artifact, project_name)?;

    fs::create_dir_all(dir).map_err(|e| ExportError::Io(format!("{}: {}", dir.display(), e)))?;
    let path = dir.join(archive_file_name(project_name));
    fs::write(&path, &bytes).map_err(|e| ExportError::Io(format!("{}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "archive written");
    Ok(path)
}
