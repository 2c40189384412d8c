//! Writing exported drawings to disk.

use crate::config::ExportConfig;
use crate::draw::Shape;
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension of exported markup.
pub const MARKUP_EXTENSION: &str = "svg";

/// Errors that can occur while exporting a drawing.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: the overlay is not active")]
    NothingToExport,

    #[error("Failed to write export: {0}")]
    SaveError(#[from] std::io::Error),

    #[error("Failed to serialise shapes: {0}")]
    ManifestError(#[from] serde_json::Error),
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `extension` - File extension (e.g., "svg")
pub fn generate_filename(template: &str, extension: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, extension)
}

/// Ensure the export directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Writes exported markup into the configured directory.
///
/// An empty `markup` (what an inactive overlay exports) is refused rather
/// than written as an empty file.
///
/// # Returns
/// Path to the saved file
pub fn save_markup(markup: &str, config: &ExportConfig) -> Result<PathBuf, ExportError> {
    if markup.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let directory = ensure_directory_exists(&expand_tilde(&config.directory))?;
    let filename = generate_filename(&config.filename_template, MARKUP_EXTENSION);
    let file_path = directory.join(&filename);

    log::info!(
        "Saving drawing to: {} ({} bytes)",
        file_path.display(),
        markup.len()
    );
    fs::write(&file_path, markup)?;

    Ok(file_path)
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    id: &'a str,
    kind: &'a str,
}

/// Renders the shape collection as pretty-printed JSON.
pub fn shapes_manifest(shapes: &[Shape]) -> Result<String, ExportError> {
    let entries: Vec<ManifestEntry<'_>> = shapes
        .iter()
        .map(|shape| ManifestEntry {
            id: &shape.id,
            kind: shape.kind.as_str(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}
