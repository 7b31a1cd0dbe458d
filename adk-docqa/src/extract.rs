//! Text extraction from uploaded files.
//!
//! Supports `.pdf` (text layer only, pages joined with `\n` in page order) and
//! `.txt` (read verbatim as UTF-8). Anything else is rejected with
//! [`DocQaError::UnsupportedFormat`].

use std::fs;
use std::path::Path;

use tracing::{debug, error};

use crate::document::Document;
use crate::error::{DocQaError, Result};

/// File formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Pdf,
    Text,
}

impl SourceFormat {
    /// Determine the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(std::ffi::OsStr::to_str).unwrap_or("");
        match extension.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "txt" => Ok(Self::Text),
            _ => Err(DocQaError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension.to_string(),
            }),
        }
    }
}

/// Extract the full text of a `.pdf` or `.txt` file.
///
/// # Errors
///
/// - [`DocQaError::UnsupportedFormat`] for any other extension
/// - [`DocQaError::ExtractionError`] if the PDF cannot be parsed
/// - [`DocQaError::Io`] if the file cannot be read or is not valid UTF-8
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path)?;

    let text = match format {
        SourceFormat::Pdf => {
            let pages = pdf_extract::extract_text_by_pages(path).map_err(|e| {
                error!(path = %path.display(), error = %e, "pdf extraction failed");
                DocQaError::ExtractionError { path: path.to_path_buf(), message: e.to_string() }
            })?;
            debug!(path = %path.display(), pages = pages.len(), "extracted pdf");
            pages.join("\n")
        }
        SourceFormat::Text => fs::read_to_string(path)?,
    };

    Ok(text)
}

impl Document {
    /// Extract a file into a [`Document`] named after its filename.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = extract_text(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        debug!(document = %name, chars = text.chars().count(), "loaded document");
        Ok(Self { name, text })
    }
}
