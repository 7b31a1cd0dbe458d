//! Error types for the `adk-docqa` crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading documents or talking to model services.
///
/// Only [`UnsupportedFormat`](DocQaError::UnsupportedFormat),
/// [`ExtractionError`](DocQaError::ExtractionError), [`Io`](DocQaError::Io) and
/// [`ConfigError`](DocQaError::ConfigError) ever reach callers of the high-level
/// components. Generation and embedding errors are produced by service
/// implementations and replaced with fallback values by the components that
/// consume them.
#[derive(Debug, Error)]
pub enum DocQaError {
    /// The file extension is neither `.pdf` nor `.txt`.
    #[error("Unsupported file type '{extension}' for {}: upload a PDF or TXT", path.display())]
    UnsupportedFormat {
        /// The offending file.
        path: PathBuf,
        /// The extension as found on disk (empty if there was none).
        extension: String,
    },

    /// The PDF text layer could not be read.
    #[error("Text extraction failed for {}: {message}", path.display())]
    ExtractionError {
        /// The file being extracted.
        path: PathBuf,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred while calling the generative service.
    #[error("Generation error ({provider}): {message}")]
    GenerationError {
        /// The generative backend that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error while reading a document.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A convenience result type for document QA operations.
pub type Result<T> = std::result::Result<T, DocQaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_names_path_and_extension() {
        let err = DocQaError::UnsupportedFormat {
            path: PathBuf::from("notes.docx"),
            extension: "docx".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("notes.docx"));
        assert!(msg.contains("'docx'"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DocQaError = io.into();
        assert!(matches!(err, DocQaError::Io(_)));
    }
}
