//! Error types for the conversion pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a conversion.
///
/// Grammar detection and tokenization failures are deliberately absent: they
/// degrade to plain-text tokenization instead of failing, so a conversion only
/// errors when the input can't be read, the requested format doesn't exist, or
/// the output can't be produced.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file could not be loaded.
    #[error("failed to read {}: {source}", path.display())]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The requested output format is not recognized.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The PDF back-end could not process the document tree.
    #[error("render error: {0}")]
    Render(String),

    /// I/O error while writing the output artifact.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
