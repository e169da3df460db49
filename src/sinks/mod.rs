//! Output back-ends: styled PDF and plain TXT.

mod pdf;
mod txt;

use crate::error::{Error, Result};
use crate::geometry::PageGeometry;
use crate::paginate::Page;
use std::path::Path;
use std::str::FromStr;

/// Requested output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Txt,
}

impl OutputFormat {
    /// File extension conventionally used for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Txt => "txt",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<OutputFormat> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "txt" => Ok(OutputFormat::Txt),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// The final output artifact, owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedDocument {
    Pdf(Vec<u8>),
    Txt(String),
}

impl RenderedDocument {
    /// Raw bytes of the artifact.
    pub fn bytes(&self) -> &[u8] {
        match self {
            RenderedDocument::Pdf(bytes) => bytes,
            RenderedDocument::Txt(text) => text.as_bytes(),
        }
    }

    /// Persist the artifact to a file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.bytes())?;
        Ok(())
    }
}

/// Convert the paginated document model into the requested format.
///
/// PDF rendering fails with [`Error::Render`] when the geometry leaves no
/// printable area; TXT never fails. No other formats exist; unrecognized
/// format strings are rejected earlier by [`OutputFormat::from_str`].
pub fn render(
    pages: &[Page],
    format: OutputFormat,
    geometry: &PageGeometry,
) -> Result<RenderedDocument> {
    match format {
        OutputFormat::Pdf => Ok(RenderedDocument::Pdf(pdf::render(pages, geometry)?)),
        OutputFormat::Txt => Ok(RenderedDocument::Txt(txt::render(pages))),
    }
}
