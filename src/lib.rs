//! # srcprint
//!
//! Convert a source code file into a syntax-highlighted, paginated PDF or a
//! plain text copy.
//!
//! The pipeline is a strict one-way flow: grammar detection, tokenization,
//! style resolution, line building, pagination, rendering. Detection and
//! tokenization failures degrade to plain text instead of failing, so a
//! conversion only errors when the input can't be read, the requested format
//! doesn't exist, or the output can't be produced.
//!
//! ## Quick start
//!
//! ```no_run
//! use srcprint::{Converter, OutputFormat};
//!
//! fn main() -> srcprint::Result<()> {
//!     let converter = Converter::new();
//!     let rendered = converter.convert_file("src/main.rs", OutputFormat::Pdf)?;
//!     rendered.write_to("main.pdf")?;
//!     Ok(())
//! }
//! ```
//!
//! Conversions are stateless and independent: separate [`Converter`]s (or one
//! shared by reference) can run in parallel with no coordination.

pub mod detect;
pub mod document;
pub mod error;
pub mod geometry;
pub mod paginate;
pub mod sinks;
pub mod style;
pub mod tokenize;

pub use detect::GrammarId;
pub use document::{Line, SourceDocument, StyledRun};
pub use error::{Error, Result};
pub use geometry::PageGeometry;
pub use paginate::Page;
pub use sinks::{OutputFormat, RenderedDocument};
pub use style::{Color, Style, Theme};
pub use tokenize::{Token, TokenKind};

use std::path::Path;
use syntect::parsing::SyntaxSet;

/// A configured conversion pipeline.
///
/// Owns the grammar set, theme, and page geometry; holds no per-conversion
/// state, so one instance can convert any number of files.
pub struct Converter {
    syntaxes: SyntaxSet,
    theme: Theme,
    geometry: PageGeometry,
    grammar_override: Option<String>,
}

impl Default for Converter {
    fn default() -> Converter {
        Converter::new()
    }
}

impl Converter {
    /// A converter with the bundled grammar set, the built-in theme, and US
    /// Letter geometry.
    pub fn new() -> Converter {
        Converter {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme: Theme::default(),
            geometry: PageGeometry::default(),
            grammar_override: None,
        }
    }

    /// Replace the style theme.
    pub fn with_theme(mut self, theme: Theme) -> Converter {
        self.theme = theme;
        self
    }

    /// Replace the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Converter {
        self.geometry = geometry;
        self
    }

    /// Force a grammar by language token (e.g. `py`, `rust`), bypassing
    /// detection. Unknown tokens fall back to detection per file.
    pub fn with_grammar_override<S: Into<String>>(mut self, token: S) -> Converter {
        self.grammar_override = Some(token.into());
        self
    }

    pub fn syntaxes(&self) -> &SyntaxSet {
        &self.syntaxes
    }

    /// Load a file and pick its grammar, honoring the override if set.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<SourceDocument> {
        let path = path.as_ref();
        let mut source = SourceDocument::load(&self.syntaxes, path)?;

        if let Some(token) = &self.grammar_override {
            match detect::grammar_for_token(&self.syntaxes, token) {
                Some(grammar) => source.grammar = grammar,
                None => log::debug!("grammar override `{token}` not found, using detection"),
            }
        }

        log::debug!("{}: grammar `{}`", path.display(), source.grammar);
        Ok(source)
    }

    /// Run the pipeline over an in-memory document.
    pub fn convert(
        &self,
        source: &SourceDocument,
        format: OutputFormat,
    ) -> Result<RenderedDocument> {
        let tokens = tokenize::tokenize(&source.content, &source.grammar, &self.syntaxes);
        let lines = document::build_lines(&source.content, tokens, &self.theme);
        let pages = paginate::paginate(lines, &self.geometry);
        sinks::render(&pages, format, &self.geometry)
    }

    /// Read a file and convert it in one step.
    pub fn convert_file<P: AsRef<Path>>(
        &self,
        path: P,
        format: OutputFormat,
    ) -> Result<RenderedDocument> {
        let source = self.load(path)?;
        self.convert(&source, format)
    }
}
