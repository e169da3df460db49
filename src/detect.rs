//! Grammar selection for input files.
//!
//! Picks a lexical grammar for a file by checking its extension against the
//! grammar set's extension table, then sniffing the first non-blank line for a
//! shebang or marker comment, and finally falling back to plain text. Detection
//! never fails; the worst case is an unhighlighted document.

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Name of the grammar every detection failure falls back to.
pub const PLAIN_TEXT_GRAMMAR: &str = "Plain Text";

/// Identifier of a lexical grammar, as named by the grammar set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarId(String);

impl GrammarId {
    pub fn new<S: Into<String>>(name: S) -> GrammarId {
        GrammarId(name.into())
    }

    /// The generic grammar that tokenizes everything as plain text.
    pub fn plain_text() -> GrammarId {
        GrammarId(PLAIN_TEXT_GRAMMAR.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GrammarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&SyntaxReference> for GrammarId {
    fn from(syntax: &SyntaxReference) -> GrammarId {
        GrammarId(syntax.name.clone())
    }
}

/// Select a grammar for a file.
///
/// Checks the file extension first (a file name may carry zero or more
/// extension segments; the full file name is also tried so files like
/// `Makefile` match). If that fails, the first non-blank line of content is
/// checked for a shebang or marker comment. If nothing matches, returns the
/// plain-text grammar. Pure; no error condition.
pub fn detect(syntaxes: &SyntaxSet, path: &Path, content: &str) -> GrammarId {
    if let Some(ext) = path.extension().and_then(OsStr::to_str) {
        if let Some(syntax) = syntaxes.find_syntax_by_extension(ext) {
            return GrammarId::from(syntax);
        }
    }

    // extension-less files like Makefile are keyed by their full name
    if let Some(name) = path.file_name().and_then(OsStr::to_str) {
        if let Some(syntax) = syntaxes.find_syntax_by_extension(name) {
            return GrammarId::from(syntax);
        }
    }

    if let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) {
        if let Some(syntax) = syntaxes.find_syntax_by_first_line(first_line) {
            log::debug!("detected grammar `{}` from first line", syntax.name);
            return GrammarId::from(syntax);
        }
    }

    GrammarId::plain_text()
}

/// Resolve an explicit grammar override by language token (e.g. `py`, `rust`).
///
/// Returns `None` when the token is unknown, letting the caller decide whether
/// to fall back to detection.
pub fn grammar_for_token(syntaxes: &SyntaxSet, token: &str) -> Option<GrammarId> {
    syntaxes.find_syntax_by_token(token).map(GrammarId::from)
}
