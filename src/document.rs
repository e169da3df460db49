//! The document model: styled runs, lines, and the line builder.
//!
//! The builder consumes the styled token stream and splits it into logical
//! lines at newline boundaries. A newline inside a token is a zero-width line
//! separator: consumed, never rendered. A token straddling several lines is
//! split into per-line runs that share one style, so concatenating a line's
//! run texts always reconstructs that line's text exactly.

use crate::detect::GrammarId;
use crate::error::{Error, Result};
use crate::style::{Style, Theme};
use crate::tokenize::Token;
use std::path::{Path, PathBuf};
use syntect::parsing::SyntaxSet;

/// An input file loaded into memory, with its detected or declared grammar.
///
/// Immutable once created; the pipeline never mutates it.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub content: String,
    pub grammar: GrammarId,
}

impl SourceDocument {
    /// Load a file and detect its grammar.
    pub fn load(syntaxes: &SyntaxSet, path: &Path) -> Result<SourceDocument> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::UnreadableInput {
            path: path.to_path_buf(),
            source,
        })?;
        let grammar = crate::detect::detect(syntaxes, path, &content);
        Ok(SourceDocument {
            path: path.to_path_buf(),
            content,
            grammar,
        })
    }

    /// Build a document from in-memory content with an explicit grammar.
    pub fn from_string<S, P>(content: S, path: P, grammar: GrammarId) -> SourceDocument
    where
        S: Into<String>,
        P: Into<PathBuf>,
    {
        SourceDocument {
            path: path.into(),
            content: content.into(),
            grammar,
        }
    }
}

/// A contiguous span of text sharing one visual style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub style: Style,
}

/// One visual line: an ordered run sequence.
///
/// `continued` is false for logical lines as produced by the builder; the
/// paginator's wrap pass sets it on the extra visual lines it inserts, which
/// is how the TXT sink rejoins soft-wrapped lines later.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub runs: Vec<StyledRun>,
    pub continued: bool,
}

impl Line {
    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Visual width in character cells.
    pub fn width(&self) -> usize {
        self.runs.iter().map(|run| run.text.chars().count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }

    fn push(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        // merge into the previous run when the style matches
        if let Some(last) = self.runs.last_mut() {
            if last.style == style {
                last.text.push_str(text);
                return;
            }
        }
        self.runs.push(StyledRun {
            text: text.to_string(),
            style,
        });
    }
}

/// Split the styled token stream into logical lines.
///
/// Edge cases per the data-model invariants:
/// - a token spanning multiple lines becomes per-line runs with one style;
/// - trailing content without a final newline still produces a final line;
/// - empty content yields exactly one empty line;
/// - `\r\n` endings are normalized: the `\r` is consumed with the separator.
pub fn build_lines<I>(content: &str, tokens: I, theme: &Theme) -> Vec<Line>
where
    I: IntoIterator<Item = Token>,
{
    let mut lines = vec![Line::default()];

    for token in tokens {
        let style = theme.resolve(&token.kind);
        let mut rest = token.text(content);

        while let Some(newline) = rest.find('\n') {
            let head = &rest[..newline];
            let head = head.strip_suffix('\r').unwrap_or(head);
            lines
                .last_mut()
                .expect("lines is never empty")
                .push(head, style);
            lines.push(Line::default());
            rest = &rest[newline + 1..];
        }
        lines
            .last_mut()
            .expect("lines is never empty")
            .push(rest, style);
    }

    // a final newline terminates the last line rather than opening a new one
    if lines.len() > 1 && content.ends_with('\n') {
        let trailing = lines.pop().expect("checked len above");
        debug_assert!(trailing.is_empty());
    }

    lines
}
