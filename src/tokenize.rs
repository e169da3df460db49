//! Tokenizer adapter over the syntect parser.
//!
//! Produces a lazy, restartable stream of `(span, kind)` tokens covering the
//! entire input with no gaps and no overlaps: concatenating the spans of all
//! tokens reconstructs the source text exactly. Token kinds are hierarchical
//! dotted scope strings (`keyword.control.flow.python`), which is what the
//! style resolver's prefix fallback works on.
//!
//! Robustness policy: if the grammar can't be resolved, or parsing fails
//! partway through, the remaining content degrades silently to a single
//! plain-text token. A conversion never fails because highlighting is
//! imperfect.

use crate::detect::GrammarId;
use std::fmt;
use std::ops::Range;
use syntect::parsing::{ParseState, ScopeStack, SyntaxSet};

/// Kind every fallback token carries.
pub const PLAIN_TOKEN_KIND: &str = "text.plain";

/// Hierarchical category label of a lexical unit.
///
/// Dotted segments go from general to specific: `string.quoted.double` is a
/// refinement of `string`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenKind(String);

impl TokenKind {
    pub fn new<S: Into<String>>(kind: S) -> TokenKind {
        TokenKind(kind.into())
    }

    pub fn plain() -> TokenKind {
        TokenKind(PLAIN_TOKEN_KIND.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A typed span of source text.
///
/// `span` holds byte offsets into the content the token was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub span: Range<usize>,
    pub kind: TokenKind,
}

impl Token {
    /// The text this token covers.
    pub fn text<'a>(&self, content: &'a str) -> &'a str {
        &content[self.span.clone()]
    }
}

/// Tokenize content under a grammar.
///
/// Returns a fresh lazy iterator each call; iterating twice over two streams
/// from the same input yields identical tokens. An unknown grammar id degrades
/// to plain-text tokenization rather than failing.
pub fn tokenize<'a>(
    content: &'a str,
    grammar: &GrammarId,
    syntaxes: &'a SyntaxSet,
) -> TokenStream<'a> {
    let state = match syntaxes.find_syntax_by_name(grammar.as_str()) {
        Some(syntax) => Some((ParseState::new(syntax), ScopeStack::new())),
        None => {
            log::debug!(
                "grammar `{}` not found, falling back to plain-text tokens",
                grammar
            );
            None
        }
    };

    TokenStream {
        content,
        syntaxes,
        state,
        offset: 0,
        buffered: Vec::new().into_iter(),
    }
}

/// Lazy token stream over one piece of content.
///
/// Parses one line at a time, buffering that line's tokens. Dropping the
/// stream early is fine; it holds no resources beyond the parse state.
pub struct TokenStream<'a> {
    content: &'a str,
    syntaxes: &'a SyntaxSet,
    /// `None` means plain-text fallback: the rest of the content is one token.
    state: Option<(ParseState, ScopeStack)>,
    /// Start of the next unparsed line (byte offset into `content`).
    offset: usize,
    buffered: std::vec::IntoIter<Token>,
}

impl<'a> TokenStream<'a> {
    /// Kind for the current top of the scope stack.
    fn top_kind(stack: &ScopeStack) -> TokenKind {
        stack
            .as_slice()
            .last()
            .map(|scope| TokenKind::new(scope.build_string()))
            .unwrap_or_else(TokenKind::plain)
    }

    /// Push a token, coalescing adjacent spans with an identical kind.
    fn push(tokens: &mut Vec<Token>, span: Range<usize>, kind: TokenKind) {
        if span.is_empty() {
            return;
        }
        if let Some(last) = tokens.last_mut() {
            if last.kind == kind && last.span.end == span.start {
                last.span.end = span.end;
                return;
            }
        }
        tokens.push(Token { span, kind });
    }

    /// Parse the next line into tokens, or report failure.
    fn parse_next_line(&mut self) -> Option<Vec<Token>> {
        let (state, stack) = self.state.as_mut()?;
        let rest = &self.content[self.offset..];
        let line_end = rest
            .find('\n')
            .map(|i| self.offset + i + 1)
            .unwrap_or(self.content.len());
        let line = &self.content[self.offset..line_end];

        let ops = match state.parse_line(line, self.syntaxes) {
            Ok(ops) => ops,
            Err(e) => {
                log::debug!("tokenizer failed on line at byte {}: {e}", self.offset);
                return None;
            }
        };

        let mut tokens = Vec::new();
        let mut cursor = 0usize;
        for (op_offset, op) in ops {
            if op_offset > cursor {
                Self::push(
                    &mut tokens,
                    self.offset + cursor..self.offset + op_offset,
                    Self::top_kind(stack),
                );
                cursor = op_offset;
            }
            if let Err(e) = stack.apply(&op) {
                log::debug!("scope stack error at byte {}: {e}", self.offset + cursor);
                return None;
            }
        }
        if cursor < line.len() {
            Self::push(
                &mut tokens,
                self.offset + cursor..line_end,
                Self::top_kind(stack),
            );
        }

        self.offset = line_end;
        Some(tokens)
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.buffered.next() {
                return Some(token);
            }
            if self.offset >= self.content.len() {
                return None;
            }

            if self.state.is_some() {
                match self.parse_next_line() {
                    Some(tokens) => {
                        self.buffered = tokens.into_iter();
                        continue;
                    }
                    None => {
                        // degrade the rest of the content to plain text
                        self.state = None;
                    }
                }
            }

            let span = self.offset..self.content.len();
            self.offset = self.content.len();
            return Some(Token {
                span,
                kind: TokenKind::plain(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::GrammarId;

    fn syntaxes() -> SyntaxSet {
        SyntaxSet::load_defaults_newlines()
    }

    fn coverage(content: &str, tokens: &[Token]) {
        let mut cursor = 0;
        for token in tokens {
            assert_eq!(token.span.start, cursor, "gap or overlap at {cursor}");
            assert!(token.span.end > token.span.start, "empty token at {cursor}");
            cursor = token.span.end;
        }
        assert_eq!(cursor, content.len(), "tokens don't cover the full content");
    }

    #[test]
    fn tokens_cover_python_source_exactly() {
        let ss = syntaxes();
        let content = "def f():\n    return 1\n";
        let tokens: Vec<Token> =
            tokenize(content, &GrammarId::new("Python"), &ss).collect();
        coverage(content, &tokens);

        let reconstructed: String = tokens.iter().map(|t| t.text(content)).collect();
        assert_eq!(reconstructed, content);
    }

    #[test]
    fn python_keywords_get_keyword_kinds() {
        let ss = syntaxes();
        let content = "def f():\n    return 1\n";
        let tokens: Vec<Token> =
            tokenize(content, &GrammarId::new("Python"), &ss).collect();

        let kind_of = |word: &str| {
            tokens
                .iter()
                .find(|t| t.text(content) == word)
                .map(|t| t.kind.as_str().to_string())
                .unwrap_or_else(|| panic!("no token for `{word}`"))
        };

        assert!(kind_of("def").starts_with("storage") || kind_of("def").starts_with("keyword"));
        assert!(kind_of("return").starts_with("keyword"));
    }

    #[test]
    fn unknown_grammar_yields_single_plain_token() {
        let ss = syntaxes();
        let content = "anything at all\nmore\n";
        let tokens: Vec<Token> =
            tokenize(content, &GrammarId::new("No Such Grammar"), &ss).collect();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].span, 0..content.len());
        assert_eq!(tokens[0].kind, TokenKind::plain());
    }

    #[test]
    fn plain_text_grammar_covers_everything() {
        let ss = syntaxes();
        let content = "just some text\nwith two lines\n";
        let tokens: Vec<Token> =
            tokenize(content, &GrammarId::plain_text(), &ss).collect();
        coverage(content, &tokens);
    }

    #[test]
    fn empty_content_yields_no_tokens() {
        let ss = syntaxes();
        let tokens: Vec<Token> = tokenize("", &GrammarId::new("Python"), &ss).collect();
        assert!(tokens.is_empty());
    }

    #[test]
    fn stream_is_restartable() {
        let ss = syntaxes();
        let content = "fn main() {}\n";
        let grammar = GrammarId::new("Rust");
        let first: Vec<Token> = tokenize(content, &grammar, &ss).collect();
        let second: Vec<Token> = tokenize(content, &grammar, &ss).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn content_without_trailing_newline_is_covered() {
        let ss = syntaxes();
        let content = "x = 1";
        let tokens: Vec<Token> =
            tokenize(content, &GrammarId::new("Python"), &ss).collect();
        coverage(content, &tokens);
    }
}
