//! Token-kind to visual style resolution.
//!
//! A [`Theme`] maps token-kind categories (dotted prefixes like `keyword` or
//! `constant.numeric`) to styles, with a mandatory default. Resolution walks
//! the kind hierarchy from most to least specific, so `string.quoted.double`
//! falls back to `string.quoted`, then `string`, then the default. Themes are
//! plain serde data and load from TOML files.

use crate::tokenize::TokenKind;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// An sRGB color. Serializes as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// Parse a `#rrggbb` hex string (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Color> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex)
            .ok_or_else(|| D::Error::custom(format!("invalid color `{hex}`, expected #rrggbb")))
    }
}

/// Visual style of a styled run: foreground color plus bold/italic flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub color: Color,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl Style {
    pub const fn plain(color: Color) -> Style {
        Style {
            color,
            bold: false,
            italic: false,
        }
    }
}

impl Default for Style {
    fn default() -> Style {
        Style::plain(Color::BLACK)
    }
}

/// A fixed, swappable mapping from token-kind categories to styles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Style for any kind no rule matches. Mandatory.
    pub default: Style,
    /// Rules keyed by dotted kind prefix (`keyword`, `string`, `constant.numeric`, ...).
    #[serde(default)]
    pub rules: BTreeMap<String, Style>,
}

impl Theme {
    /// Resolve a token kind to a style.
    ///
    /// Exact match first, then progressively stripped dotted prefixes, then
    /// the default. Deterministic: same kind and theme always give the same
    /// style.
    pub fn resolve(&self, kind: &TokenKind) -> Style {
        let mut key = kind.as_str();
        loop {
            if let Some(style) = self.rules.get(key) {
                return *style;
            }
            match key.rfind('.') {
                Some(dot) => key = &key[..dot],
                None => return self.default,
            }
        }
    }

    /// Parse a theme from TOML text.
    pub fn from_toml(text: &str) -> Result<Theme, toml::de::Error> {
        toml::from_str(text)
    }
}

impl Default for Theme {
    /// Built-in light theme with a GitHub-like palette.
    fn default() -> Theme {
        let mut rules = BTreeMap::new();
        let mut rule = |key: &str, style: Style| {
            rules.insert(key.to_string(), style);
        };

        rule(
            "keyword",
            Style {
                color: Color::new(0xa7, 0x1d, 0x5d),
                bold: true,
                italic: false,
            },
        );
        rule(
            "storage",
            Style {
                color: Color::new(0xa7, 0x1d, 0x5d),
                bold: true,
                italic: false,
            },
        );
        rule("string", Style::plain(Color::new(0x18, 0x36, 0x91)));
        rule(
            "comment",
            Style {
                color: Color::new(0x96, 0x98, 0x96),
                bold: false,
                italic: true,
            },
        );
        rule("constant", Style::plain(Color::new(0x00, 0x86, 0xb3)));
        rule("entity.name", Style::plain(Color::new(0x63, 0xa3, 0x5c)));
        rule(
            "entity.name.function",
            Style::plain(Color::new(0x79, 0x5d, 0xa3)),
        );
        rule("support", Style::plain(Color::new(0x00, 0x86, 0xb3)));
        rule(
            "variable.parameter",
            Style::plain(Color::new(0xed, 0x6a, 0x43)),
        );

        Theme {
            default: Style::plain(Color::new(0x32, 0x32, 0x32)),
            rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_exact_match_before_prefix() {
        let theme = Theme::default();
        let exact = theme.resolve(&TokenKind::new("entity.name.function"));
        let prefix = theme.resolve(&TokenKind::new("entity.name"));
        assert_eq!(exact.color, Color::new(0x79, 0x5d, 0xa3));
        assert_eq!(prefix.color, Color::new(0x63, 0xa3, 0x5c));
    }

    #[test]
    fn resolves_by_stripping_dotted_segments() {
        let theme = Theme::default();
        let style = theme.resolve(&TokenKind::new("string.quoted.double.python"));
        assert_eq!(style, theme.resolve(&TokenKind::new("string")));
    }

    #[test]
    fn unknown_kinds_get_the_default() {
        let theme = Theme::default();
        let style = theme.resolve(&TokenKind::new("meta.block.unheard.of"));
        assert_eq!(style, theme.default);
    }

    #[test]
    fn resolution_is_idempotent() {
        let theme = Theme::default();
        let kind = TokenKind::new("keyword.control.flow.python");
        assert_eq!(theme.resolve(&kind), theme.resolve(&kind));
    }

    #[test]
    fn color_hex_round_trip() {
        let color = Color::new(0xa7, 0x1d, 0x5d);
        assert_eq!(color.to_hex(), "#a71d5d");
        assert_eq!(Color::from_hex("#a71d5d"), Some(color));
        assert_eq!(Color::from_hex("a71d5d"), Some(color));
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color::from_hex("#fff"), None);
    }

    #[test]
    fn theme_loads_from_toml() {
        let text = r##"
            [default]
            color = "#222222"

            [rules.keyword]
            color = "#ff0000"
            bold = true

            [rules."constant.numeric"]
            color = "#0000ff"
        "##;
        let theme = Theme::from_toml(text).expect("theme parses");

        let keyword = theme.resolve(&TokenKind::new("keyword.control"));
        assert_eq!(keyword.color, Color::new(0xff, 0x00, 0x00));
        assert!(keyword.bold);

        let number = theme.resolve(&TokenKind::new("constant.numeric.integer"));
        assert_eq!(number.color, Color::new(0x00, 0x00, 0xff));

        let fallback = theme.resolve(&TokenKind::new("text.plain"));
        assert_eq!(fallback.color, Color::new(0x22, 0x22, 0x22));
    }
}
