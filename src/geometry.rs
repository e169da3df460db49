//! Page geometry configuration.
//!
//! All measurements are in PostScript points (1 pt = 1/72 in). Defaults are US
//! Letter with one-inch margins and 10 pt monospace body text. The derived
//! column/row capacities drive soft wrapping and pagination; they assume the
//! fixed Courier advance of 0.6 em, so the math needs no font file at all.

use serde::{Deserialize, Serialize};

/// Fixed advance of the Courier family, in ems (600/1000 units).
pub const MONOSPACE_ADVANCE: f32 = 0.6;

const POINTS_PER_INCH: f32 = 72.0;

/// Page measurements governing layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    #[serde(default = "default_page_width")]
    pub page_width_pt: f32,
    #[serde(default = "default_page_height")]
    pub page_height_pt: f32,
    #[serde(default = "default_margin")]
    pub margin_top_pt: f32,
    #[serde(default = "default_margin")]
    pub margin_bottom_pt: f32,
    #[serde(default = "default_margin")]
    pub margin_left_pt: f32,
    #[serde(default = "default_margin")]
    pub margin_right_pt: f32,
    #[serde(default = "default_font_size")]
    pub font_size_pt: f32,
    #[serde(default = "default_line_height")]
    pub line_height_pt: f32,
    /// Hard-split column count for lines with no whitespace break point.
    /// Defaults to the computed column capacity.
    #[serde(default)]
    pub wrap_fallback_columns: Option<usize>,
}

fn default_page_width() -> f32 {
    8.5 * POINTS_PER_INCH
}
fn default_page_height() -> f32 {
    11.0 * POINTS_PER_INCH
}
fn default_margin() -> f32 {
    POINTS_PER_INCH
}
fn default_font_size() -> f32 {
    10.0
}
fn default_line_height() -> f32 {
    12.0
}

impl Default for PageGeometry {
    fn default() -> PageGeometry {
        PageGeometry::letter()
    }
}

impl PageGeometry {
    /// US Letter (8.5 × 11 in), one-inch margins.
    pub fn letter() -> PageGeometry {
        PageGeometry {
            page_width_pt: default_page_width(),
            page_height_pt: default_page_height(),
            margin_top_pt: default_margin(),
            margin_bottom_pt: default_margin(),
            margin_left_pt: default_margin(),
            margin_right_pt: default_margin(),
            font_size_pt: default_font_size(),
            line_height_pt: default_line_height(),
            wrap_fallback_columns: None,
        }
    }

    /// ISO A4 (210 × 297 mm), one-inch margins.
    pub fn a4() -> PageGeometry {
        PageGeometry {
            page_width_pt: 595.0,
            page_height_pt: 842.0,
            ..PageGeometry::letter()
        }
    }

    /// Width available for text between the side margins.
    pub fn usable_width(&self) -> f32 {
        self.page_width_pt - self.margin_left_pt - self.margin_right_pt
    }

    /// Height available for text between the top and bottom margins.
    pub fn usable_height(&self) -> f32 {
        self.page_height_pt - self.margin_top_pt - self.margin_bottom_pt
    }

    /// Advance width of one character cell at the configured font size.
    pub fn char_width(&self) -> f32 {
        self.font_size_pt * MONOSPACE_ADVANCE
    }

    /// How many character cells fit on one line. Zero when the margins leave
    /// no room.
    pub fn columns(&self) -> usize {
        let width = self.usable_width();
        if width <= 0.0 || self.char_width() <= 0.0 {
            return 0;
        }
        (width / self.char_width()).floor() as usize
    }

    /// How many lines fit on one page.
    pub fn rows(&self) -> usize {
        let height = self.usable_height();
        if height <= 0.0 || self.line_height_pt <= 0.0 {
            return 0;
        }
        (height / self.line_height_pt).floor() as usize
    }

    /// Column count used for the no-whitespace hard split.
    pub fn fallback_columns(&self) -> usize {
        self.wrap_fallback_columns
            .unwrap_or_else(|| self.columns())
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_defaults() {
        let geometry = PageGeometry::default();
        assert_eq!(geometry.page_width_pt, 612.0);
        assert_eq!(geometry.page_height_pt, 792.0);
        assert_eq!(geometry.usable_width(), 468.0);
        assert_eq!(geometry.usable_height(), 648.0);
    }

    #[test]
    fn capacity_math() {
        let geometry = PageGeometry::default();
        // 468pt / (10pt * 0.6) = 78 columns
        assert_eq!(geometry.columns(), 78);
        // 648pt / 12pt = 54 rows
        assert_eq!(geometry.rows(), 54);
    }

    #[test]
    fn degenerate_margins_give_zero_capacity() {
        let geometry = PageGeometry {
            margin_left_pt: 400.0,
            margin_right_pt: 400.0,
            ..PageGeometry::letter()
        };
        assert_eq!(geometry.columns(), 0);
    }

    #[test]
    fn fallback_columns_prefers_the_override() {
        let geometry = PageGeometry {
            wrap_fallback_columns: Some(40),
            ..PageGeometry::letter()
        };
        assert_eq!(geometry.fallback_columns(), 40);
        assert_eq!(PageGeometry::letter().fallback_columns(), 78);
    }

    #[test]
    fn geometry_deserializes_with_defaults() {
        let geometry: PageGeometry = toml::from_str("font_size_pt = 8.0").expect("parses");
        assert_eq!(geometry.font_size_pt, 8.0);
        assert_eq!(geometry.page_width_pt, 612.0);
        assert_eq!(geometry.wrap_fallback_columns, None);
    }
}
