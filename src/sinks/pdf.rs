//! PDF sink on top of the `pdf-writer` byte-stream serializer.
//!
//! Each page of the model becomes one PDF page; each visual line sits on a
//! descending baseline inside the margins; each run is shown in the Courier
//! variant matching its bold/italic flags, filled with its resolved color.
//! The base-14 Courier family means no font embedding and a fixed 0.6 em
//! advance, which is the same metric the paginator wrapped against.

use crate::error::{Error, Result};
use crate::geometry::PageGeometry;
use crate::paginate::Page;
use crate::style::Style;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

/// Base-14 font names, indexed by `font_variant`.
const FONT_NAMES: [&[u8]; 4] = [
    b"Courier",
    b"Courier-Bold",
    b"Courier-Oblique",
    b"Courier-BoldOblique",
];

/// Resource names the content streams refer to, same order as `FONT_NAMES`.
const FONT_RESOURCES: [&[u8]; 4] = [b"F0", b"F1", b"F2", b"F3"];

fn font_variant(style: &Style) -> usize {
    match (style.bold, style.italic) {
        (false, false) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (true, true) => 3,
    }
}

/// Serialize the paginated model to PDF bytes.
///
/// The only failure is a degenerate geometry that leaves no printable area;
/// serialization itself is in-memory and infallible.
pub fn render(pages: &[Page], geometry: &PageGeometry) -> Result<Vec<u8>> {
    if geometry.usable_width() <= 0.0
        || geometry.usable_height() <= 0.0
        || geometry.font_size_pt <= 0.0
        || geometry.line_height_pt <= 0.0
    {
        return Err(Error::Render(
            "page geometry leaves no printable area".to_string(),
        ));
    }

    let mut pdf = Pdf::new();
    let mut next_id = 1;
    let mut alloc = || {
        let id = Ref::new(next_id);
        next_id += 1;
        id
    };

    let catalog_id = alloc();
    let page_tree_id = alloc();
    let info_id = alloc();
    let font_ids: [Ref; 4] = [alloc(), alloc(), alloc(), alloc()];
    let page_ids: Vec<Ref> = pages.iter().map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = pages.iter().map(|_| alloc()).collect();

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.document_info(info_id).producer(TextStr("srcprint"));
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(pages.len() as i32);

    for (index, name) in FONT_NAMES.iter().enumerate() {
        pdf.type1_font(font_ids[index])
            .base_font(Name(name))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let media_box = Rect::new(0.0, 0.0, geometry.page_width_pt, geometry.page_height_pt);

    for (page, (&page_id, &content_id)) in
        pages.iter().zip(page_ids.iter().zip(content_ids.iter()))
    {
        let mut writer = pdf.page(page_id);
        writer
            .media_box(media_box)
            .parent(page_tree_id)
            .contents(content_id);
        let mut resources = writer.resources();
        let mut fonts = resources.fonts();
        for (index, resource) in FONT_RESOURCES.iter().enumerate() {
            fonts.pair(Name(resource), font_ids[index]);
        }
        fonts.finish();
        resources.finish();
        writer.finish();

        pdf.stream(content_id, &page_content(page, geometry).finish());
    }

    Ok(pdf.finish())
}

fn page_content(page: &Page, geometry: &PageGeometry) -> Content {
    let mut content = Content::new();
    let top = geometry.page_height_pt - geometry.margin_top_pt;

    for (row, line) in page.lines.iter().enumerate() {
        let baseline = top - (row + 1) as f32 * geometry.line_height_pt;
        let mut x = geometry.margin_left_pt;

        for run in &line.runs {
            if run.text.is_empty() {
                continue;
            }

            content.begin_text();
            content.set_font(
                Name(FONT_RESOURCES[font_variant(&run.style)]),
                geometry.font_size_pt,
            );
            let color = run.style.color;
            content.set_fill_rgb(
                color.r as f32 / 255.0,
                color.g as f32 / 255.0,
                color.b as f32 / 255.0,
            );
            content.next_line(x, baseline);
            content.show(Str(&encode_win_ansi(&run.text)));
            content.end_text();

            x += run.text.chars().count() as f32 * geometry.char_width();
        }
    }

    content
}

/// Encode text for a WinAnsi-encoded base font.
///
/// ASCII and Latin-1 pass through; tabs become a space so the shown glyph
/// count matches the cell count the layout used; anything unencodable shows
/// as `?`. This affects PDF glyphs only, never the document model or TXT
/// output.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            c if (c as u32) < 0x80 => c as u8,
            // 0x80..0x9f holds WinAnsi specials, not Latin-1; skip them
            c if (0xa0..=0xff).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Line, StyledRun};
    use crate::style::Color;

    fn one_page(text: &str) -> Vec<Page> {
        vec![Page {
            index: 0,
            lines: vec![Line {
                runs: vec![StyledRun {
                    text: text.to_string(),
                    style: Style::default(),
                }],
                continued: false,
            }],
        }]
    }

    #[test]
    fn produces_a_pdf_header_and_trailer() {
        let bytes = render(&one_page("hello"), &PageGeometry::default()).expect("renders");
        assert!(bytes.starts_with(b"%PDF-"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(32)..]).to_string();
        assert!(tail.contains("%%EOF"));
    }

    #[test]
    fn emits_one_pdf_page_per_model_page() {
        let pages = vec![
            Page {
                index: 0,
                lines: vec![Line::default()],
            },
            Page {
                index: 1,
                lines: vec![Line::default()],
            },
        ];
        let bytes = render(&pages, &PageGeometry::default()).expect("renders");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 2"));
    }

    #[test]
    fn degenerate_geometry_is_a_render_error() {
        let geometry = PageGeometry {
            margin_left_pt: 400.0,
            margin_right_pt: 400.0,
            ..PageGeometry::default()
        };
        let err = render(&one_page("x"), &geometry).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn variant_selection_covers_the_courier_family() {
        let base = Style::default();
        assert_eq!(font_variant(&base), 0);
        assert_eq!(font_variant(&Style { bold: true, ..base }), 1);
        assert_eq!(
            font_variant(&Style {
                italic: true,
                ..base
            }),
            2
        );
        assert_eq!(
            font_variant(&Style {
                bold: true,
                italic: true,
                ..base
            }),
            3
        );
    }

    #[test]
    fn win_ansi_encoding_degrades_gracefully() {
        assert_eq!(encode_win_ansi("abc"), b"abc".to_vec());
        assert_eq!(encode_win_ansi("a\tb"), b"a b".to_vec());
        assert_eq!(encode_win_ansi("caf\u{e9}"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("\u{1f980}"), vec![b'?']);
    }

    #[test]
    fn colored_runs_set_fill_color() {
        let pages = vec![Page {
            index: 0,
            lines: vec![Line {
                runs: vec![StyledRun {
                    text: "red".to_string(),
                    style: Style::plain(Color::new(255, 0, 0)),
                }],
                continued: false,
            }],
        }];
        // content streams are uncompressed, so the rg operator is visible
        let bytes = render(&pages, &PageGeometry::default()).expect("renders");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("1 0 0 rg"));
    }
}
