//! Plain-text sink.
//!
//! Discards all style information and re-emits the original text. Pagination
//! is ignored: continuation lines inserted by soft wrapping are joined back
//! without a separator, so the output is the logical line sequence.
//!
//! Trailing-newline normalization rule (the one place it is stated): a
//! non-empty body always ends with exactly one `\n`; an empty document
//! produces a zero-length body.

use crate::paginate::Page;

/// Re-serialize the paginated model as plain text.
pub fn render(pages: &[Page]) -> String {
    let mut out = String::new();
    let mut first = true;

    for line in pages.iter().flat_map(|page| &page.lines) {
        if !first && !line.continued {
            out.push('\n');
        }
        for run in &line.runs {
            out.push_str(&run.text);
        }
        first = false;
    }

    if !out.is_empty() {
        out.push('\n');
    }
    out
}
