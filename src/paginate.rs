//! Soft wrapping and pagination.
//!
//! Two passes over the logical lines. The wrap pass splits any line wider
//! than the column capacity: at the last whitespace that fits, or at the
//! fixed fallback column count when the window holds no whitespace at all.
//! Splits land on character boundaries and keep both halves' style, so no
//! run's style boundary ever moves. The fill pass then accumulates visual
//! lines into pages while the next line still fits under the usable height.
//!
//! Wrapping is lossless: concatenating the visual lines of a logical line
//! reconstructs it, and no line is dropped or duplicated by the fill pass.

use crate::document::{Line, StyledRun};
use crate::geometry::PageGeometry;

/// An ordered group of visual lines sharing one output page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 0-based page index.
    pub index: usize,
    pub lines: Vec<Line>,
}

/// Split the line sequence into pages.
///
/// Guarantees: every visual line appears in exactly one page, in order; no
/// page is empty except the single page emitted for an empty document.
pub fn paginate(lines: Vec<Line>, geometry: &PageGeometry) -> Vec<Page> {
    let wrapped = wrap_lines(lines, geometry);

    let usable_height = geometry.usable_height();
    let line_height = geometry.line_height_pt;

    let mut pages: Vec<Page> = Vec::new();
    let mut current: Vec<Line> = Vec::new();

    for line in wrapped {
        let exceeds = (current.len() + 1) as f32 * line_height > usable_height;
        if exceeds && !current.is_empty() {
            pages.push(Page {
                index: pages.len(),
                lines: std::mem::take(&mut current),
            });
        }
        current.push(line);
    }
    if !current.is_empty() || pages.is_empty() {
        pages.push(Page {
            index: pages.len(),
            lines: current,
        });
    }

    pages
}

/// Apply soft wrapping to every line, preserving order.
pub fn wrap_lines(lines: Vec<Line>, geometry: &PageGeometry) -> Vec<Line> {
    let columns = geometry.columns();
    let fallback = geometry.fallback_columns();
    lines
        .into_iter()
        .flat_map(|line| wrap_line(line, columns, fallback))
        .collect()
}

fn wrap_line(line: Line, columns: usize, fallback: usize) -> Vec<Line> {
    // zero capacity means the geometry is degenerate; the renderer rejects it
    if columns == 0 || line.width() <= columns {
        return vec![line];
    }

    let mut parts = Vec::new();
    let mut rest = line;
    while rest.width() > columns {
        // clamp so the split always makes progress and never strands an
        // empty continuation line, even with an oversized fallback override
        let break_at = break_point(&rest, columns, fallback)
            .min(rest.width() - 1)
            .max(1);
        let (head, tail) = split_at_cell(rest, break_at);
        parts.push(head);
        rest = tail;
    }
    parts.push(rest);
    parts
}

/// Pick the cell to split at: after the last whitespace inside the window,
/// or at the fallback column count when the window has none.
fn break_point(line: &Line, columns: usize, fallback: usize) -> usize {
    let mut last_whitespace = None;
    for (cell, c) in line.runs.iter().flat_map(|run| run.text.chars()).enumerate() {
        if cell >= columns {
            break;
        }
        if c.is_whitespace() {
            last_whitespace = Some(cell + 1);
        }
    }
    last_whitespace.unwrap_or(fallback).max(1)
}

/// Split a line at a character cell. The second half is a continuation line.
fn split_at_cell(line: Line, cell: usize) -> (Line, Line) {
    let mut head = Line {
        runs: Vec::new(),
        continued: line.continued,
    };
    let mut tail = Line {
        runs: Vec::new(),
        continued: true,
    };

    let mut seen = 0usize;
    for run in line.runs {
        let len = run.text.chars().count();
        if seen + len <= cell {
            head.runs.push(run);
        } else if seen >= cell {
            tail.runs.push(run);
        } else {
            let split_chars = cell - seen;
            let byte = run
                .text
                .char_indices()
                .nth(split_chars)
                .map(|(i, _)| i)
                .unwrap_or(run.text.len());
            let (a, b) = run.text.split_at(byte);
            if !a.is_empty() {
                head.runs.push(StyledRun {
                    text: a.to_string(),
                    style: run.style,
                });
            }
            if !b.is_empty() {
                tail.runs.push(StyledRun {
                    text: b.to_string(),
                    style: run.style,
                });
            }
        }
        seen += len;
    }

    (head, tail)
}
