//! Text measurement and the plain-text surface
//!
//! The width helpers measure in terminal columns rather than `char`s so CJK
//! and other wide glyphs line up. [`TextSurface`] is the reference surface:
//! it paints each region into a string, which makes it both a usable plain
//! text renderer and the fixture the engine tests assert against.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::column::Alignment;
use crate::paging::PageItem;
use crate::render::{BodyView, HeaderView, PaginationView, Surface};

/// Display width used for columns that set no preferred width.
pub const DEFAULT_COLUMN_WIDTH: usize = 16;

const COLUMN_GAP: &str = "  ";

/// Display width of a string in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncates a string to fit within `max_width` columns, appending `…` when
/// anything was cut. Zero and one column wide results degrade gracefully.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

/// Pads a string with spaces out to `width` columns. Text already at or past
/// the width is returned unchanged.
pub fn pad_to_width(text: &str, width: usize, align: Alignment) -> String {
    let text_width = display_width(text);
    if text_width >= width {
        return text.to_string();
    }
    let pad = width - text_width;
    match align {
        Alignment::Left => format!("{text}{}", " ".repeat(pad)),
        Alignment::Right => format!("{}{text}", " ".repeat(pad)),
        Alignment::Center => {
            let left = pad / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(pad - left))
        }
    }
}

/// A surface that renders each region as plain text.
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    header: String,
    body: String,
    pagination: String,
    widths: Vec<usize>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The header region as last painted.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// The body region as last painted.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The pagination region as last painted.
    pub fn pagination(&self) -> &str {
        &self.pagination
    }

    /// All non-empty regions joined with newlines.
    pub fn output(&self) -> String {
        [&self.header, &self.body, &self.pagination]
            .iter()
            .filter(|region| !region.is_empty())
            .map(|region| region.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn column_width(&self, index: usize) -> usize {
        self.widths.get(index).copied().unwrap_or(DEFAULT_COLUMN_WIDTH)
    }
}

impl Surface for TextSurface {
    fn paint_header(&mut self, header: &HeaderView) {
        self.widths = header
            .cells
            .iter()
            .map(|cell| cell.width.map_or(DEFAULT_COLUMN_WIDTH, usize::from))
            .collect();

        let labels: Vec<String> = header
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let label = match cell.indicator {
                    Some(indicator) => format!("{} {}", cell.label, indicator.glyph()),
                    None => cell.label.clone(),
                };
                let width = self.column_width(i);
                pad_to_width(&truncate_to_width(&label, width), width, cell.align)
            })
            .collect();

        let row = labels.join(COLUMN_GAP);
        let rule = "-".repeat(display_width(&row));
        self.header = format!("{row}\n{rule}");
    }

    fn paint_body(&mut self, body: &BodyView) {
        if let Some(empty) = &body.empty {
            self.body = empty.message.clone();
            return;
        }

        let lines: Vec<String> = body
            .rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        let width = self.column_width(i);
                        pad_to_width(&truncate_to_width(&cell.text, width), width, cell.align)
                    })
                    .collect::<Vec<_>>()
                    .join(COLUMN_GAP)
            })
            .collect();
        self.body = lines.join("\n");
    }

    fn paint_pagination(&mut self, pagination: &PaginationView) {
        if !pagination.visible {
            self.pagination.clear();
            return;
        }

        let strip: Vec<String> = pagination
            .items
            .iter()
            .map(|item| match item {
                PageItem::Page(n) if *n == pagination.current_page => format!("[{n}]"),
                PageItem::Page(n) => n.to_string(),
                PageItem::Ellipsis => "…".to_string(),
            })
            .collect();

        let prev = if pagination.prev_enabled { "<prev>" } else { "-prev-" };
        let next = if pagination.next_enabled { "<next>" } else { "-next-" };
        let counts = if pagination.total == 0 {
            "0 of 0".to_string()
        } else {
            format!(
                "{}-{} of {}",
                pagination.start, pagination.end, pagination.total
            )
        };

        self.pagination = format!("{prev}  {}  {next}  {counts}", strip.join(" "));
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_counts_columns() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width(""), 0);
        // Wide characters take two columns.
        assert_eq!(display_width("停电"), 4);
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 8), "hello w…");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn test_pad_respects_alignment() {
        assert_eq!(pad_to_width("ab", 5, Alignment::Left), "ab   ");
        assert_eq!(pad_to_width("ab", 5, Alignment::Right), "   ab");
        assert_eq!(pad_to_width("ab", 6, Alignment::Center), "  ab  ");
        assert_eq!(pad_to_width("abcdef", 3, Alignment::Left), "abcdef");
    }
}
