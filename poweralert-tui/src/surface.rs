//! Terminal painting
//!
//! [`TerminalSession`] owns the mode switch: raw mode and the alternate
//! screen go on when it is created and are restored when it drops, crash or
//! not. [`TermSurface`] is the painter the grid drives. Regions live at
//! fixed rows (header on top, body below it, pagination under the last row,
//! status on the bottom line) and every paint rewrites its region wholesale.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::error;
use poweralert_grid::text::{DEFAULT_COLUMN_WIDTH, pad_to_width, truncate_to_width};
use poweralert_grid::{
    BodyView, EmptyKind, HeaderView, PageItem, PaginationView, SortIndicator, Surface,
};

const BODY_TOP: u16 = 2;
const COLUMN_GAP: &str = "  ";

/// Raw-mode guard. Restores the terminal on drop.
pub struct TerminalSession;

impl TerminalSession {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Paints grid regions onto the terminal. Expects an active
/// [`TerminalSession`]; it does not manage terminal modes itself.
pub struct TermSurface {
    stdout: Stdout,
    widths: Vec<usize>,
    cursor: Option<usize>,
    selected_column: usize,
    body_rows: u16,
    pagination_row: u16,
}

impl TermSurface {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            widths: Vec::new(),
            cursor: None,
            selected_column: 0,
            body_rows: 0,
            // Seeded on a line the first body paint always rewrites.
            pagination_row: BODY_TOP,
        }
    }

    /// Row of the current page the cursor highlight sits on.
    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor;
    }

    /// Column the keyboard column selection points at.
    pub fn set_selected_column(&mut self, column: usize) {
        self.selected_column = column;
    }

    /// Writes the status line on the bottom row of the terminal.
    pub fn paint_status(&mut self, text: &str) {
        if let Err(e) = self.draw_status(text) {
            error!("status paint failed: {e}");
        }
    }

    fn column_width(&self, index: usize) -> usize {
        self.widths.get(index).copied().unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    fn draw_header(&mut self, header: &HeaderView) -> io::Result<()> {
        queue!(self.stdout, MoveTo(0, 0), Clear(ClearType::CurrentLine))?;
        for (index, cell) in header.cells.iter().enumerate() {
            let width = self.column_width(index);
            let label = match cell.indicator {
                Some(indicator) => format!("{} {}", cell.label, indicator.glyph()),
                None => cell.label.clone(),
            };
            let text = pad_to_width(&truncate_to_width(&label, width), width, cell.align);

            queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            if index == self.selected_column {
                queue!(self.stdout, SetAttribute(Attribute::Underlined))?;
            }
            let sorted = matches!(cell.indicator, Some(i) if i != SortIndicator::Neutral);
            if sorted {
                queue!(self.stdout, SetForegroundColor(Color::Cyan))?;
            }
            queue!(
                self.stdout,
                Print(&text),
                SetAttribute(Attribute::Reset),
                ResetColor,
                Print(COLUMN_GAP)
            )?;
        }

        let rule_width = header
            .cells
            .iter()
            .enumerate()
            .map(|(i, _)| self.column_width(i) + COLUMN_GAP.len())
            .sum::<usize>()
            .saturating_sub(COLUMN_GAP.len());
        queue!(
            self.stdout,
            MoveTo(0, 1),
            Clear(ClearType::CurrentLine),
            SetAttribute(Attribute::Dim),
            Print("-".repeat(rule_width)),
            SetAttribute(Attribute::Reset)
        )?;
        self.stdout.flush()
    }

    fn draw_body(&mut self, body: &BodyView) -> io::Result<()> {
        let previous = self.body_rows;

        if let Some(empty) = &body.empty {
            queue!(self.stdout, MoveTo(0, BODY_TOP), Clear(ClearType::CurrentLine))?;
            let color = match empty.kind {
                EmptyKind::Error => Color::Red,
                EmptyKind::NoData | EmptyKind::NoMatches => Color::DarkGrey,
            };
            queue!(
                self.stdout,
                SetForegroundColor(color),
                Print(&empty.message),
                ResetColor
            )?;
            self.body_rows = 1;
        } else {
            for (row_index, row) in body.rows.iter().enumerate() {
                queue!(
                    self.stdout,
                    MoveTo(0, BODY_TOP + row_index as u16),
                    Clear(ClearType::CurrentLine)
                )?;
                if self.cursor == Some(row_index) {
                    queue!(self.stdout, SetAttribute(Attribute::Reverse))?;
                }
                for (cell_index, cell) in row.cells.iter().enumerate() {
                    let width = self.column_width(cell_index);
                    let text =
                        pad_to_width(&truncate_to_width(&cell.text, width), width, cell.align);
                    if let Some(color) = cell.class.as_deref().and_then(class_color) {
                        queue!(self.stdout, SetForegroundColor(color))?;
                    }
                    queue!(self.stdout, Print(&text), ResetColor, Print(COLUMN_GAP))?;
                }
                queue!(self.stdout, SetAttribute(Attribute::Reset))?;
            }
            self.body_rows = body.rows.len() as u16;
        }

        // Clear lines a longer previous page left behind.
        for row in self.body_rows..previous {
            queue!(
                self.stdout,
                MoveTo(0, BODY_TOP + row),
                Clear(ClearType::CurrentLine)
            )?;
        }
        self.stdout.flush()
    }

    fn draw_pagination(&mut self, pagination: &PaginationView) -> io::Result<()> {
        let row = BODY_TOP + self.body_rows + 1;
        if let Some(stale) = stale_pagination_row(self.pagination_row, row, self.body_rows) {
            queue!(self.stdout, MoveTo(0, stale), Clear(ClearType::CurrentLine))?;
        }
        self.pagination_row = row;
        queue!(self.stdout, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
        if !pagination.visible {
            return self.stdout.flush();
        }

        let prev_attr = if pagination.prev_enabled {
            Attribute::Reset
        } else {
            Attribute::Dim
        };
        queue!(
            self.stdout,
            SetAttribute(prev_attr),
            Print("‹ prev"),
            SetAttribute(Attribute::Reset),
            Print("  ")
        )?;

        for item in &pagination.items {
            match item {
                PageItem::Page(n) if *n == pagination.current_page => {
                    queue!(
                        self.stdout,
                        SetAttribute(Attribute::Bold),
                        SetForegroundColor(Color::Cyan),
                        Print(format!("[{n}]")),
                        SetAttribute(Attribute::Reset),
                        ResetColor
                    )?;
                }
                PageItem::Page(n) => queue!(self.stdout, Print(n.to_string()))?,
                PageItem::Ellipsis => {
                    queue!(
                        self.stdout,
                        SetAttribute(Attribute::Dim),
                        Print("…"),
                        SetAttribute(Attribute::Reset)
                    )?;
                }
            }
            queue!(self.stdout, Print(" "))?;
        }

        let next_attr = if pagination.next_enabled {
            Attribute::Reset
        } else {
            Attribute::Dim
        };
        let counts = if pagination.total == 0 {
            "0 of 0".to_string()
        } else {
            format!(
                "{}-{} of {}",
                pagination.start, pagination.end, pagination.total
            )
        };
        queue!(
            self.stdout,
            SetAttribute(next_attr),
            Print(" next ›"),
            SetAttribute(Attribute::Reset),
            SetAttribute(Attribute::Dim),
            Print(format!("   {counts}")),
            SetAttribute(Attribute::Reset)
        )?;
        self.stdout.flush()
    }

    fn draw_status(&mut self, text: &str) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        queue!(
            self.stdout,
            MoveTo(0, height.saturating_sub(1)),
            Clear(ClearType::CurrentLine),
            SetAttribute(Attribute::Dim),
            Print(truncate_to_width(text, width as usize)),
            SetAttribute(Attribute::Reset)
        )?;
        self.stdout.flush()
    }
}

impl Default for TermSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TermSurface {
    fn paint_header(&mut self, header: &HeaderView) {
        self.widths = header
            .cells
            .iter()
            .map(|cell| cell.width.map_or(DEFAULT_COLUMN_WIDTH, usize::from))
            .collect();
        if let Err(e) = self.draw_header(header) {
            error!("header paint failed: {e}");
        }
    }

    fn paint_body(&mut self, body: &BodyView) {
        if let Err(e) = self.draw_body(body) {
            error!("body paint failed: {e}");
        }
    }

    fn paint_pagination(&mut self, pagination: &PaginationView) {
        if let Err(e) = self.draw_pagination(pagination) {
            error!("pagination paint failed: {e}");
        }
    }
}

/// Maps a cell's style class to a terminal color.
fn class_color(class: &str) -> Option<Color> {
    match class {
        "ok" => Some(Color::Green),
        "warn" => Some(Color::Yellow),
        "alert" => Some(Color::Red),
        "muted" => Some(Color::DarkGrey),
        _ => None,
    }
}

/// Previous frame's pagination line, if nothing painted this frame covers
/// it. Lines inside the just-painted body are already overwritten and must
/// be left alone.
fn stale_pagination_row(previous: u16, row: u16, body_rows: u16) -> Option<u16> {
    if previous != row && previous >= BODY_TOP + body_rows {
        Some(previous)
    } else {
        None
    }
}
