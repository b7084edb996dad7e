//! Application state and the event loop
//!
//! One grid is alive at a time. Switching pages rebuilds it with that page's
//! columns and data; everything else is key dispatch onto the engine plus a
//! status line reflecting what the engine reports back.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, error, info};
use poweralert_grid::{Direction, FilterSet, FilterValue, Grid, GridError, GridOptions};
use poweralert_model::{EnvelopeError, Record};
use thiserror::Error;

use crate::cli::Cli;
use crate::data;
use crate::notify;
use crate::pages::PageKind;
use crate::surface::{TermSurface, TerminalSession};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

enum Flow {
    Continue,
    Quit,
}

/// Loads the startup page, takes over the terminal and runs the event loop
/// until the operator quits.
pub fn run(cli: Cli) -> Result<(), AppError> {
    // Load before touching terminal modes so startup errors print normally.
    let records = data::load_records(&cli.data_dir, cli.page)?;
    let _session = TerminalSession::new()?;
    App::new(cli, records)?.event_loop()
}

struct App {
    grid: Grid<TermSurface>,
    page: PageKind,
    data_dir: PathBuf,
    selected_column: usize,
    cursor: usize,
    query: String,
    search_mode: bool,
    status_filter: Option<&'static str>,
    detail: Arc<Mutex<Option<Record>>>,
}

impl App {
    fn new(cli: Cli, records: Vec<Record>) -> Result<Self, AppError> {
        let detail = Arc::new(Mutex::new(None));
        let grid = build_grid(cli.page, records, cli.page_size, &detail)?;
        info!("opened {} page", cli.page.title());
        Ok(Self {
            grid,
            page: cli.page,
            data_dir: cli.data_dir,
            selected_column: 0,
            cursor: 0,
            query: String::new(),
            search_mode: false,
            status_filter: None,
            detail,
        })
    }

    fn event_loop(mut self) -> Result<(), AppError> {
        self.repaint();
        loop {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    match self.handle_key(key) {
                        Flow::Quit => break,
                        Flow::Continue => self.repaint(),
                    }
                }
                Event::Resize(_, _) => self.repaint(),
                _ => {}
            }
        }
        info!("shutting down");
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if self.search_mode {
            return self.handle_search_key(key);
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Flow::Quit;
            }
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Esc => {
                // Esc peels filters off first; quitting takes a second press.
                if !self.query.is_empty() || self.status_filter.is_some() {
                    self.query.clear();
                    self.status_filter = None;
                    self.apply_filters();
                } else {
                    return Flow::Quit;
                }
            }
            KeyCode::Char('/') => {
                self.search_mode = true;
            }
            KeyCode::Char('f') => self.cycle_status_filter(),
            KeyCode::Tab => self.switch_page(),
            KeyCode::Char('r') => self.load(),
            KeyCode::Down | KeyCode::Char('j') => {
                let rows = self.grid.page_rows();
                if rows > 0 {
                    self.cursor = (self.cursor + 1).min(rows - 1);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let last = self.grid.columns().len() - 1;
                self.selected_column = (self.selected_column + 1).min(last);
            }
            KeyCode::Char('s') => {
                if let Some(sort) = self.grid.click_header(self.selected_column) {
                    debug!("sorting column {} {:?}", sort.column, sort.direction);
                }
            }
            KeyCode::Char('c') => self.grid.clear_sort(),
            KeyCode::Char('n') | KeyCode::PageDown => {
                self.grid.next_page();
                self.cursor = 0;
            }
            KeyCode::Char('p') | KeyCode::PageUp => {
                self.grid.previous_page();
                self.cursor = 0;
            }
            KeyCode::Char(digit @ '1'..='9') => {
                let page = digit as usize - '0' as usize;
                if self.grid.go_to_page(page) {
                    self.cursor = 0;
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.resize_page(self.grid.state().page_size + 5);
            }
            KeyCode::Char('-') => {
                let current = self.grid.state().page_size;
                self.resize_page(current.saturating_sub(5).max(5));
            }
            KeyCode::Enter => {
                if self.grid.click_row(self.cursor) {
                    debug!("row {} activated", self.cursor);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc => {
                self.search_mode = false;
                self.query.clear();
                self.apply_filters();
            }
            KeyCode::Enter => {
                self.search_mode = false;
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.apply_filters();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
                self.apply_filters();
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Rebuilds the filter set from the live search and status quick-filter.
    fn apply_filters(&mut self) {
        let mut filters = FilterSet::new();
        if !self.query.is_empty() {
            filters.insert(self.page.search_field(), FilterValue::text(self.query.clone()));
        }
        if let Some(status) = self.status_filter {
            filters.insert("status", FilterValue::equals(status));
        }
        self.grid.update_filters(filters);
        self.cursor = 0;
    }

    fn cycle_status_filter(&mut self) {
        let Some(values) = self.page.status_values() else {
            return;
        };
        self.status_filter = match self.status_filter {
            None => values.first().copied(),
            Some(current) => values
                .iter()
                .position(|v| *v == current)
                .and_then(|i| values.get(i + 1))
                .copied(),
        };
        self.apply_filters();
    }

    fn switch_page(&mut self) {
        let next = self.page.next();
        let page_size = self.grid.state().page_size;
        match build_grid(next, Vec::new(), page_size, &self.detail) {
            Ok(grid) => {
                self.grid = grid;
                self.page = next;
                self.query.clear();
                self.search_mode = false;
                self.status_filter = None;
                self.selected_column = 0;
                if let Ok(mut slot) = self.detail.lock() {
                    *slot = None;
                }
                info!("switched to {} page", next.title());
                self.load();
            }
            Err(e) => error!("cannot open {} page: {e}", next.title()),
        }
    }

    /// Loads the current page's file, feeding failures into the grid's error
    /// state instead of tearing the console down.
    fn load(&mut self) {
        match data::load_records(&self.data_dir, self.page) {
            Ok(records) => {
                info!("loaded {} {} records", records.len(), self.page.title());
                self.grid.update_data(records);
            }
            Err(e) => {
                error!("load failed: {e}");
                self.grid.show_error(e.to_string());
            }
        }
        self.cursor = 0;
    }

    fn resize_page(&mut self, page_size: usize) {
        if page_size != self.grid.state().page_size {
            if let Err(e) = self.grid.set_page_size(page_size) {
                error!("page size change refused: {e}");
            }
            self.cursor = 0;
        }
    }

    /// Full repaint: clamp the cursor, push selection state into the
    /// surface, render, and refresh the status line.
    fn repaint(&mut self) {
        let rows = self.grid.page_rows();
        self.cursor = if rows == 0 { 0 } else { self.cursor.min(rows - 1) };
        let cursor = if rows == 0 { None } else { Some(self.cursor) };
        let column = self.selected_column;
        let surface = self.grid.surface_mut();
        surface.set_cursor(cursor);
        surface.set_selected_column(column);
        self.grid.render();

        let status = self.status_line();
        self.grid.surface_mut().paint_status(&status);
    }

    fn status_line(&self) -> String {
        if self.search_mode {
            return format!("search {}: {}_", self.page.search_field(), self.query);
        }

        let state = self.grid.state();
        let mut parts = vec![
            self.page.title().to_string(),
            format!("{}/{} match", state.matching, state.records),
        ];
        if let Some(status) = self.status_filter {
            parts.push(format!("status={status}"));
        }
        if let Some(sort) = state.sort {
            let name = self
                .grid
                .columns()
                .get(sort.column)
                .map_or("?", |c| c.header());
            let way = match sort.direction {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            parts.push(format!("sort {name} {way}"));
        }
        let column = self
            .grid
            .columns()
            .get(self.selected_column)
            .map_or("?", |c| c.header());
        parts.push(format!("col {column}"));

        let detail = self
            .detail
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
            .map(|record| notify::record_summary(self.page, &record));
        match detail {
            Some(summary) => parts.push(summary),
            None => parts.push(
                "tab:page /:search f:status s:sort c:clear r:reload enter:open q:quit".to_string(),
            ),
        }
        parts.join(" | ")
    }
}

fn build_grid(
    page: PageKind,
    records: Vec<Record>,
    page_size: usize,
    detail: &Arc<Mutex<Option<Record>>>,
) -> Result<Grid<TermSurface>, GridError> {
    let sink = Arc::clone(detail);
    let title = page.title().to_lowercase();
    let options = GridOptions::new(page.columns())
        .data(records)
        .page_size(page_size)
        .empty_state(move || format!("No {title} on record"))
        .error_state(|| "Data load failed. Press r to retry.".to_string())
        .on_row_click(move |record| {
            if let Ok(mut slot) = sink.lock() {
                *slot = Some(record.clone());
            }
        });
    Grid::new(options, TermSurface::new())
}
