//! The grid engine
//!
//! A [`Grid`] owns one table end to end: the record collection, column
//! descriptors, active filters, sort state, pagination cursor, and the
//! surface it paints on. Mutators recompute the derived row set and repaint;
//! nothing is cached between passes, so a grid can always be re-rendered
//! from its current state alone.

use log::{debug, error};
use poweralert_model::Record;

use crate::column::Column;
use crate::display::{self, DateFormatter, default_date_formatter};
use crate::error::GridError;
use crate::filter::FilterSet;
use crate::paging::{DEFAULT_PAGE_SIZE, Pager, page_items};
use crate::render::{
    BodyView, CellView, EmptyKind, EmptyView, HeaderCell, HeaderView, PaginationView, RowView,
    SortIndicator, Surface,
};
use crate::sort::{Direction, SortState, compare_values};

/// Callback producing placeholder text for an empty or errored body.
pub type StateMessage = Box<dyn Fn() -> String + Send + Sync>;

/// Callback fired when a body row is activated.
pub type RowClick = Box<dyn FnMut(&Record) + Send>;

/// Configuration for [`Grid::new`].
///
/// Only columns are mandatory. Everything else has a sensible default: no
/// data, no filters, ten rows per page, unsorted.
pub struct GridOptions {
    columns: Vec<Column>,
    data: Vec<Record>,
    filters: FilterSet,
    page_size: usize,
    sort: Option<SortState>,
    date_format: DateFormatter,
    empty_state: Option<StateMessage>,
    error_state: Option<StateMessage>,
    row_click: Option<RowClick>,
}

impl GridOptions {
    /// Starts a configuration with the given columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            data: Vec::new(),
            filters: FilterSet::new(),
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            date_format: default_date_formatter(),
            empty_state: None,
            error_state: None,
            row_click: None,
        }
    }

    /// Sets the initial record collection.
    pub fn data(mut self, data: Vec<Record>) -> Self {
        self.data = data;
        self
    }

    /// Sets the initial filters.
    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    /// Sets rows per page. Zero is rejected by [`Grid::new`].
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the initial sort.
    pub fn sort(mut self, column: usize, direction: Direction) -> Self {
        self.sort = Some(SortState::new(column, direction));
        self
    }

    /// Replaces the grid-wide date formatter.
    pub fn date_format(mut self, format: DateFormatter) -> Self {
        self.date_format = format;
        self
    }

    /// Sets the placeholder text callback for an empty collection.
    pub fn empty_state<F>(mut self, message: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.empty_state = Some(Box::new(message));
        self
    }

    /// Sets the placeholder text callback for the error state.
    pub fn error_state<F>(mut self, message: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.error_state = Some(Box::new(message));
        self
    }

    /// Registers a row activation callback.
    pub fn on_row_click<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&Record) + Send + 'static,
    {
        self.row_click = Some(Box::new(handler));
        self
    }
}

/// Snapshot of a grid's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridState {
    /// Records in the collection.
    pub records: usize,
    /// Records that pass the active filters.
    pub matching: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub sort: Option<SortState>,
}

/// A data grid bound to a render surface.
pub struct Grid<S: Surface> {
    surface: S,
    columns: Vec<Column>,
    data: Vec<Record>,
    filters: FilterSet,
    sort: Option<SortState>,
    pager: Pager,
    /// Indices into `data` that pass the filters, in display order.
    filtered: Vec<usize>,
    error: Option<String>,
    date_format: DateFormatter,
    empty_state: Option<StateMessage>,
    error_state: Option<StateMessage>,
    row_click: Option<RowClick>,
}

impl<S: Surface> Grid<S> {
    /// Builds a grid from options and a surface.
    ///
    /// The derived row set is computed immediately but nothing is painted
    /// until the first [`render`](Self::render) call. Configuration mistakes
    /// are refused here rather than rendering a broken table.
    pub fn new(options: GridOptions, surface: S) -> Result<Self, GridError> {
        let GridOptions {
            columns,
            data,
            filters,
            page_size,
            sort,
            date_format,
            empty_state,
            error_state,
            row_click,
        } = options;

        if columns.is_empty() {
            let err = GridError::NoColumns;
            error!("{err}");
            return Err(err);
        }
        if page_size == 0 {
            let err = GridError::invalid_page_size(page_size);
            error!("{err}");
            return Err(err);
        }
        if let Some(sort) = sort {
            if sort.column >= columns.len() {
                let err = GridError::column_out_of_range(sort.column, columns.len());
                error!("{err}");
                return Err(err);
            }
        }

        let mut grid = Self {
            surface,
            columns,
            data,
            filters,
            sort,
            pager: Pager::new(page_size),
            filtered: Vec::new(),
            error: None,
            date_format,
            empty_state,
            error_state,
            row_click,
        };
        grid.refresh();
        debug!(
            "grid created: {} columns, {} records",
            grid.columns.len(),
            grid.data.len()
        );
        Ok(grid)
    }

    /// Recomputes the derived row set and repaints every region.
    pub fn render(&mut self) {
        self.refresh();
        let header = self.build_header();
        self.surface.paint_header(&header);
        self.paint_rows();
        debug!(
            "rendered page {}/{}, {} of {} records match",
            self.pager.current_page(),
            self.pager.total_pages(self.filtered.len()),
            self.filtered.len(),
            self.data.len()
        );
    }

    /// Replaces the record collection, clears any error state, snaps back to
    /// page 1 and repaints.
    pub fn update_data(&mut self, data: Vec<Record>) {
        debug!("data replaced: {} records", data.len());
        self.data = data;
        self.error = None;
        self.pager.reset();
        self.render();
    }

    /// Replaces the whole filter set, snaps back to page 1 and repaints.
    pub fn update_filters(&mut self, filters: FilterSet) {
        debug!("filters replaced: {} active", filters.active_count());
        self.filters = filters;
        self.pager.reset();
        self.render();
    }

    /// Changes rows per page, snaps back to page 1 and repaints.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), GridError> {
        if page_size == 0 {
            let err = GridError::invalid_page_size(page_size);
            error!("{err}");
            return Err(err);
        }
        self.pager.set_size(page_size);
        self.pager.reset();
        self.render();
        Ok(())
    }

    /// Sorts by a column. The current page is kept, so a sort can reshuffle
    /// which records the open page shows.
    pub fn set_sort(&mut self, column: usize, direction: Direction) -> Result<(), GridError> {
        if column >= self.columns.len() {
            let err = GridError::column_out_of_range(column, self.columns.len());
            error!("{err}");
            return Err(err);
        }
        self.sort = Some(SortState::new(column, direction));
        self.render();
        Ok(())
    }

    /// Drops the sort, restoring insertion order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.render();
    }

    /// Header activation: first click sorts ascending, clicking the active
    /// sort column again flips direction. Returns the new sort state, or
    /// `None` when the column is unknown or not sortable.
    pub fn click_header(&mut self, column: usize) -> Option<SortState> {
        let sortable = self
            .columns
            .get(column)
            .is_some_and(Column::is_sortable);
        if !sortable {
            return None;
        }
        let next = match self.sort {
            Some(current) if current.column == column => {
                SortState::new(column, current.direction.toggle())
            }
            _ => SortState::new(column, Direction::Asc),
        };
        self.sort = Some(next);
        self.render();
        Some(next)
    }

    /// Jumps to a 1-indexed page and repaints the body and pagination
    /// regions. Out-of-range pages are ignored and `false` is returned.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let total_pages = self.pager.total_pages(self.filtered.len());
        if page < 1 || page > total_pages {
            debug!("page {page} outside 1..={total_pages}, ignoring");
            return false;
        }
        self.pager.set_page(page);
        self.paint_rows();
        true
    }

    /// Steps one page back when possible.
    pub fn previous_page(&mut self) -> bool {
        self.go_to_page(self.pager.current_page().wrapping_sub(1))
    }

    /// Steps one page forward when possible.
    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.pager.current_page() + 1)
    }

    /// Puts the grid into an error state: the body shows the error
    /// placeholder and pagination clears. The state persists until the next
    /// [`update_data`](Self::update_data).
    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("grid entering error state: {message}");
        self.error = Some(message);
        self.paint_rows();
    }

    /// Fires the row activation callback for a row of the current page,
    /// `row` counted from the top of the page. Returns whether a callback
    /// fired.
    pub fn click_row(&mut self, row: usize) -> bool {
        let Some(index) = self.visible_index(row) else {
            return false;
        };
        let Some(mut handler) = self.row_click.take() else {
            return false;
        };
        handler(&self.data[index]);
        self.row_click = Some(handler);
        true
    }

    /// The record shown at `row` of the current page, if any.
    pub fn record_at(&self, row: usize) -> Option<&Record> {
        self.visible_index(row).map(|index| &self.data[index])
    }

    /// Number of rows on the current page.
    pub fn page_rows(&self) -> usize {
        if self.error.is_some() {
            return 0;
        }
        self.pager.window(self.filtered.len()).len()
    }

    /// Snapshot of counts, cursor and sort.
    pub fn state(&self) -> GridState {
        GridState {
            records: self.data.len(),
            matching: self.filtered.len(),
            current_page: self.pager.current_page(),
            page_size: self.pager.page_size(),
            total_pages: self.pager.total_pages(self.filtered.len()),
            sort: self.sort,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.data
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the grid, returning its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Rebuilds `filtered`: filter pass over insertion order, then a stable
    /// sort, so records that compare equal keep their relative order.
    fn refresh(&mut self) {
        self.filtered = (0..self.data.len())
            .filter(|&index| self.filters.matches(&self.data[index]))
            .collect();

        if let Some(sort) = self.sort {
            let column = &self.columns[sort.column];
            let mut keyed: Vec<_> = self
                .filtered
                .iter()
                .map(|&index| (index, column.value_of(&self.data[index])))
                .collect();
            keyed.sort_by(|(_, a), (_, b)| {
                sort.direction.apply(compare_values(a.as_ref(), b.as_ref()))
            });
            self.filtered = keyed.into_iter().map(|(index, _)| index).collect();
        }
    }

    /// Repaints the body and pagination regions from current state.
    fn paint_rows(&mut self) {
        let body = self.build_body();
        let pagination = self.build_pagination();
        self.surface.paint_body(&body);
        self.surface.paint_pagination(&pagination);
    }

    /// Resolves a row of the current page to an index into `data`. Rows are
    /// not visible while the error state is up.
    fn visible_index(&self, row: usize) -> Option<usize> {
        if self.error.is_some() {
            return None;
        }
        let window = self.pager.window(self.filtered.len());
        let absolute = window.start.checked_add(row)?;
        if absolute >= window.end {
            return None;
        }
        Some(self.filtered[absolute])
    }

    fn build_header(&self) -> HeaderView {
        let cells = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| HeaderCell {
                label: column.header().to_string(),
                sortable: column.is_sortable(),
                indicator: match (column.is_sortable(), self.sort) {
                    (true, Some(sort)) if sort.column == index => {
                        Some(SortIndicator::from(sort.direction))
                    }
                    (true, _) => Some(SortIndicator::Neutral),
                    (false, _) => None,
                },
                width: column.preferred_width(),
                align: column.alignment(),
            })
            .collect();
        HeaderView { cells }
    }

    fn build_body(&self) -> BodyView {
        if let Some(error) = &self.error {
            let message = match &self.error_state {
                Some(custom) => custom(),
                None => error.clone(),
            };
            return BodyView {
                rows: Vec::new(),
                empty: Some(EmptyView {
                    kind: EmptyKind::Error,
                    message,
                }),
                clickable: false,
            };
        }

        if self.data.is_empty() {
            let message = match &self.empty_state {
                Some(custom) => custom(),
                None => "No records to display".to_string(),
            };
            return BodyView {
                rows: Vec::new(),
                empty: Some(EmptyView {
                    kind: EmptyKind::NoData,
                    message,
                }),
                clickable: false,
            };
        }

        if self.filtered.is_empty() {
            return BodyView {
                rows: Vec::new(),
                empty: Some(EmptyView {
                    kind: EmptyKind::NoMatches,
                    message: "No matching records".to_string(),
                }),
                clickable: false,
            };
        }

        let window = self.pager.window(self.filtered.len());
        let rows = self.filtered[window]
            .iter()
            .map(|&index| {
                let record = &self.data[index];
                RowView {
                    cells: self
                        .columns
                        .iter()
                        .map(|column| self.render_cell(column, record))
                        .collect(),
                }
            })
            .collect();
        BodyView {
            rows,
            empty: None,
            clickable: self.row_click.is_some(),
        }
    }

    /// Cell content resolution: renderer wins outright, then a formatter
    /// (present values only), then the default stringification.
    fn render_cell(&self, column: &Column, record: &Record) -> CellView {
        if let Some(renderer) = column.cell_renderer() {
            return renderer(record);
        }
        let value = column.value_of(record);
        let text = match (&value, column.value_formatter()) {
            (Some(value), Some(formatter)) => formatter(value, record),
            _ => display::cell_text(value.as_ref(), &self.date_format),
        };
        let mut cell = CellView::text(text).align(column.alignment());
        if let Some(class) = column.class() {
            cell = cell.class(class);
        }
        cell
    }

    fn build_pagination(&self) -> PaginationView {
        if self.error.is_some() || self.data.is_empty() {
            return PaginationView::hidden();
        }

        let total = self.filtered.len();
        let total_pages = self.pager.total_pages(total);
        let current = self.pager.current_page();
        let window = self.pager.window(total);
        let (start, end) = if window.is_empty() {
            (0, 0)
        } else {
            (window.start + 1, window.end)
        };

        PaginationView {
            visible: true,
            start,
            end,
            total,
            current_page: current,
            total_pages,
            prev_enabled: current > 1,
            next_enabled: current < total_pages,
            items: page_items(current, total_pages),
        }
    }
}
