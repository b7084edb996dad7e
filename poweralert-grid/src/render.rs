//! Render views and the surface contract
//!
//! The engine never draws anything itself. Each render pass builds plain-data
//! views for three regions (header, body, pagination) and hands them to a
//! [`Surface`], which repaints each region wholesale. There is no diffing:
//! if a region is painted, its previous content is gone.

use crate::column::Alignment;
use crate::paging::PageItem;
use crate::sort::Direction;

/// Sort marker shown in a sortable column's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// Sortable, but not the active sort column.
    Neutral,
    /// Active ascending sort.
    Up,
    /// Active descending sort.
    Down,
}

impl SortIndicator {
    /// Text glyph for surfaces that draw indicators as characters.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Neutral => "↕",
            Self::Up => "▲",
            Self::Down => "▼",
        }
    }
}

impl From<Direction> for SortIndicator {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Asc => Self::Up,
            Direction::Desc => Self::Down,
        }
    }
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    pub sortable: bool,
    /// Present only on sortable columns.
    pub indicator: Option<SortIndicator>,
    pub width: Option<u16>,
    pub align: Alignment,
}

/// The header region: one cell per column, every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub cells: Vec<HeaderCell>,
}

/// One body cell: display text plus an optional style class the surface may
/// map to colors, badges, or whatever it has.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellView {
    pub text: String,
    pub class: Option<String>,
    pub align: Alignment,
}

impl CellView {
    /// Creates a plain text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
            align: Alignment::Left,
        }
    }

    /// Attaches a style class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Overrides alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }
}

/// One body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub cells: Vec<CellView>,
}

/// Why the body has no rows to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    /// The collection itself is empty.
    NoData,
    /// Records exist but none passed the active filters.
    NoMatches,
    /// The grid was put into an error state.
    Error,
}

/// Placeholder content for a rowless body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyView {
    pub kind: EmptyKind,
    pub message: String,
}

/// The body region: either rows for the current page or an empty placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyView {
    pub rows: Vec<RowView>,
    pub empty: Option<EmptyView>,
    /// Whether rows should be presented as activatable.
    pub clickable: bool,
}

/// The pagination region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    /// When false the surface should clear the region and draw nothing.
    pub visible: bool,
    /// 1-indexed first row of the page, 0 when the page is empty.
    pub start: usize,
    /// 1-indexed last row of the page, 0 when the page is empty.
    pub end: usize,
    /// Rows that survived filtering.
    pub total: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// The numbered button strip, ellipses included.
    pub items: Vec<PageItem>,
}

impl PaginationView {
    /// A cleared region.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            start: 0,
            end: 0,
            total: 0,
            current_page: 1,
            total_pages: 1,
            prev_enabled: false,
            next_enabled: false,
            items: Vec::new(),
        }
    }
}

/// A render target. Each method replaces one region's content entirely.
pub trait Surface {
    fn paint_header(&mut self, header: &HeaderView);
    fn paint_body(&mut self, body: &BodyView);
    fn paint_pagination(&mut self, pagination: &PaginationView);
}
