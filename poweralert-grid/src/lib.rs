//! Generic data grid engine for PowerAlert admin surfaces
//!
//! One [`Grid`] instance owns one table's state end to end: records, column
//! descriptors, active filters, sort state, and the pagination cursor. Admin
//! pages stay thin; they declare columns and hand over data, and the engine
//! does the filtering, sorting, windowing and painting. Rendering goes
//! through the [`Surface`] trait, so the same engine drives a terminal, a
//! test buffer, or any other target that can repaint three regions.
//!
//! # Example
//!
//! ```
//! use poweralert_grid::{Column, FilterSet, FilterValue, Grid, GridOptions, TextSurface};
//! use poweralert_model::Record;
//!
//! let data = vec![
//!     Record::new().set("area", "Downtown").set("status", "ONGOING"),
//!     Record::new().set("area", "Riverside").set("status", "COMPLETED"),
//! ];
//! let columns = vec![
//!     Column::field("area", "Area").sortable(),
//!     Column::field("status", "Status"),
//! ];
//! let options = GridOptions::new(columns)
//!     .data(data)
//!     .filters(FilterSet::new().with("status", FilterValue::equals("ONGOING")));
//!
//! let mut grid = Grid::new(options, TextSurface::new())?;
//! grid.render();
//! assert!(grid.surface().body().contains("Downtown"));
//! # Ok::<(), poweralert_grid::GridError>(())
//! ```

pub mod column;
pub mod display;
pub mod filter;
pub mod paging;
pub mod render;
pub mod sort;
pub mod text;

mod engine;
mod error;

pub use column::{Alignment, CellRenderer, Column, ValueFormatter, ValueGetter};
pub use display::{DateFormatter, date_formatter, default_date_formatter, relative_time};
pub use engine::{Grid, GridOptions, GridState, RowClick, StateMessage};
pub use error::GridError;
pub use filter::{FilterFn, FilterSet, FilterValue};
pub use paging::{DEFAULT_PAGE_SIZE, MAX_PAGE_BUTTONS, PageItem, Pager, page_items};
pub use render::{
    BodyView, CellView, EmptyKind, EmptyView, HeaderCell, HeaderView, PaginationView, RowView,
    SortIndicator, Surface,
};
pub use sort::{Direction, SortState, compare_values};
pub use text::TextSurface;
