//! Column descriptors
//!
//! A column knows how to pull a value out of a record (by field name or a
//! computed getter), whether it participates in sorting, and how its cells
//! should be displayed. Display customization layers: a renderer overrides
//! everything, a formatter overrides the default stringification, and the
//! default handles nulls, booleans and dates sensibly.

use std::fmt;
use std::sync::Arc;

use poweralert_model::{Record, Value};

use crate::render::CellView;

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Computed value getter: derives a cell value from the whole record.
pub type ValueGetter = Arc<dyn Fn(&Record) -> Option<Value> + Send + Sync>;

/// Formatter: turns a present value into display text.
pub type ValueFormatter = Arc<dyn Fn(&Value, &Record) -> String + Send + Sync>;

/// Renderer: full control over a cell, text and style class included.
pub type CellRenderer = Arc<dyn Fn(&Record) -> CellView + Send + Sync>;

/// Where a column's value comes from.
#[derive(Clone)]
enum Accessor {
    Field(String),
    Computed(ValueGetter),
}

/// Descriptor for one grid column.
#[derive(Clone)]
pub struct Column {
    header: String,
    accessor: Accessor,
    sortable: bool,
    width: Option<u16>,
    align: Alignment,
    cell_class: Option<String>,
    renderer: Option<CellRenderer>,
    formatter: Option<ValueFormatter>,
}

impl Column {
    /// Creates a column backed by a record field.
    ///
    /// # Example
    ///
    /// ```
    /// use poweralert_grid::Column;
    ///
    /// let column = Column::field("status", "Status").sortable();
    /// assert!(column.is_sortable());
    /// ```
    pub fn field(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self::with_accessor(header, Accessor::Field(field.into()))
    }

    /// Creates a column whose value is computed from the whole record.
    pub fn computed<F>(header: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&Record) -> Option<Value> + Send + Sync + 'static,
    {
        Self::with_accessor(header, Accessor::Computed(Arc::new(getter)))
    }

    fn with_accessor(header: impl Into<String>, accessor: Accessor) -> Self {
        Self {
            header: header.into(),
            accessor,
            sortable: false,
            width: None,
            align: Alignment::Left,
            cell_class: None,
            renderer: None,
            formatter: None,
        }
    }

    /// Marks the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets a preferred display width in columns of text.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets cell alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Attaches a style class applied to every cell in the column.
    pub fn cell_class(mut self, class: impl Into<String>) -> Self {
        self.cell_class = Some(class.into());
        self
    }

    /// Attaches a full cell renderer. Takes precedence over `formatter` and
    /// the default stringification.
    pub fn renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&Record) -> CellView + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Attaches a value formatter, used when no renderer is set and the
    /// value is present.
    pub fn formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Value, &Record) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn preferred_width(&self) -> Option<u16> {
        self.width
    }

    pub fn alignment(&self) -> Alignment {
        self.align
    }

    pub fn class(&self) -> Option<&str> {
        self.cell_class.as_deref()
    }

    pub(crate) fn cell_renderer(&self) -> Option<&CellRenderer> {
        self.renderer.as_ref()
    }

    pub(crate) fn value_formatter(&self) -> Option<&ValueFormatter> {
        self.formatter.as_ref()
    }

    /// The field name backing this column, if it reads one directly.
    pub fn field_name(&self) -> Option<&str> {
        match &self.accessor {
            Accessor::Field(name) => Some(name),
            Accessor::Computed(_) => None,
        }
    }

    /// Pulls this column's value out of a record. `None` covers a missing
    /// field, an explicit null, and a computed getter that produced nothing;
    /// all three sort and display the same way.
    pub fn value_of(&self, record: &Record) -> Option<Value> {
        let value = match &self.accessor {
            Accessor::Field(name) => record.get(name).cloned(),
            Accessor::Computed(getter) => getter(record),
        };
        value.filter(|v| !v.is_null())
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field(
                "accessor",
                &match &self.accessor {
                    Accessor::Field(name) => format!("field({name})"),
                    Accessor::Computed(_) => "computed".to_string(),
                },
            )
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("align", &self.align)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
