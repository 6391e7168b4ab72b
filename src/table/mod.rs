//! Table Module
//!
//! Sortable, selectable tabular data display.

pub mod column;
pub mod selection;
pub mod sort;
pub mod state;
pub mod widget;

// Re-exports
pub use column::{CellRenderer, CellValue, Column, Record};
pub use selection::{derive_selected_records, RowKey, RowKeyFn, SelectionMode, SelectionSet};
pub use sort::{compare_cells, derive_order, locale_cmp, ordered_indices, ActiveSort, SortDirection, SortState};
pub use state::{BodyState, DataTable, HeaderCell, SelectCallback, DEFAULT_EMPTY_MESSAGE};
pub use widget::DataTableWidget;
