//! tui-kit
//!
//! A sortable, selectable data table and a labeled input field for ratatui.

pub mod a11y;
pub mod app;
pub mod config;
pub mod field;
pub mod input;
pub mod table;
pub mod theme;

// Re-exports
pub use app::App;
pub use config::{AppConfig, ConfigError, ConfigResult};
pub use field::{InputField, InputFieldWidget, InputType, ValueChange};
pub use table::{Column, DataTable, DataTableWidget, Record, RowKey, SelectionMode};
