//! Column Descriptors
//!
//! Columns, cell values and the `Record` trait rows implement.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use ratatui::text::Line;
use serde_json::{Map, Value};

/// A single cell value read from a row
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

/// A row the table can read cells from.
///
/// The table never mutates records. Accessors that do not resolve yield
/// [`CellValue::Null`] and render as an empty cell.
pub trait Record {
    fn field(&self, accessor: &str) -> CellValue;
}

impl Record for Map<String, Value> {
    fn field(&self, accessor: &str) -> CellValue {
        self.get(accessor).map_or(CellValue::Null, CellValue::from)
    }
}

impl Record for Value {
    fn field(&self, accessor: &str) -> CellValue {
        match self {
            Value::Object(map) => map.field(accessor),
            _ => CellValue::Null,
        }
    }
}

impl Record for HashMap<String, CellValue> {
    fn field(&self, accessor: &str) -> CellValue {
        self.get(accessor).cloned().unwrap_or(CellValue::Null)
    }
}

impl Record for BTreeMap<String, CellValue> {
    fn field(&self, accessor: &str) -> CellValue {
        self.get(accessor).cloned().unwrap_or(CellValue::Null)
    }
}

/// Custom cell renderer
pub type CellRenderer<R> = Rc<dyn Fn(&CellValue, &R) -> Line<'static>>;

/// Column definition
pub struct Column<R> {
    pub key: String,
    pub title: String,
    pub accessor: String,
    pub sortable: bool,
    pub render: Option<CellRenderer<R>>,
}

impl<R> Column<R> {
    pub fn new(key: impl Into<String>, title: impl Into<String>, accessor: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            accessor: accessor.into(),
            sortable: false,
            render: None,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn render_with<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellValue, &R) -> Line<'static> + 'static,
    {
        self.render = Some(Rc::new(render));
        self
    }
}

impl<R: Record> Column<R> {
    pub fn value(&self, row: &R) -> CellValue {
        row.field(&self.accessor)
    }

    /// Build the line shown in this column's cell for `row`
    pub fn cell_line(&self, row: &R) -> Line<'static> {
        let value = self.value(row);
        match &self.render {
            Some(render) => render(&value, row),
            None => Line::from(value.to_string()),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            accessor: self.accessor.clone(),
            sortable: self.sortable,
            render: self.render.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .finish()
    }
}
