//! Accessibility Labels
//!
//! Fixed labels and indicator values exposed by both widgets. These strings
//! are matched by assistive tooling and must not change.

use crate::table::SortDirection;

pub const SELECT_ALL_LABEL: &str = "Select all rows";
pub const SELECT_ROW_LABEL: &str = "Select row";
pub const CLEAR_INPUT_LABEL: &str = "Clear input";
pub const SHOW_PASSWORD_LABEL: &str = "Show password";
pub const HIDE_PASSWORD_LABEL: &str = "Hide password";
pub const LOADING_MESSAGE: &str = "Loading...";

/// Tri-state sort indicator of a column header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaSort {
    None,
    Ascending,
    Descending,
}

impl AriaSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl From<Option<SortDirection>> for AriaSort {
    fn from(direction: Option<SortDirection>) -> Self {
        match direction {
            None => Self::None,
            Some(SortDirection::Ascending) => Self::Ascending,
            Some(SortDirection::Descending) => Self::Descending,
        }
    }
}

pub fn sort_label(title: &str) -> String {
    format!("Sort by {}", title)
}

pub fn password_toggle_label(revealed: bool) -> &'static str {
    if revealed { HIDE_PASSWORD_LABEL } else { SHOW_PASSWORD_LABEL }
}
