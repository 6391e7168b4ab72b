//! Table State
//!
//! The table engine: owns sort and selection state, keeps the derived
//! ordering current and reports the selected records to the caller.

use std::fmt;

use tracing::{debug, trace};

use super::column::{Column, Record};
use super::selection::{derive_selected_records, resolve_key, RowKey, RowKeyFn, SelectionMode, SelectionSet};
use super::sort::{ordered_indices, SortState};
use crate::a11y::{self, AriaSort};
use crate::input::TableAction;

/// Receives the selected records, in display order
pub type SelectCallback<R> = Box<dyn FnMut(&[&R])>;

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data";

/// What the table body shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState<'a> {
    Loading,
    Empty(&'a str),
    Populated,
}

/// Derived header data for one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub title: String,
    pub aria_sort: AriaSort,
    /// Accessible label of the sort control, only for sortable columns
    pub sort_label: Option<String>,
    pub glyph: Option<&'static str>,
    pub focused: bool,
}

/// Sortable, selectable table engine.
///
/// Row keys default to the row's position in the *derived* ordering. Those
/// keys move with every re-sort, so a selection made under one ordering points
/// at different rows under the next. Callers that need selections to follow
/// rows across sorts must supply a stable key with [`DataTable::row_key`].
pub struct DataTable<R> {
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    loading: bool,
    mode: SelectionMode,
    empty_message: String,
    row_key: Option<RowKeyFn<R>>,
    on_row_select: Option<SelectCallback<R>>,
    sort: SortState,
    selection: SelectionSet,
    order: Vec<usize>,
    cursor: usize,
    focused_column: usize,
}

impl<R: Record> DataTable<R> {
    pub fn new(rows: Vec<R>, columns: Vec<Column<R>>) -> Self {
        let mut table = Self {
            rows,
            columns,
            loading: false,
            mode: SelectionMode::None,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            row_key: None,
            on_row_select: None,
            sort: SortState::new(),
            selection: SelectionSet::new(),
            order: Vec::new(),
            cursor: 0,
            focused_column: 0,
        };
        table.rederive();
        table
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn selection_mode(mut self, mode: impl Into<SelectionMode>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn row_key<F>(mut self, key_fn: F) -> Self
    where
        F: Fn(&R, usize) -> RowKey + 'static,
    {
        self.row_key = Some(Box::new(key_fn));
        self
    }

    pub fn on_row_select<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&[&R]) + 'static,
    {
        self.on_row_select = Some(Box::new(callback));
        self
    }

    pub fn initial_selection<I: IntoIterator<Item = RowKey>>(mut self, keys: I) -> Self {
        self.selection.replace(keys);
        self
    }

    /// Finish construction and report the initial selection.
    pub fn mount(mut self) -> Self {
        self.rederive();
        self.notify();
        self
    }

    /// Reset sort, selection and cursor as if freshly mounted
    pub fn remount(&mut self) {
        self.sort.clear();
        self.selection.clear();
        self.cursor = 0;
        self.focused_column = 0;
        self.rederive();
        self.notify();
    }

    // ----- Inputs -----

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.rederive();
        self.notify();
    }

    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        self.columns = columns;
        self.focused_column = self.focused_column.min(self.columns.len().saturating_sub(1));
        self.rederive();
        self.notify();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Switch selection mode. The selection starts over.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.selection.clear();
        self.notify();
    }

    // ----- Derived state -----

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Positions into [`DataTable::rows`] in display order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn ordered_rows(&self) -> Vec<&R> {
        self.order.iter().map(|&i| &self.rows[i]).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Row at `position` in display order
    pub fn row_at(&self, position: usize) -> Option<&R> {
        self.order.get(position).map(|&i| &self.rows[i])
    }

    pub fn row_key_at(&self, position: usize) -> Option<RowKey> {
        self.row_at(position)
            .map(|row| resolve_key(self.row_key.as_ref(), row, position))
    }

    pub fn is_selected(&self, position: usize) -> bool {
        self.mode.is_enabled()
            && self
                .row_key_at(position)
                .is_some_and(|key| self.selection.contains(&key))
    }

    pub fn selected_records(&self) -> Vec<&R> {
        derive_selected_records(&self.ordered_rows(), &self.selection, self.row_key.as_ref())
    }

    pub fn all_selected(&self) -> bool {
        self.mode.is_enabled() && !self.order.is_empty() && self.selection.len() == self.order.len()
    }

    pub fn some_selected(&self) -> bool {
        self.mode.is_enabled() && !self.selection.is_empty() && self.selection.len() < self.order.len()
    }

    pub fn body_state(&self) -> BodyState<'_> {
        if self.loading {
            BodyState::Loading
        } else if self.order.is_empty() {
            BodyState::Empty(&self.empty_message)
        } else {
            BodyState::Populated
        }
    }

    /// Number of columns a full-width body row spans
    pub fn span(&self) -> usize {
        self.columns.len() + usize::from(self.mode.is_enabled())
    }

    /// Label of the header select-all control; present only in multiple mode
    pub fn select_all_label(&self) -> Option<&'static str> {
        (self.mode == SelectionMode::Multiple).then_some(a11y::SELECT_ALL_LABEL)
    }

    /// Label of each row's selection control
    pub fn row_select_label(&self) -> Option<&'static str> {
        self.mode.is_enabled().then_some(a11y::SELECT_ROW_LABEL)
    }

    pub fn header_cells(&self) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let direction = self.sort.direction_of(&col.key);
                let aria_sort = AriaSort::from(direction);
                let glyph = col.sortable.then_some(match aria_sort {
                    AriaSort::Ascending => "▲",
                    AriaSort::Descending => "▼",
                    AriaSort::None => "↕",
                });
                HeaderCell {
                    key: col.key.clone(),
                    title: col.title.clone(),
                    aria_sort,
                    sort_label: col.sortable.then(|| a11y::sort_label(&col.title)),
                    glyph,
                    focused: i == self.focused_column,
                }
            })
            .collect()
    }

    // ----- Sorting -----

    /// Advance the sort cycle of the column named `key`
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        let Some(column) = self.columns.iter().find(|c| c.key == key) else {
            return false;
        };
        if !self.sort.toggle(column) {
            return false;
        }

        debug!(
            column = key,
            direction = ?self.sort.direction_of(key),
            "sort toggled"
        );
        self.rederive();
        self.notify();
        true
    }

    pub fn toggle_sort_at(&mut self, column: usize) -> bool {
        match self.columns.get(column) {
            Some(col) => {
                let key = col.key.clone();
                self.toggle_sort(&key)
            }
            None => false,
        }
    }

    // ----- Selection -----

    pub fn toggle_select(&mut self, key: RowKey) -> bool {
        debug!(mode = self.mode.as_str(), key = %key, "toggle select");
        if !self.selection.toggle(self.mode, key) {
            return false;
        }
        self.notify();
        true
    }

    /// Toggle the row at `position` in display order
    pub fn toggle_select_at(&mut self, position: usize) -> bool {
        match self.row_key_at(position) {
            Some(key) => self.toggle_select(key),
            None => false,
        }
    }

    /// Select every row of the current ordering. Multiple mode only.
    pub fn select_all(&mut self) -> bool {
        if self.mode != SelectionMode::Multiple {
            return false;
        }
        let keys: Vec<RowKey> = (0..self.order.len())
            .filter_map(|position| self.row_key_at(position))
            .collect();
        debug!(count = keys.len(), "select all");
        self.selection.replace(keys);
        self.notify();
        true
    }

    pub fn clear_selection(&mut self) -> bool {
        if !self.mode.is_enabled() {
            return false;
        }
        debug!("clear selection");
        self.selection.clear();
        self.notify();
        true
    }

    /// Header checkbox: clear when everything is selected, else select all
    pub fn toggle_all(&mut self) -> bool {
        if self.all_selected() {
            self.clear_selection()
        } else {
            self.select_all()
        }
    }

    // ----- Cursor -----

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focused_column(&self) -> usize {
        self.focused_column
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if !self.order.is_empty() {
            self.cursor = (self.cursor + 1).min(self.order.len() - 1);
        }
    }

    pub fn move_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.cursor = self.order.len().saturating_sub(1);
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.cursor = self.cursor.saturating_sub(page_size);
    }

    pub fn page_down(&mut self, page_size: usize) {
        if !self.order.is_empty() {
            self.cursor = (self.cursor + page_size).min(self.order.len() - 1);
        }
    }

    pub fn focus_prev_column(&mut self) {
        self.focused_column = self.focused_column.saturating_sub(1);
    }

    pub fn focus_next_column(&mut self) {
        if !self.columns.is_empty() {
            self.focused_column = (self.focused_column + 1).min(self.columns.len() - 1);
        }
    }

    /// Apply a keymap action. Returns true if sort or selection changed.
    pub fn handle_action(&mut self, action: TableAction, page_size: usize) -> bool {
        match action {
            TableAction::MoveUp => self.move_up(),
            TableAction::MoveDown => self.move_down(),
            TableAction::MoveToTop => self.move_to_top(),
            TableAction::MoveToBottom => self.move_to_bottom(),
            TableAction::PageUp => self.page_up(page_size),
            TableAction::PageDown => self.page_down(page_size),
            TableAction::PrevColumn => self.focus_prev_column(),
            TableAction::NextColumn => self.focus_next_column(),
            TableAction::ToggleSort => return self.toggle_sort_at(self.focused_column),
            TableAction::ToggleSelect => return self.toggle_select_at(self.cursor),
            TableAction::ToggleAll => return self.toggle_all(),
            TableAction::ClearSelection => return self.clear_selection(),
            TableAction::None => {}
        }
        false
    }

    // ----- Internals -----

    fn rederive(&mut self) {
        self.order = ordered_indices(&self.rows, &self.columns, &self.sort);
        self.cursor = self.cursor.min(self.order.len().saturating_sub(1));
        trace!(rows = self.order.len(), "ordering derived");
    }

    fn notify(&mut self) {
        let Some(callback) = self.on_row_select.as_mut() else {
            return;
        };
        let ordered: Vec<&R> = self.order.iter().map(|&i| &self.rows[i]).collect();
        let selected = derive_selected_records(&ordered, &self.selection, self.row_key.as_ref());
        callback(&selected);
    }
}

impl<R> fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns)
            .field("loading", &self.loading)
            .field("mode", &self.mode)
            .field("sort", &self.sort)
            .field("selection", &self.selection)
            .field("order", &self.order)
            .field("cursor", &self.cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::{json, Value};

    use super::*;

    type Calls = Rc<RefCell<Vec<Vec<Value>>>>;

    fn people() -> Vec<Value> {
        vec![
            json!({ "id": 1, "name": "B", "age": 30 }),
            json!({ "id": 2, "name": "A", "age": 20 }),
        ]
    }

    fn columns() -> Vec<Column<Value>> {
        vec![
            Column::new("name", "Name", "name").sortable(true),
            Column::new("age", "Age", "age").sortable(true),
        ]
    }

    fn recording_table(mode: SelectionMode) -> (DataTable<Value>, Calls) {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let table = DataTable::new(people(), columns())
            .selection_mode(mode)
            .on_row_select(move |rows: &[&Value]| {
                sink.borrow_mut().push(rows.iter().map(|r| (*r).clone()).collect());
            })
            .mount();
        (table, calls)
    }

    fn aria(table: &DataTable<Value>, key: &str) -> &'static str {
        table
            .header_cells()
            .into_iter()
            .find(|cell| cell.key == key)
            .map(|cell| cell.aria_sort.as_str())
            .unwrap_or("missing")
    }

    #[test]
    fn test_starts_unsorted_in_input_order() {
        let table = DataTable::new(people(), columns());
        assert!(table.sort_state().is_empty());
        assert_eq!(table.order(), &[0, 1]);
        assert_eq!(aria(&table, "name"), "none");
    }

    #[test]
    fn test_sort_updates_header_indicator() {
        let mut table = DataTable::new(people(), columns());

        table.toggle_sort("name");
        assert_eq!(aria(&table, "name"), "ascending");
        table.toggle_sort("name");
        assert_eq!(aria(&table, "name"), "descending");
        table.toggle_sort("name");
        assert_eq!(aria(&table, "name"), "none");
    }

    #[test]
    fn test_sort_by_age_leaves_name_unsorted() {
        let mut table = DataTable::new(people(), columns());
        let label = table.header_cells()[1].sort_label.clone();
        assert_eq!(label.as_deref(), Some("Sort by Age"));

        table.toggle_sort("age");
        assert_eq!(aria(&table, "age"), "ascending");
        assert_eq!(aria(&table, "name"), "none");
        assert_eq!(table.order(), &[1, 0]);
    }

    #[test]
    fn test_unsortable_header_has_no_sort_control() {
        let cols = vec![
            Column::new("id", "ID", "id"),
            Column::new("name", "Name", "name").sortable(true),
        ];
        let mut table = DataTable::new(people(), cols);

        let header = &table.header_cells()[0];
        assert_eq!(header.sort_label, None);
        assert_eq!(header.glyph, None);
        assert_eq!(table.header_cells()[1].glyph, Some("↕"));

        assert!(!table.toggle_sort("id"));
        assert!(!table.toggle_sort("nope"));
        assert!(table.sort_state().is_empty());
    }

    #[test]
    fn test_mount_reports_empty_selection() {
        let (_table, calls) = recording_table(SelectionMode::Multiple);
        assert_eq!(calls.borrow().len(), 1);
        assert!(calls.borrow()[0].is_empty());
    }

    #[test]
    fn test_selecting_second_row_reports_that_record() {
        let (mut table, calls) = recording_table(SelectionMode::Multiple);

        assert!(table.toggle_select_at(1));
        let last = calls.borrow().last().cloned().unwrap_or_default();
        assert_eq!(last, vec![json!({ "id": 2, "name": "A", "age": 20 })]);
    }

    #[test]
    fn test_single_mode_replaces_selection() {
        let (mut table, calls) = recording_table(SelectionMode::Single);

        table.toggle_select_at(0);
        table.toggle_select_at(1);
        assert_eq!(table.selection().len(), 1);
        assert!(table.is_selected(1));
        assert!(!table.is_selected(0));
        assert_eq!(calls.borrow().last().map(Vec::len), Some(1));
    }

    #[test]
    fn test_disabled_selection_is_ignored() {
        let (mut table, calls) = recording_table(SelectionMode::None);
        assert!(!table.toggle_select_at(0));
        assert!(!table.select_all());
        assert!(!table.clear_selection());
        assert!(table.selection().is_empty());
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_select_all_and_flags() {
        let (mut table, calls) = recording_table(SelectionMode::Multiple);
        assert!(!table.all_selected());
        assert!(!table.some_selected());

        table.toggle_select_at(0);
        assert!(table.some_selected());
        assert!(!table.all_selected());

        table.toggle_all();
        assert!(table.all_selected());
        assert!(!table.some_selected());
        assert_eq!(calls.borrow().last().map(Vec::len), Some(2));

        table.toggle_all();
        assert!(table.selection().is_empty());
        assert_eq!(calls.borrow().last().map(Vec::len), Some(0));
    }

    #[test]
    fn test_select_all_requires_multiple_mode() {
        let (mut table, _calls) = recording_table(SelectionMode::Single);
        assert!(!table.select_all());
        assert!(table.selection().is_empty());
    }

    #[test]
    fn test_all_selected_false_when_empty() {
        let table = DataTable::<Value>::new(Vec::new(), columns()).selection_mode(SelectionMode::Multiple);
        assert!(!table.all_selected());
        assert!(!table.some_selected());
    }

    #[test]
    fn test_selected_records_follow_display_order() {
        let mut table = DataTable::new(people(), columns())
            .selection_mode(SelectionMode::Multiple)
            .row_key(|row: &Value, _| RowKey::from(row["id"].to_string()));

        table.toggle_select_at(1);
        table.toggle_select_at(0);
        let ids: Vec<i64> = table.selected_records().iter().filter_map(|r| r["id"].as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);

        table.toggle_sort("name");
        let ids: Vec<i64> = table.selected_records().iter().filter_map(|r| r["id"].as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_index_keys_do_not_follow_rows_across_sorts() {
        let mut table = DataTable::new(people(), columns()).selection_mode(SelectionMode::Multiple);

        table.toggle_select_at(0);
        assert_eq!(table.selected_records()[0]["name"], "B");

        table.toggle_sort("name");
        assert_eq!(table.selected_records()[0]["name"], "A");
    }

    #[test]
    fn test_stable_keys_follow_rows_across_sorts() {
        let mut table = DataTable::new(people(), columns())
            .selection_mode(SelectionMode::Multiple)
            .row_key(|row: &Value, _| RowKey::from(row["id"].to_string()));

        table.toggle_select_at(0);
        for _ in 0..2 {
            table.toggle_sort("name");
            assert_eq!(table.selected_records()[0]["name"], "B");
        }
    }

    #[test]
    fn test_sort_change_reports_selection_again() {
        let (mut table, calls) = recording_table(SelectionMode::Multiple);
        table.toggle_select_at(0);
        let before = calls.borrow().len();

        table.toggle_sort("age");
        assert_eq!(calls.borrow().len(), before + 1);
    }

    #[test]
    fn test_body_states() {
        let mut table = DataTable::<Value>::new(Vec::new(), columns()).empty_message("Nothing here");
        assert_eq!(table.body_state(), BodyState::Empty("Nothing here"));

        table.set_loading(true);
        assert_eq!(table.body_state(), BodyState::Loading);

        table.set_loading(false);
        table.set_rows(people());
        assert_eq!(table.body_state(), BodyState::Populated);
    }

    #[test]
    fn test_span_includes_selection_column() {
        let table = DataTable::new(people(), columns());
        assert_eq!(table.span(), 2);
        let table = table.selection_mode(SelectionMode::Single);
        assert_eq!(table.span(), 3);
    }

    #[test]
    fn test_stale_sort_after_columns_change() {
        let mut table = DataTable::new(people(), columns());
        table.toggle_sort("name");
        assert_eq!(table.order(), &[1, 0]);

        table.set_columns(vec![Column::new("age", "Age", "age").sortable(true)]);
        assert_eq!(table.order(), &[0, 1]);
    }

    #[test]
    fn test_remount_resets_state() {
        let (mut table, calls) = recording_table(SelectionMode::Multiple);
        table.toggle_sort("name");
        table.toggle_select_at(0);

        table.remount();
        assert!(table.sort_state().is_empty());
        assert!(table.selection().is_empty());
        assert_eq!(calls.borrow().last().map(Vec::len), Some(0));
    }

    #[test]
    fn test_keyboard_actions() {
        let (mut table, _calls) = recording_table(SelectionMode::Multiple);

        table.handle_action(TableAction::MoveDown, 10);
        table.handle_action(TableAction::MoveDown, 10);
        assert_eq!(table.cursor(), 1);

        assert!(table.handle_action(TableAction::ToggleSelect, 10));
        assert!(table.is_selected(1));

        table.handle_action(TableAction::NextColumn, 10);
        assert!(table.handle_action(TableAction::ToggleSort, 10));
        assert_eq!(aria(&table, "age"), "ascending");

        assert!(!table.handle_action(TableAction::MoveToTop, 10));
        assert_eq!(table.cursor(), 0);
    }

    #[test]
    fn test_selection_control_labels() {
        let table = DataTable::new(people(), columns());
        assert_eq!(table.select_all_label(), None);
        assert_eq!(table.row_select_label(), None);

        let table = DataTable::new(people(), columns()).selection_mode(SelectionMode::Single);
        assert_eq!(table.select_all_label(), None);
        assert_eq!(table.row_select_label(), Some("Select row"));

        let table = DataTable::new(people(), columns()).selection_mode(SelectionMode::Multiple);
        assert_eq!(table.select_all_label(), Some("Select all rows"));
    }
}
