//! Sorting
//!
//! Sort state transitions and the derived row ordering.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::column::{CellValue, Column, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// The column currently driving the ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSort {
    pub key: String,
    pub accessor: String,
    pub direction: SortDirection,
}

/// Sort state: empty, or one active column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState(Option<ActiveSort>);

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn active(&self) -> Option<&ActiveSort> {
        self.0.as_ref()
    }

    /// Direction for `key` if it is the active column
    pub fn direction_of(&self, key: &str) -> Option<SortDirection> {
        self.0
            .as_ref()
            .filter(|active| active.key == key)
            .map(|active| active.direction)
    }

    /// Advance the cycle for `column`: none -> ascending -> descending -> none.
    ///
    /// A different column always restarts at ascending. Returns false when the
    /// column is not sortable and nothing changed.
    pub fn toggle<R>(&mut self, column: &Column<R>) -> bool {
        if !column.sortable {
            return false;
        }

        self.0 = match self.0.take() {
            Some(active) if active.key == column.key => match active.direction {
                SortDirection::Ascending => Some(ActiveSort {
                    direction: SortDirection::Descending,
                    ..active
                }),
                SortDirection::Descending => None,
            },
            _ => Some(ActiveSort {
                key: column.key.clone(),
                accessor: column.accessor.clone(),
                direction: SortDirection::Ascending,
            }),
        };
        true
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Three-way comparison of two cells in ascending order.
///
/// Null is less than everything and equal to null. Two numbers compare
/// numerically; anything else compares by its text form.
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Null, CellValue::Null) => Ordering::Equal,
        (CellValue::Null, _) => Ordering::Less,
        (_, CellValue::Null) => Ordering::Greater,
        (CellValue::Number(x), CellValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => locale_cmp(&a.to_string(), &b.to_string()),
    }
}

/// A base character and the combining marks that follow it after
/// canonical decomposition
type CollationUnit = (char, Vec<char>);

fn collation_units(s: &str) -> Vec<CollationUnit> {
    let mut units: Vec<CollationUnit> = Vec::new();
    for c in s.nfd() {
        match units.last_mut() {
            Some((_, marks)) if is_combining_mark(c) => marks.push(c),
            _ => units.push((c, Vec::new())),
        }
    }
    units
}

/// Locale-aware string comparison.
///
/// Three levels, each consulted only when the previous one ties: base
/// letters case-insensitively, then accents (unaccented first), then case
/// (lowercase first). "éclair" sorts between "eclair" and "fig".
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let (ua, ub) = (collation_units(a), collation_units(b));

    let primary = ua
        .iter()
        .flat_map(|(base, _)| base.to_lowercase())
        .cmp(ub.iter().flat_map(|(base, _)| base.to_lowercase()));
    if primary != Ordering::Equal {
        return primary;
    }

    let accents = ua.iter().map(|(_, marks)| marks).cmp(ub.iter().map(|(_, marks)| marks));
    if accents != Ordering::Equal {
        return accents;
    }

    for ((x, _), (y, _)) in ua.iter().zip(&ub) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => return x.cmp(y),
        }
    }
    ua.len().cmp(&ub.len())
}

/// Positions into `rows` in display order.
///
/// An empty sort, or a sort whose key no longer names a column, yields the
/// input order. Ties keep their relative input order.
pub fn ordered_indices<R: Record>(rows: &[R], columns: &[Column<R>], sort: &SortState) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();

    let Some(active) = sort.active() else {
        return indices;
    };
    let Some(column) = columns.iter().find(|c| c.key == active.key) else {
        tracing::trace!(key = %active.key, "sort key no longer matches a column");
        return indices;
    };

    let values: Vec<CellValue> = rows.iter().map(|row| column.value(row)).collect();
    indices.sort_by(|&a, &b| active.direction.apply(compare_cells(&values[a], &values[b])));
    indices
}

/// The rows in display order
pub fn derive_order<'a, R: Record>(rows: &'a [R], columns: &[Column<R>], sort: &SortState) -> Vec<&'a R> {
    ordered_indices(rows, columns, sort)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

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

    fn names(rows: &[&Value]) -> Vec<String> {
        rows.iter().map(|r| r["name"].as_str().unwrap_or_default().to_string()).collect()
    }

    #[test]
    fn test_toggle_cycle() {
        let cols = columns();
        let mut sort = SortState::new();

        assert!(sort.toggle(&cols[0]));
        assert_eq!(sort.direction_of("name"), Some(SortDirection::Ascending));

        sort.toggle(&cols[0]);
        assert_eq!(sort.direction_of("name"), Some(SortDirection::Descending));

        sort.toggle(&cols[0]);
        assert!(sort.is_empty());
    }

    #[test]
    fn test_other_column_restarts_ascending() {
        let cols = columns();
        let mut sort = SortState::new();
        sort.toggle(&cols[0]);
        sort.toggle(&cols[0]);

        sort.toggle(&cols[1]);
        assert_eq!(sort.direction_of("age"), Some(SortDirection::Ascending));
        assert_eq!(sort.direction_of("name"), None);
    }

    #[test]
    fn test_unsortable_column_is_ignored() {
        let column: Column<Value> = Column::new("id", "ID", "id");
        let mut sort = SortState::new();
        assert!(!sort.toggle(&column));
        assert!(sort.is_empty());
    }

    #[test]
    fn test_example_ordering() {
        let rows = people();
        let cols = columns();
        let mut sort = SortState::new();

        assert_eq!(names(&derive_order(&rows, &cols, &sort)), ["B", "A"]);

        sort.toggle(&cols[0]);
        assert_eq!(names(&derive_order(&rows, &cols, &sort)), ["A", "B"]);

        sort.toggle(&cols[0]);
        assert_eq!(names(&derive_order(&rows, &cols, &sort)), ["B", "A"]);

        sort.toggle(&cols[0]);
        assert_eq!(names(&derive_order(&rows, &cols, &sort)), ["B", "A"]);
    }

    #[test]
    fn test_three_toggles_restore_input_order() {
        let rows: Vec<Value> = [5, 3, 9, 1, 3, 7]
            .iter()
            .map(|n| json!({ "name": format!("r{}", n), "age": n }))
            .collect();
        let cols = columns();

        for column in &cols {
            let mut sort = SortState::new();
            for _ in 0..3 {
                sort.toggle(column);
            }
            assert!(sort.is_empty());
            assert_eq!(ordered_indices(&rows, &cols, &sort), (0..rows.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_numeric_sort_is_monotonic_and_stable() {
        let ages = [30, 20, 30, 10, 20, 30];
        let rows: Vec<Value> = ages
            .iter()
            .enumerate()
            .map(|(i, age)| json!({ "name": format!("p{}", i), "age": age }))
            .collect();
        let cols = columns();
        let mut sort = SortState::new();

        sort.toggle(&cols[1]);
        let asc = ordered_indices(&rows, &cols, &sort);
        assert_eq!(asc, vec![3, 1, 4, 0, 2, 5]);

        sort.toggle(&cols[1]);
        let desc = ordered_indices(&rows, &cols, &sort);
        assert_eq!(desc, vec![0, 2, 5, 1, 4, 3]);
        let values: Vec<i64> = desc.iter().map(|&i| ages[i]).collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_nulls_first_ascending_last_descending() {
        let rows = vec![
            json!({ "name": "x", "age": 5 }),
            json!({ "name": "y" }),
            json!({ "name": "z", "age": 1 }),
        ];
        let cols = columns();
        let mut sort = SortState::new();

        sort.toggle(&cols[1]);
        assert_eq!(ordered_indices(&rows, &cols, &sort), vec![1, 2, 0]);

        sort.toggle(&cols[1]);
        assert_eq!(ordered_indices(&rows, &cols, &sort), vec![0, 2, 1]);
    }

    #[test]
    fn test_stale_sort_key_falls_back_to_input_order() {
        let rows = people();
        let cols = columns();
        let mut sort = SortState::new();
        sort.toggle(&cols[0]);

        let remaining = vec![cols[1].clone()];
        assert_eq!(ordered_indices(&rows, &remaining, &sort), vec![0, 1]);
    }

    #[test]
    fn test_locale_cmp() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Zed", "alpha"), Ordering::Greater);
        assert_eq!(locale_cmp("abc", "abc"), Ordering::Equal);
        assert_eq!(locale_cmp("10", "9"), Ordering::Less);
    }

    #[test]
    fn test_accents_sort_with_their_base_letter() {
        assert_eq!(locale_cmp("éclair", "fig"), Ordering::Less);
        assert_eq!(locale_cmp("Émile", "Zoe"), Ordering::Less);
        assert_eq!(locale_cmp("eclair", "éclair"), Ordering::Less);
        assert_eq!(locale_cmp("resume", "Resume"), Ordering::Less);
        assert_eq!(locale_cmp("Resume", "résumé"), Ordering::Less);
        // precomposed and decomposed forms are the same text
        assert_eq!(locale_cmp("caf\u{e9}", "cafe\u{301}"), Ordering::Equal);

        let rows: Vec<Value> = ["zebra", "éclair", "fig", "Émile", "eclair"]
            .iter()
            .map(|name| json!({ "name": name }))
            .collect();
        let cols = columns();
        let mut sort = SortState::new();

        sort.toggle(&cols[0]);
        assert_eq!(
            names(&derive_order(&rows, &cols, &sort)),
            ["eclair", "éclair", "Émile", "fig", "zebra"]
        );

        sort.toggle(&cols[0]);
        assert_eq!(
            names(&derive_order(&rows, &cols, &sort)),
            ["zebra", "fig", "Émile", "éclair", "eclair"]
        );
    }

    #[test]
    fn test_mixed_values_compare_as_text() {
        let a = CellValue::Number(10.0);
        let b = CellValue::Text("9".into());
        assert_eq!(compare_cells(&a, &b), Ordering::Less);
    }
}
