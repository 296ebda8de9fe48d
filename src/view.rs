//! Tabular view engine.
//!
//! A [`TableView`] owns a snapshot of rows plus the column configuration for
//! one rendered table, and derives a filtered, sorted, paginated view from
//! its private view state (search query, sort key and direction, current
//! page). [`TableView::compute_view`] is a pure function of that state and
//! is cheap enough to re-run on every keystroke of a search box.
//!
//! Like the incremental views this engine replaced, filtering and sorting
//! work on an index mapping into the row snapshot, so the input order is
//! never disturbed.

use crate::column::Column;
use crate::error::DashboardError;
use crate::row::Row;
use crate::value::CellValue;
use std::cmp::Ordering;

/// Default number of rows per page, matching the dashboard tables.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort direction for a sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// One computed page of a table view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOutput<'a> {
    /// Rows visible on the current page, in display order.
    pub rows: Vec<&'a Row>,
    /// How many rows survived the search filter, before pagination.
    pub total_filtered: usize,
    /// Always at least 1, even when no row matches.
    pub total_pages: usize,
    /// Clamped into `[1, total_pages]`.
    pub current_page: usize,
}

/// View state and data for one rendered table.
///
/// State is private to the instance and lives exactly as long as it does;
/// nothing is shared across tables. Callers treat the row snapshot as
/// immutable for the lifetime of the view.
#[derive(Debug)]
pub struct TableView {
    rows: Vec<Row>,
    columns: Vec<Column>,
    page_size: usize,
    search: String,
    page: usize,
    sort_key: Option<String>,
    sort_direction: SortDirection,
}

impl TableView {
    /// Create a view over `rows` with the default page size.
    pub fn new(rows: Vec<Row>, columns: Vec<Column>) -> Self {
        TableView {
            rows,
            columns,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            page: 1,
            sort_key: None,
            sort_direction: SortDirection::Ascending,
        }
    }

    /// Create a view with an explicit page size.
    ///
    /// A page size of zero is a configuration error and is rejected here
    /// rather than producing undefined pagination.
    pub fn with_page_size(
        rows: Vec<Row>,
        columns: Vec<Column>,
        page_size: usize,
    ) -> Result<Self, DashboardError> {
        if page_size == 0 {
            return Err(DashboardError::InvalidPageSize(page_size));
        }
        let mut view = Self::new(rows, columns);
        view.page_size = page_size;
        Ok(view)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search_query(&self) -> &str {
        &self.search
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Update the search query. Any change resets the view to page 1.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.page = 1;
    }

    /// Sort by `key`, or flip direction when already sorting by it.
    ///
    /// Ignored unless some column declares `key` sortable.
    pub fn set_sort(&mut self, key: &str) {
        let sortable = self
            .columns
            .iter()
            .any(|c| c.key() == key && c.is_sortable());
        if !sortable {
            return;
        }
        if self.sort_key.as_deref() == Some(key) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_key = Some(key.to_string());
            self.sort_direction = SortDirection::Ascending;
        }
    }

    /// Jump to page `n`, clamped into `[1, total_pages]` under the current
    /// filter. Out-of-range targets clamp silently.
    pub fn set_page(&mut self, n: usize) {
        self.page = n.clamp(1, self.total_pages());
    }

    /// Pages available under the current filter. At least 1.
    pub fn total_pages(&self) -> usize {
        total_pages_for(self.filtered_indices().len(), self.page_size)
    }

    /// Filtered and sorted rows, before pagination. This is the sequence the
    /// CSV exporter consumes.
    pub fn filtered_rows(&self) -> Vec<&Row> {
        self.visible_indices()
            .into_iter()
            .map(|i| &self.rows[i])
            .collect()
    }

    /// Compute the current page.
    ///
    /// Pure: repeated calls without intervening mutation return identical
    /// output. The reported page is re-clamped here, so a page index left
    /// stale by a filter change can never select an out-of-range slice.
    pub fn compute_view(&self) -> ViewOutput<'_> {
        let ordered = self.visible_indices();
        let total_filtered = ordered.len();
        let total_pages = total_pages_for(total_filtered, self.page_size);
        let current_page = self.page.clamp(1, total_pages);
        let start = (current_page - 1) * self.page_size;
        let rows = ordered
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .map(|i| &self.rows[i])
            .collect();

        ViewOutput {
            rows,
            total_filtered,
            total_pages,
            current_page,
        }
    }

    fn visible_indices(&self) -> Vec<usize> {
        let mut indices = self.filtered_indices();
        if let Some(key) = self.sort_key.as_deref() {
            let direction = self.sort_direction;
            indices.sort_by(|&a, &b| {
                compare_rows(&self.rows[a], &self.rows[b], key, direction)
                    // Equal keys keep their original relative order.
                    .then_with(|| a.cmp(&b))
            });
        }
        indices
    }

    fn filtered_indices(&self) -> Vec<usize> {
        if self.search.is_empty() {
            return (0..self.rows.len()).collect();
        }
        let query = self.search.to_lowercase();
        (0..self.rows.len())
            .filter(|&i| row_matches(&self.rows[i], &query))
            .collect()
    }
}

fn total_pages_for(filtered: usize, page_size: usize) -> usize {
    filtered.div_ceil(page_size).max(1)
}

/// A row matches when any field's serialized form contains the query.
/// `query` must already be lowercased. Null fields serialize to the empty
/// string and never match a non-empty query.
fn row_matches(row: &Row, query: &str) -> bool {
    row.fields()
        .any(|(_, value)| value.to_string().to_lowercase().contains(query))
}

/// Order two rows by the raw value at `key`. Null or absent values sort
/// after any non-null value regardless of direction; the direction reverses
/// only the non-null comparison.
fn compare_rows(a: &Row, b: &Row, key: &str, direction: SortDirection) -> Ordering {
    let va = non_null(a.get(key));
    let vb = non_null(b.get(key));
    match (va, vb) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let cmp = compare_cells(x, y);
            match direction {
                SortDirection::Ascending => cmp,
                SortDirection::Descending => cmp.reverse(),
            }
        }
    }
}

fn non_null(value: Option<&CellValue>) -> Option<&CellValue> {
    value.filter(|v| !v.is_null())
}

/// Numeric when both sides are numbers, otherwise ordinal on string forms.
fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, amount: Option<f64>) -> Row {
        Row::new().with("name", name).with("amount", amount)
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::sortable("name", "Nama"),
            Column::sortable("amount", "Jumlah"),
        ]
    }

    fn sample() -> Vec<Row> {
        vec![
            person("Bima", Some(100.0)),
            person("Ana", None),
            person("Cici", Some(50.0)),
        ]
    }

    fn names(output: &ViewOutput<'_>) -> Vec<String> {
        output
            .rows
            .iter()
            .map(|r| r.get("name").unwrap().to_string())
            .collect()
    }

    #[test]
    fn compute_view_is_idempotent() {
        let mut view = TableView::new(sample(), columns());
        view.set_search_query("c");
        view.set_sort("amount");
        let first = view.compute_view();
        let second = view.compute_view();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_query_includes_every_row() {
        let view = TableView::new(sample(), columns());
        let output = view.compute_view();
        assert_eq!(output.total_filtered, 3);
        assert_eq!(names(&output), vec!["Bima", "Ana", "Cici"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let rows = vec![
            Row::new().with("name", "Ana").with("email", "ANA@UI.AC.ID"),
            Row::new().with("name", "Bima").with("email", "bima@itb.ac.id"),
        ];
        let mut view = TableView::new(rows, vec![Column::new("name", "Nama")]);
        view.set_search_query("ana@ui");
        let output = view.compute_view();
        assert_eq!(output.total_filtered, 1);
        assert_eq!(names(&output), vec!["Ana"]);
    }

    #[test]
    fn search_matches_serialized_numbers() {
        let mut view = TableView::new(sample(), columns());
        view.set_search_query("100");
        let output = view.compute_view();
        assert_eq!(names(&output), vec!["Bima"]);
    }

    #[test]
    fn null_fields_never_match_a_non_empty_query() {
        let rows = vec![Row::new().with("name", None::<String>)];
        let mut view = TableView::new(rows, vec![Column::new("name", "Nama")]);
        view.set_search_query("x");
        assert_eq!(view.compute_view().total_filtered, 0);
        // The empty query still includes the row.
        view.set_search_query("");
        assert_eq!(view.compute_view().total_filtered, 1);
    }

    #[test]
    fn changing_the_query_resets_to_page_one() {
        let rows: Vec<Row> = (0..25).map(|i| person(&format!("user{i}"), Some(i as f64))).collect();
        let mut view = TableView::new(rows, columns());
        view.set_page(3);
        assert_eq!(view.compute_view().current_page, 3);
        view.set_search_query("user");
        assert_eq!(view.compute_view().current_page, 1);
    }

    #[test]
    fn ascending_sort_puts_nulls_last() {
        let mut view = TableView::new(sample(), columns());
        view.set_sort("amount");
        assert_eq!(names(&view.compute_view()), vec!["Cici", "Bima", "Ana"]);
    }

    #[test]
    fn descending_sort_keeps_nulls_last() {
        let mut view = TableView::new(sample(), columns());
        view.set_sort("amount");
        view.set_sort("amount");
        assert_eq!(view.sort_direction(), SortDirection::Descending);
        assert_eq!(names(&view.compute_view()), vec!["Bima", "Cici", "Ana"]);
    }

    #[test]
    fn absent_field_sorts_like_null() {
        let rows = vec![
            Row::new().with("name", "NoAmount"),
            person("Cici", Some(50.0)),
        ];
        let mut view = TableView::new(rows, columns());
        view.set_sort("amount");
        assert_eq!(names(&view.compute_view()), vec!["Cici", "NoAmount"]);
    }

    #[test]
    fn equal_keys_preserve_input_order_in_both_directions() {
        let rows = vec![
            Row::new().with("name", "first").with("group", "a"),
            Row::new().with("name", "second").with("group", "b"),
            Row::new().with("name", "third").with("group", "a"),
            Row::new().with("name", "fourth").with("group", "b"),
        ];
        let make = || {
            TableView::new(
                rows.clone(),
                vec![Column::new("name", "Nama"), Column::sortable("group", "Grup")],
            )
        };

        let mut asc = make();
        asc.set_sort("group");
        assert_eq!(
            names(&asc.compute_view()),
            vec!["first", "third", "second", "fourth"]
        );

        let mut desc = make();
        desc.set_sort("group");
        desc.set_sort("group");
        assert_eq!(
            names(&desc.compute_view()),
            vec!["second", "fourth", "first", "third"]
        );
    }

    #[test]
    fn toggling_sort_flips_direction_without_changing_key() {
        let mut view = TableView::new(sample(), columns());
        view.set_sort("amount");
        assert_eq!(view.sort_key(), Some("amount"));
        assert_eq!(view.sort_direction(), SortDirection::Ascending);
        view.set_sort("amount");
        assert_eq!(view.sort_key(), Some("amount"));
        assert_eq!(view.sort_direction(), SortDirection::Descending);
        view.set_sort("amount");
        assert_eq!(view.sort_direction(), SortDirection::Ascending);
    }

    #[test]
    fn sorting_by_a_new_key_resets_to_ascending() {
        let mut view = TableView::new(sample(), columns());
        view.set_sort("amount");
        view.set_sort("amount");
        view.set_sort("name");
        assert_eq!(view.sort_key(), Some("name"));
        assert_eq!(view.sort_direction(), SortDirection::Ascending);
    }

    #[test]
    fn non_sortable_and_unknown_keys_are_ignored() {
        let rows = sample();
        let mut view = TableView::new(
            rows,
            vec![Column::new("name", "Nama"), Column::sortable("amount", "Jumlah")],
        );
        view.set_sort("name");
        assert_eq!(view.sort_key(), None);
        view.set_sort("does_not_exist");
        assert_eq!(view.sort_key(), None);
    }

    #[test]
    fn mixed_types_compare_by_string_form() {
        let rows = vec![
            Row::new().with("name", "text").with("v", "20"),
            Row::new().with("name", "number").with("v", 100.0),
        ];
        let mut view = TableView::new(
            rows,
            vec![Column::new("name", "Nama"), Column::sortable("v", "V")],
        );
        view.set_sort("v");
        // "100" < "20" ordinally.
        assert_eq!(names(&view.compute_view()), vec!["number", "text"]);
    }

    #[test]
    fn pages_partition_the_filtered_sequence() {
        let rows: Vec<Row> = (0..5).map(|i| person(&format!("user{i}"), Some(i as f64))).collect();
        let mut view = TableView::with_page_size(rows, columns(), 2).unwrap();
        view.set_sort("amount");

        let output = view.compute_view();
        assert_eq!(output.total_pages, 3);

        let mut collected = Vec::new();
        for page in 1..=output.total_pages {
            view.set_page(page);
            let page_output = view.compute_view();
            assert_eq!(page_output.current_page, page);
            collected.extend(names(&page_output));
        }
        assert_eq!(
            collected,
            vec!["user0", "user1", "user2", "user3", "user4"]
        );

        view.set_page(3);
        assert_eq!(view.compute_view().rows.len(), 1);
    }

    #[test]
    fn set_page_clamps_out_of_range_targets() {
        let rows: Vec<Row> = (0..5).map(|i| person(&format!("user{i}"), None)).collect();
        let mut view = TableView::with_page_size(rows, columns(), 2).unwrap();
        view.set_page(99);
        assert_eq!(view.compute_view().current_page, 3);
        view.set_page(0);
        assert_eq!(view.compute_view().current_page, 1);
    }

    #[test]
    fn empty_filter_result_still_reports_one_page() {
        let mut view = TableView::new(sample(), columns());
        view.set_search_query("no such row");
        let output = view.compute_view();
        assert_eq!(output.total_filtered, 0);
        assert_eq!(output.total_pages, 1);
        assert_eq!(output.current_page, 1);
        assert!(output.rows.is_empty());
    }

    #[test]
    fn zero_page_size_is_rejected_at_construction() {
        let err = TableView::with_page_size(sample(), columns(), 0).unwrap_err();
        assert_eq!(err, DashboardError::InvalidPageSize(0));
    }

    #[test]
    fn sorting_never_disturbs_the_input_order() {
        let rows: Vec<Row> = sample()
            .into_iter()
            .map(|r| r.with("constant", 1.0))
            .collect();
        let mut view = TableView::new(
            rows,
            vec![
                Column::sortable("amount", "Jumlah"),
                Column::sortable("constant", "Konstan"),
            ],
        );
        // Reorder the display, then sort by an all-equal key: ties must fall
        // back to the input order, not the previously displayed order.
        view.set_sort("amount");
        view.set_sort("amount");
        assert_eq!(names(&view.compute_view()), vec!["Bima", "Cici", "Ana"]);
        view.set_sort("constant");
        assert_eq!(names(&view.compute_view()), vec!["Bima", "Ana", "Cici"]);
    }
}
