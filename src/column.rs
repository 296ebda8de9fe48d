//! Column descriptors for dashboard tables.

use crate::row::Row;

/// Display renderer for one column. Receives the whole row so a renderer can
/// combine fields or format a raw value.
pub type Render = Box<dyn Fn(&Row) -> String + Send + Sync>;

/// Configuration for one table column: which field it reads, how it is
/// labeled, whether its header sorts, and how its cells are displayed.
///
/// A column without a renderer shows the raw value's default string form.
/// Sorting and searching always use the raw field value, never the rendered
/// form.
pub struct Column {
    key: String,
    header: String,
    sortable: bool,
    render: Option<Render>,
}

impl Column {
    /// A non-sortable column.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Column {
            key: key.into(),
            header: header.into(),
            sortable: false,
            render: None,
        }
    }

    /// A column whose header sorts the table.
    pub fn sortable(key: impl Into<String>, header: impl Into<String>) -> Self {
        Column {
            sortable: true,
            ..Column::new(key, header)
        }
    }

    /// Attach a display renderer.
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Row) -> String + Send + Sync + 'static,
    {
        self.render = Some(Box::new(render));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// The display form of this column's cell for one row. A missing field
    /// with no renderer displays as the empty string.
    pub fn display_value(&self, row: &Row) -> String {
        match &self.render {
            Some(render) => render(row),
            None => row.get(&self.key).map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("render", &self.render.as_ref().map(|_| "<render>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_display_without_render() {
        let column = Column::new("amount", "Jumlah");
        let row = Row::new().with("amount", 50.0);
        assert_eq!(column.display_value(&row), "50");
    }

    #[test]
    fn missing_field_displays_empty() {
        let column = Column::new("amount", "Jumlah");
        assert_eq!(column.display_value(&Row::new()), "");
    }

    #[test]
    fn render_overrides_raw_display() {
        let column = Column::sortable("amount", "Jumlah")
            .with_render(|row| {
                format!(
                    "Rp {}",
                    row.get("amount").map(|v| v.to_string()).unwrap_or_default()
                )
            });
        let row = Row::new().with("amount", 50.0);
        assert_eq!(column.display_value(&row), "Rp 50");
        assert!(column.is_sortable());
    }
}
