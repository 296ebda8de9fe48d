//! CSV export for dashboard tables.
//!
//! A pure transform from the filtered (not paginated) row set to an
//! RFC-4180-style delimited artifact. Header names come from the first
//! row's fields, in field order; null values serialize to the empty string.

use crate::row::Row;

/// Render `rows` as CSV text. Returns an empty string when there are no
/// rows, since there is no header to take field names from.
pub fn to_csv<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut rows = rows.into_iter();
    let Some(first) = rows.next() else {
        return String::new();
    };
    let headers: Vec<&str> = first.field_names().collect();

    let mut lines = Vec::new();
    lines.push(
        headers
            .iter()
            .map(|h| escape_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in std::iter::once(first).chain(rows) {
        let line = headers
            .iter()
            .map(|&h| {
                let text = row.get(h).map(|v| v.to_string()).unwrap_or_default();
                escape_field(&text)
            })
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    lines.join("\n")
}

/// Quote-wrap a field containing a delimiter, quote, or line break, doubling
/// internal quotes.
fn escape_field(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
