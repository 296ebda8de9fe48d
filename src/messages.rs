//! Request and response types for the dashboard HTTP API.

use crate::column::Column;
use crate::row::Row;
use serde::{Deserialize, Serialize};

/// Query parameters accepted by the table view endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// Search box contents; empty or absent means no filtering.
    pub search: Option<String>,
    /// 1-based page number; out-of-range values clamp.
    pub page: Option<usize>,
    /// Column key to sort by; ignored for non-sortable columns.
    pub sort: Option<String>,
    /// `asc` (default) or `desc`.
    pub dir: Option<String>,
}

/// Column metadata the frontend needs to draw headers.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub key: String,
    pub header: String,
    pub sortable: bool,
}

impl From<&Column> for ColumnInfo {
    fn from(column: &Column) -> Self {
        ColumnInfo {
            key: column.key().to_string(),
            header: column.header().to_string(),
            sortable: column.is_sortable(),
        }
    }
}

/// One computed page of a dashboard table.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub table: String,
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Row>,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

/// Error payload for unknown tables and the like.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
