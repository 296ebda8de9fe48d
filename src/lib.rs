//! CampusRun Admin Dashboard Core
//!
//! Building blocks for the CampusRun campus-delivery back office: a generic
//! tabular view engine (search, sort, pagination over an in-memory row
//! snapshot), CSV export of filtered rows, role-based route gating, and the
//! typed marketplace records the dashboard tables render.
//!
//! The `server` feature adds an HTTP server exposing the dashboard tables
//! as JSON views and CSV downloads.

pub mod access;
pub mod column;
pub mod domain;
pub mod error;
pub mod export;
pub mod row;
pub mod value;
pub mod view;

pub use access::{route_decision, AdminRole, AuthContext, RouteDecision};
pub use column::{Column, Render};
pub use error::DashboardError;
pub use export::to_csv;
pub use row::Row;
pub use value::CellValue;
pub use view::{SortDirection, TableView, ViewOutput, DEFAULT_PAGE_SIZE};

// Dashboard HTTP server - only when the server feature is enabled
#[cfg(feature = "server")]
pub mod messages;
#[cfg(feature = "server")]
pub mod server;
