//! Crate error type.

use thiserror::Error;

/// Errors surfaced to callers. The view engine clamps or ignores everything
/// else by contract, so the surface stays small.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// Rejected at view construction; a zero page size has no meaningful
    /// pagination.
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(usize),

    /// A role string the gate does not recognize.
    #[error("unknown admin role '{0}'")]
    UnknownRole(String),
}
