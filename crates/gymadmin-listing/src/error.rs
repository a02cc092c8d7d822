//! Error types for list queries

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for list queries
pub type ListingResult<T> = Result<T, ListingError>;

/// Errors raised while building or applying a list query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// Page size of zero
    #[error("Items per page must be at least 1")]
    ZeroPageSize,

    /// Sort key the entity does not expose
    #[error("Cannot sort {entity} by '{key}'")]
    UnknownSortKey {
        /// Entity being listed
        entity: &'static str,
        /// Requested key
        key: String,
    },

    /// Date range whose start lies after its end
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// Range start
        from: NaiveDate,
        /// Range end
        to: NaiveDate,
    },
}

impl From<ListingError> for gymadmin_core::Error {
    fn from(err: ListingError) -> Self {
        let field = match &err {
            ListingError::ZeroPageSize => "per_page",
            ListingError::UnknownSortKey { .. } => "sort",
            ListingError::InvalidDateRange { .. } => "from",
        };
        Self::Validation {
            field: field.to_string(),
            message: err.to_string(),
        }
    }
}
