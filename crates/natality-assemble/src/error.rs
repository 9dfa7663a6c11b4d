//! Error types for comparison assembly.

use thiserror::Error;

/// Errors from assembling the comparison table.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// The inner join produced no rows. Distinguishable so callers can
    /// persist the per-source outputs instead of an empty comparison.
    #[error(
        "comparison join produced no records \
         ({indicator_count} indicator records, {birth_count} aggregated birth records)"
    )]
    EmptyResult {
        indicator_count: usize,
        birth_count: usize,
    },
}

/// Result type for assembly operations.
pub type Result<T> = std::result::Result<T, AssembleError>;
