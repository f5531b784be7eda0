//! Error types for spin requests and roster edits

use thiserror::Error;

/// Errors surfaced synchronously by the wheel core.
///
/// A failed spin request leaves the wheel state untouched; a failed roster
/// edit leaves the roster untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WheelError {
    #[error("cannot spin an empty wheel")]
    EmptyWheel,

    #[error("item '{label}' has invalid weight {weight}; weights must be positive and finite")]
    InvalidWeight { label: String, weight: f64 },

    #[error("item weights sum to {total}; the total must be finite")]
    WeightOverflow { total: f64 },

    #[error("item label must not be empty")]
    EmptyLabel,

    #[error("roster is full ({max} items max)")]
    RosterFull { max: usize },
}
