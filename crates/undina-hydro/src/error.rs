//! Errors raised while validating or conditioning hydrodynamic tables.

use thiserror::Error;

/// Errors from hydrodynamic table construction and resampling.
#[derive(Debug, Error)]
pub enum HydroError {
    #[error("Shape mismatch in {what}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Empty grid: {0}")]
    EmptyGrid(&'static str),

    #[error("Grid '{what}' is not strictly ascending at index {index}")]
    NotAscending { what: &'static str, index: usize },

    #[error("Resampling step must be positive and finite, got {0}")]
    InvalidStep(f64),

    #[error("Spline fit failed: {0}")]
    Spline(String),

    #[error("Body {body} has no {kind} data")]
    MissingData { body: usize, kind: &'static str },
}

/// Check that `values` is non-empty and strictly increasing.
pub(crate) fn check_ascending(what: &'static str, values: &[f64]) -> Result<(), HydroError> {
    if values.is_empty() {
        return Err(HydroError::EmptyGrid(what));
    }
    for i in 1..values.len() {
        if !(values[i] > values[i - 1]) {
            return Err(HydroError::NotAscending { what, index: i });
        }
    }
    Ok(())
}
