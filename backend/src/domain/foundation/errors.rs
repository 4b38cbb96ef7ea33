//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised when request input violates a structural precondition.
///
/// All variants are detected before any numeric work runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    MissingField { field: String },

    #[error("Invalid email format: '{value}'")]
    InvalidEmail { value: String },

    #[error("Number of weights ({weights}) must be equal to number of impacts ({impacts})")]
    CountMismatch { weights: usize, impacts: usize },

    #[error("Impacts must be either + or -, got '{token}'")]
    InvalidImpact { token: String },

    #[error("Weight '{token}' is invalid: {reason}")]
    InvalidWeight { token: String, reason: String },

    #[error("At least 2 criteria columns are required, found {found}")]
    TooFewCriteria { found: usize },

    #[error("At least 2 alternatives are required, found {found}")]
    TooFewAlternatives { found: usize },

    #[error("Expected {expected} {field} to match the criteria columns, got {actual}")]
    DimensionMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Row {row} has {actual} cells, expected {expected}")]
    MissingCell {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    NonNumericCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Malformed table: {reason}")]
    MalformedTable { reason: String },
}

impl ValidationError {
    /// Creates a missing field validation error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        ValidationError::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid weight validation error.
    pub fn invalid_weight(token: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidWeight {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Creates a dimension mismatch validation error.
    pub fn dimension_mismatch(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        ValidationError::DimensionMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Creates a malformed table validation error.
    pub fn malformed_table(reason: impl Into<String>) -> Self {
        ValidationError::MalformedTable {
            reason: reason.into(),
        }
    }
}

/// A criterion column whose values are all zero.
///
/// Vector normalization divides by the column norm, which is undefined here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Criterion column '{column}' is all zeros; normalization is undefined")]
pub struct DegenerateColumnError {
    pub column: String,
}

impl DegenerateColumnError {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

/// Failure modes of a ranking computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopsisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DegenerateColumn(#[from] DegenerateColumnError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_mismatch_displays_both_counts() {
        let err = ValidationError::CountMismatch {
            weights: 3,
            impacts: 2,
        };
        assert_eq!(
            err.to_string(),
            "Number of weights (3) must be equal to number of impacts (2)"
        );
    }

    #[test]
    fn non_numeric_cell_names_location() {
        let err = ValidationError::NonNumericCell {
            row: 2,
            column: "Price".to_string(),
            value: "cheap".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Row 2, column 'Price': 'cheap' is not a number"
        );
    }

    #[test]
    fn degenerate_column_names_column() {
        let err = DegenerateColumnError::new("Storage");
        assert_eq!(
            err.to_string(),
            "Criterion column 'Storage' is all zeros; normalization is undefined"
        );
    }

    #[test]
    fn topsis_error_is_transparent() {
        let err: TopsisError = ValidationError::TooFewAlternatives { found: 1 }.into();
        assert_eq!(err.to_string(), "At least 2 alternatives are required, found 1");
        assert!(matches!(err, TopsisError::Validation(_)));
    }
}
