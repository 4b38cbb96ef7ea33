//! Decision Matrix - alternatives x criteria table of real values.

use serde::Serialize;

use crate::domain::foundation::ValidationError;

/// Minimum number of criteria columns for a meaningful ranking.
pub const MIN_CRITERIA: usize = 2;

/// Minimum number of alternatives (rows).
pub const MIN_ALTERNATIVES: usize = 2;

/// A validated decision matrix.
///
/// The first column of the source table is a non-numeric identifier; the
/// remaining columns are criteria. Header names, identifiers and the cell
/// text are kept so the ranked output can reproduce the original table.
///
/// # Invariants
///
/// - At least [`MIN_CRITERIA`] criteria columns
/// - At least [`MIN_ALTERNATIVES`] rows
/// - Every row has one finite value per criterion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionMatrix {
    identifier_header: String,
    criteria: Vec<String>,
    identifiers: Vec<String>,
    values: Vec<Vec<f64>>,
    cells: Vec<Vec<String>>,
}

impl DecisionMatrix {
    /// Creates a matrix from already-numeric rows.
    pub fn new(
        identifier_header: impl Into<String>,
        criteria: Vec<impl Into<String>>,
        rows: Vec<(impl Into<String>, Vec<f64>)>,
    ) -> Result<Self, ValidationError> {
        let criteria: Vec<String> = criteria.into_iter().map(Into::into).collect();
        Self::check_shape(criteria.len(), rows.len())?;

        let mut identifiers = Vec::with_capacity(rows.len());
        let mut values = Vec::with_capacity(rows.len());
        for (index, (identifier, row)) in rows.into_iter().enumerate() {
            let row_number = index + 1;
            if row.len() != criteria.len() {
                return Err(ValidationError::MissingCell {
                    row: row_number,
                    expected: criteria.len() + 1,
                    actual: row.len() + 1,
                });
            }
            if let Some(column) = row.iter().position(|v| !v.is_finite()) {
                return Err(ValidationError::NonNumericCell {
                    row: row_number,
                    column: criteria[column].clone(),
                    value: row[column].to_string(),
                });
            }
            identifiers.push(identifier.into());
            values.push(row);
        }
        let cells = values
            .iter()
            .map(|row| row.iter().map(f64::to_string).collect())
            .collect();

        Ok(Self {
            identifier_header: identifier_header.into(),
            criteria,
            identifiers,
            values,
            cells,
        })
    }

    /// Creates a matrix from raw table text: a header row and data records.
    ///
    /// Cells are trimmed before parsing. Non-finite spellings such as `inf`
    /// or `NaN` are rejected as non-numeric.
    pub fn from_records(
        header: Vec<String>,
        records: Vec<Vec<String>>,
    ) -> Result<Self, ValidationError> {
        let mut header = header.into_iter().map(|h| h.trim().to_string());
        let identifier_header = header
            .next()
            .ok_or_else(|| ValidationError::malformed_table("missing header row"))?;
        let criteria: Vec<String> = header.collect();
        Self::check_shape(criteria.len(), records.len())?;

        let width = criteria.len() + 1;
        let mut identifiers = Vec::with_capacity(records.len());
        let mut values = Vec::with_capacity(records.len());
        let mut texts = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let row_number = index + 1;
            if record.len() != width {
                return Err(ValidationError::MissingCell {
                    row: row_number,
                    expected: width,
                    actual: record.len(),
                });
            }

            let mut cells = record.into_iter();
            let identifier = cells.next().unwrap_or_default().trim().to_string();
            let mut row = Vec::with_capacity(criteria.len());
            let mut text = Vec::with_capacity(criteria.len());
            for (column, cell) in criteria.iter().zip(cells) {
                let cell = cell.trim();
                match cell.parse::<f64>() {
                    Ok(value) if value.is_finite() => {
                        row.push(value);
                        text.push(cell.to_string());
                    }
                    _ => {
                        return Err(ValidationError::NonNumericCell {
                            row: row_number,
                            column: column.clone(),
                            value: cell.to_string(),
                        })
                    }
                }
            }

            identifiers.push(identifier);
            values.push(row);
            texts.push(text);
        }

        Ok(Self {
            identifier_header,
            criteria,
            identifiers,
            values,
            cells: texts,
        })
    }

    /// Creates a matrix with generated names (`A1..`, `C1..`).
    pub fn from_values(values: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let width = values.first().map(Vec::len).unwrap_or(0);
        let criteria: Vec<String> = (1..=width).map(|j| format!("C{}", j)).collect();
        let rows: Vec<(String, Vec<f64>)> = values
            .into_iter()
            .enumerate()
            .map(|(i, row)| (format!("A{}", i + 1), row))
            .collect();
        Self::new("Alternative", criteria, rows)
    }

    fn check_shape(criteria: usize, rows: usize) -> Result<(), ValidationError> {
        if criteria < MIN_CRITERIA {
            return Err(ValidationError::TooFewCriteria { found: criteria });
        }
        if rows < MIN_ALTERNATIVES {
            return Err(ValidationError::TooFewAlternatives { found: rows });
        }
        Ok(())
    }

    /// Name of the identifier column.
    pub fn identifier_header(&self) -> &str {
        &self.identifier_header
    }

    /// Names of the criteria columns, in order.
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Row identifiers, in input order.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Numeric rows, in input order.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Criteria cells as uploaded (trimmed), in input order.
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Number of alternatives.
    pub fn alternative_count(&self) -> usize {
        self.values.len()
    }

    /// Number of criteria columns.
    pub fn criteria_count(&self) -> usize {
        self.criteria.len()
    }

    /// Iterates the values of column `j` top to bottom.
    pub fn column(&self, j: usize) -> impl Iterator<Item = f64> + Clone + '_ {
        self.values.iter().map(move |row| row[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn sample_header() -> Vec<String> {
        strings(&["Model", "Price", "Storage"])
    }

    #[test]
    fn from_records_parses_numeric_cells() {
        let matrix = DecisionMatrix::from_records(
            sample_header(),
            vec![strings(&["M1", "250", " 16 "]), strings(&["M2", "200.5", "1e1"])],
        )
        .unwrap();

        assert_eq!(matrix.identifier_header(), "Model");
        assert_eq!(matrix.criteria(), &["Price", "Storage"]);
        assert_eq!(matrix.identifiers(), &["M1", "M2"]);
        assert_eq!(matrix.rows(), &[vec![250.0, 16.0], vec![200.5, 10.0]]);
        assert_eq!(matrix.column(1).collect::<Vec<_>>(), vec![16.0, 10.0]);
        assert_eq!(
            matrix.cells(),
            &[strings(&["250", "16"]), strings(&["200.5", "1e1"])]
        );
    }

    #[test]
    fn from_records_requires_two_criteria() {
        let result = DecisionMatrix::from_records(
            strings(&["Model", "Price"]),
            vec![strings(&["M1", "1"]), strings(&["M2", "2"])],
        );
        assert_eq!(result, Err(ValidationError::TooFewCriteria { found: 1 }));
    }

    #[test]
    fn from_records_requires_two_rows() {
        let result =
            DecisionMatrix::from_records(sample_header(), vec![strings(&["M1", "1", "2"])]);
        assert_eq!(result, Err(ValidationError::TooFewAlternatives { found: 1 }));
    }

    #[test]
    fn from_records_rejects_missing_cells() {
        let result = DecisionMatrix::from_records(
            sample_header(),
            vec![strings(&["M1", "1", "2"]), strings(&["M2", "3"])],
        );
        assert_eq!(
            result,
            Err(ValidationError::MissingCell {
                row: 2,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn from_records_rejects_non_numeric_cells() {
        let result = DecisionMatrix::from_records(
            sample_header(),
            vec![strings(&["M1", "1", "2"]), strings(&["M2", "3", "lots"])],
        );
        assert_eq!(
            result,
            Err(ValidationError::NonNumericCell {
                row: 2,
                column: "Storage".to_string(),
                value: "lots".to_string(),
            })
        );
    }

    #[test]
    fn from_records_rejects_empty_and_non_finite_cells() {
        for bad in ["", "inf", "NaN"] {
            let result = DecisionMatrix::from_records(
                sample_header(),
                vec![strings(&["M1", "1", bad]), strings(&["M2", "3", "4"])],
            );
            assert!(
                matches!(result, Err(ValidationError::NonNumericCell { row: 1, .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn from_records_rejects_missing_header() {
        let result = DecisionMatrix::from_records(Vec::new(), Vec::new());
        assert!(matches!(result, Err(ValidationError::MalformedTable { .. })));
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let result = DecisionMatrix::new(
            "Id",
            vec!["X", "Y"],
            vec![("a", vec![1.0, 2.0]), ("b", vec![1.0])],
        );
        assert!(matches!(result, Err(ValidationError::MissingCell { row: 2, .. })));
    }

    #[test]
    fn from_values_generates_names() {
        let matrix = DecisionMatrix::from_values(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(matrix.identifiers(), &["A1", "A2"]);
        assert_eq!(matrix.criteria(), &["C1", "C2"]);
        assert_eq!(matrix.alternative_count(), 2);
        assert_eq!(matrix.criteria_count(), 2);
    }
}
