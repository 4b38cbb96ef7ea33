//! Decision table CSV codec.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::topsis::{DecisionMatrix, RankedResult, RANK_COLUMN, SCORE_COLUMN};

/// Failure to serialize a ranked result.
#[derive(Debug, Error)]
#[error("Failed to write ranked CSV: {0}")]
pub struct CsvWriteError(String);

/// Parses an uploaded CSV table (header row required) into a matrix.
///
/// Blank lines are skipped. Rows whose width differs from the header are
/// reported as missing cells rather than as a parse failure.
pub fn parse_decision_matrix(bytes: &[u8]) -> Result<DecisionMatrix, ValidationError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| ValidationError::malformed_table(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ValidationError::malformed_table(e.to_string()))?;
        records.push(record.iter().map(str::to_string).collect());
    }

    DecisionMatrix::from_records(header, records)
}

/// Serializes a ranked result: original columns, then score and rank.
///
/// Rows are written in input order. Criteria cells keep their uploaded text.
pub fn write_ranked_result(result: &RankedResult) -> Result<Vec<u8>, CsvWriteError> {
    let matrix = result.matrix();
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = Vec::with_capacity(matrix.criteria_count() + 3);
    header.push(matrix.identifier_header().to_string());
    header.extend(matrix.criteria().iter().cloned());
    header.push(SCORE_COLUMN.to_string());
    header.push(RANK_COLUMN.to_string());
    writer
        .write_record(&header)
        .map_err(|e| CsvWriteError(e.to_string()))?;

    for row in result.rows() {
        let mut record = Vec::with_capacity(header.len());
        record.push(row.identifier.to_string());
        record.extend(row.cells.iter().cloned());
        record.push(row.score.to_string());
        record.push(row.rank.to_string());
        writer
            .write_record(&record)
            .map_err(|e| CsvWriteError(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| CsvWriteError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::topsis::{ImpactVector, TopsisEngine, WeightVector};

    const PHONES: &str = "\
Model,Price,Storage,Camera,Looks
M1,250,16,12,5
M2,200,16,8,3
M3,300,32,16,4
M4,275,32,8,4
";

    #[test]
    fn parses_uploaded_table() {
        let matrix = parse_decision_matrix(PHONES.as_bytes()).unwrap();
        assert_eq!(matrix.identifier_header(), "Model");
        assert_eq!(matrix.criteria(), &["Price", "Storage", "Camera", "Looks"]);
        assert_eq!(matrix.identifiers(), &["M1", "M2", "M3", "M4"]);
        assert_eq!(matrix.rows()[2], vec![300.0, 32.0, 16.0, 4.0]);
    }

    #[test]
    fn trims_cells_and_skips_blank_lines() {
        let input = "Id, A , B\n\nx, 1 , 2\n\ny,3,4\n";
        let matrix = parse_decision_matrix(input.as_bytes()).unwrap();
        assert_eq!(matrix.criteria(), &["A", "B"]);
        assert_eq!(matrix.rows(), &[vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn ragged_row_is_a_validation_error() {
        let input = "Id,A,B\nx,1,2\ny,3\n";
        assert_eq!(
            parse_decision_matrix(input.as_bytes()),
            Err(ValidationError::MissingCell {
                row: 2,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn non_numeric_criteria_cell_is_a_validation_error() {
        let input = "Id,A,B\nx,1,2\ny,3,four\n";
        assert!(matches!(
            parse_decision_matrix(input.as_bytes()),
            Err(ValidationError::NonNumericCell { row: 2, .. })
        ));
    }

    #[test]
    fn empty_upload_is_a_validation_error() {
        assert!(parse_decision_matrix(b"").is_err());
    }

    #[test]
    fn header_only_upload_has_too_few_alternatives() {
        assert_eq!(
            parse_decision_matrix(b"Id,A,B\n"),
            Err(ValidationError::TooFewAlternatives { found: 0 })
        );
    }

    #[test]
    fn non_utf8_upload_is_a_validation_error() {
        let input = b"Id,A,B\nx,1,2\ny,\xff\xfe,4\n";
        assert!(parse_decision_matrix(input).is_err());
    }

    #[test]
    fn writes_original_columns_plus_score_and_rank() {
        let matrix = parse_decision_matrix(PHONES.as_bytes()).unwrap();
        let weights = WeightVector::parse("1,1,1,1").unwrap();
        let impacts = ImpactVector::parse("+,+,+,-").unwrap();
        let result = TopsisEngine::rank(matrix, &weights, &impacts).unwrap();

        let csv = String::from_utf8(write_ranked_result(&result).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Model,Price,Storage,Camera,Looks,Topsis Score,Rank");
        assert!(lines[1].starts_with("M1,250,16,12,5,0.30789"));
        assert!(lines[1].ends_with(",4"));
        assert!(lines[3].starts_with("M3,300,32,16,4,0.80951"));
        assert!(lines[3].ends_with(",1"));
    }

    #[test]
    fn written_cells_keep_their_uploaded_spelling() {
        let input = "Id,A,B\nx,1e1,2.50\ny, 007 ,-0.0\n";
        let matrix = parse_decision_matrix(input.as_bytes()).unwrap();
        let weights = WeightVector::parse("1,1").unwrap();
        let impacts = ImpactVector::parse("+,-").unwrap();
        let result = TopsisEngine::rank(matrix, &weights, &impacts).unwrap();

        let csv = String::from_utf8(write_ranked_result(&result).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert!(lines[1].starts_with("x,1e1,2.50,"), "{}", lines[1]);
        assert!(lines[2].starts_with("y,007,-0.0,"), "{}", lines[2]);
    }
}
