//! CSV adapter - decision tables in, ranked tables out.
//!
//! The first column of an uploaded table is the row identifier; every other
//! column is a criterion. The output table repeats the input columns and
//! appends the closeness score and rank.

mod decision_table;

pub use decision_table::{parse_decision_matrix, write_ranked_result, CsvWriteError};
