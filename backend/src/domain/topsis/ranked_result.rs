//! Ranked Result - a decision matrix augmented with closeness scores and ranks.

use serde::Serialize;

use super::DecisionMatrix;

/// Header of the appended closeness score column.
pub const SCORE_COLUMN: &str = "Topsis Score";

/// Header of the appended rank column.
pub const RANK_COLUMN: &str = "Rank";

/// One alternative's view of a ranked result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedRow<'a> {
    pub identifier: &'a str,
    pub values: &'a [f64],
    /// Criteria cell text as uploaded
    pub cells: &'a [String],
    pub score: f64,
    pub rank: usize,
}

/// Output of a ranking computation.
///
/// Rows stay in input order. `ranks` is a permutation of `1..=N`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    matrix: DecisionMatrix,
    scores: Vec<f64>,
    ranks: Vec<usize>,
    ideal_best: Vec<f64>,
    ideal_worst: Vec<f64>,
    separation_best: Vec<f64>,
    separation_worst: Vec<f64>,
}

impl RankedResult {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        matrix: DecisionMatrix,
        scores: Vec<f64>,
        ranks: Vec<usize>,
        ideal_best: Vec<f64>,
        ideal_worst: Vec<f64>,
        separation_best: Vec<f64>,
        separation_worst: Vec<f64>,
    ) -> Self {
        Self {
            matrix,
            scores,
            ranks,
            ideal_best,
            ideal_worst,
            separation_best,
            separation_worst,
        }
    }

    /// The original matrix.
    pub fn matrix(&self) -> &DecisionMatrix {
        &self.matrix
    }

    /// Closeness scores, in input row order.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Ranks (1 = best), in input row order.
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// Weighted-normalized ideal-best vector.
    pub fn ideal_best(&self) -> &[f64] {
        &self.ideal_best
    }

    /// Weighted-normalized ideal-worst vector.
    pub fn ideal_worst(&self) -> &[f64] {
        &self.ideal_worst
    }

    /// Distance of each row to the ideal-best vector.
    pub fn separation_best(&self) -> &[f64] {
        &self.separation_best
    }

    /// Distance of each row to the ideal-worst vector.
    pub fn separation_worst(&self) -> &[f64] {
        &self.separation_worst
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Rows in input order.
    pub fn rows(&self) -> impl Iterator<Item = RankedRow<'_>> {
        self.matrix
            .identifiers()
            .iter()
            .zip(self.matrix.rows().iter().zip(self.matrix.cells()))
            .zip(self.scores.iter().zip(&self.ranks))
            .map(|((identifier, (values, cells)), (&score, &rank))| RankedRow {
                identifier,
                values,
                cells,
                score,
                rank,
            })
    }

    /// Rows ordered by rank, best first.
    pub fn ranking(&self) -> Vec<RankedRow<'_>> {
        let mut rows: Vec<_> = self.rows().collect();
        rows.sort_by_key(|row| row.rank);
        rows
    }

    /// The rank-1 alternative.
    pub fn best(&self) -> Option<RankedRow<'_>> {
        self.rows().find(|row| row.rank == 1)
    }
}
