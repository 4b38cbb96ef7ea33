//! TOPSIS Engine - closeness-to-ideal ranking of alternatives.

use std::cmp::Ordering;

use crate::domain::foundation::{DegenerateColumnError, TopsisError, ValidationError};

use super::matrix::{MIN_ALTERNATIVES, MIN_CRITERIA};
use super::{DecisionMatrix, Impact, ImpactVector, RankedResult, WeightVector};

/// TOPSIS ranking functions.
pub struct TopsisEngine;

impl TopsisEngine {
    /// Ranks the alternatives of `matrix` by relative closeness to the ideal.
    ///
    /// # Algorithm
    /// 1. Divide each column by its Euclidean norm
    /// 2. Multiply each column by its weight (weights used as given)
    /// 3. Ideal-best/worst per column: max/min for benefit, min/max for cost
    /// 4. Euclidean distance of each row to both ideals (S+, S-)
    /// 5. Closeness = S- / (S+ + S-), or 0 when both distances are 0
    /// 6. Stable sort by closeness descending; ranks 1..=N
    ///
    /// # Edge Cases
    /// - Equal scores: distinct successive ranks in input row order
    /// - All-zero column: `DegenerateColumnError`
    /// - Weight/impact count differs from criteria count: `ValidationError`,
    ///   raised before any numeric work
    pub fn rank(
        matrix: DecisionMatrix,
        weights: &WeightVector,
        impacts: &ImpactVector,
    ) -> Result<RankedResult, TopsisError> {
        Self::check_dimensions(&matrix, weights, impacts)?;

        let weighted = Self::weighted_normalized(&matrix, weights)?;
        let (ideal_best, ideal_worst) = Self::ideal_solutions(&weighted, impacts);

        let separation_best: Vec<f64> = weighted
            .iter()
            .map(|row| euclidean_distance(row, &ideal_best))
            .collect();
        let separation_worst: Vec<f64> = weighted
            .iter()
            .map(|row| euclidean_distance(row, &ideal_worst))
            .collect();

        let scores: Vec<f64> = separation_best
            .iter()
            .zip(&separation_worst)
            .map(|(&best, &worst)| closeness(best, worst))
            .collect();
        let ranks = Self::assign_ranks(&scores);

        Ok(RankedResult::new(
            matrix,
            scores,
            ranks,
            ideal_best,
            ideal_worst,
            separation_best,
            separation_worst,
        ))
    }

    fn check_dimensions(
        matrix: &DecisionMatrix,
        weights: &WeightVector,
        impacts: &ImpactVector,
    ) -> Result<(), ValidationError> {
        let criteria = matrix.criteria_count();
        if criteria < MIN_CRITERIA {
            return Err(ValidationError::TooFewCriteria { found: criteria });
        }
        if matrix.alternative_count() < MIN_ALTERNATIVES {
            return Err(ValidationError::TooFewAlternatives {
                found: matrix.alternative_count(),
            });
        }
        if weights.len() != impacts.len() {
            return Err(ValidationError::CountMismatch {
                weights: weights.len(),
                impacts: impacts.len(),
            });
        }
        if weights.len() != criteria {
            return Err(ValidationError::dimension_mismatch(
                "weights",
                criteria,
                weights.len(),
            ));
        }
        if impacts.len() != criteria {
            return Err(ValidationError::dimension_mismatch(
                "impacts",
                criteria,
                impacts.len(),
            ));
        }
        Ok(())
    }

    /// Computes `V[i][j] = x[i][j] / norm_j * w_j`.
    fn weighted_normalized(
        matrix: &DecisionMatrix,
        weights: &WeightVector,
    ) -> Result<Vec<Vec<f64>>, DegenerateColumnError> {
        let mut norms = Vec::with_capacity(matrix.criteria_count());
        for (j, name) in matrix.criteria().iter().enumerate() {
            match ScaledNorm::of(matrix.column(j)) {
                Some(norm) => norms.push(norm),
                None => return Err(DegenerateColumnError::new(name.clone())),
            }
        }

        Ok(matrix
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&norms)
                    .zip(weights.as_slice())
                    .map(|((&x, norm), w)| norm.normalize(x) * w)
                    .collect()
            })
            .collect())
    }

    /// Returns `(ideal_best, ideal_worst)` per column.
    fn ideal_solutions(weighted: &[Vec<f64>], impacts: &ImpactVector) -> (Vec<f64>, Vec<f64>) {
        let mut best = Vec::with_capacity(impacts.len());
        let mut worst = Vec::with_capacity(impacts.len());

        for (j, impact) in impacts.as_slice().iter().enumerate() {
            let column = weighted.iter().map(|row| row[j]);
            let max = column.clone().fold(f64::NEG_INFINITY, f64::max);
            let min = column.fold(f64::INFINITY, f64::min);
            match impact {
                Impact::Benefit => {
                    best.push(max);
                    worst.push(min);
                }
                Impact::Cost => {
                    best.push(min);
                    worst.push(max);
                }
            }
        }

        (best, worst)
    }

    /// Ranks by descending score; ties keep input order.
    fn assign_ranks(scores: &[f64]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        // sort_by is stable
        order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

        let mut ranks = vec![0; scores.len()];
        for (position, &row) in order.iter().enumerate() {
            ranks[row] = position + 1;
        }
        ranks
    }
}

/// Column norm kept as `scale * sqrt(sum((x / scale)^2))`, with `scale` the
/// largest magnitude in the column. Squaring the scaled values cannot
/// overflow, and a column of tiny non-zero values keeps a non-zero norm.
#[derive(Debug, Clone, Copy)]
struct ScaledNorm {
    scale: f64,
    scaled: f64,
}

impl ScaledNorm {
    /// `None` when every value in the column is zero.
    fn of(column: impl Iterator<Item = f64> + Clone) -> Option<Self> {
        let scale = column.clone().fold(0.0, |acc: f64, x| acc.max(x.abs()));
        if scale == 0.0 {
            return None;
        }
        let scaled = column.map(|x| (x / scale).powi(2)).sum::<f64>().sqrt();
        Some(Self { scale, scaled })
    }

    fn normalize(&self, x: f64) -> f64 {
        x / self.scale / self.scaled
    }
}

fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn closeness(separation_best: f64, separation_worst: f64) -> f64 {
    let total = separation_best + separation_worst;
    if total == 0.0 {
        0.0
    } else {
        separation_worst / total
    }
}
